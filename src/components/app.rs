use super::{
    carousel::Carousel, contained_scroll::ContainedScroll, details_popup::DetailsPopup,
    zoom_viewer::ZoomViewer,
};
use crate::config::GestureConfig;
use crate::platform::Platform;
use crate::state::CarouselLayout;
use yew::prelude::*;

const BANNERS: [&str; 3] = ["img/banner-1.jpg", "img/banner-2.jpg", "img/banner-3.jpg"];
const GALLERY: [&str; 4] = [
    "img/product-1.jpg",
    "img/product-2.jpg",
    "img/product-3.jpg",
    "img/product-4.jpg",
];
const SPECS: [(&str, &str); 6] = [
    ("Brand", "Storefront"),
    ("Material", "Cotton blend"),
    ("Weight", "320 g"),
    ("Origin", "Imported"),
    ("Care", "Machine wash cold"),
    ("Warranty", "12 months"),
];

fn urls(list: &[&'static str]) -> Vec<AttrValue> {
    list.iter().map(|u| AttrValue::Static(*u)).collect()
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| GestureConfig::load_from_storage());
    let platform = use_memo((), |_| Platform::detect());
    let viewer_index = use_state(|| None::<usize>);
    let show_details = use_state(|| false);
    let gallery = urls(&GALLERY);

    {
        let platform = *platform;
        use_effect_with((), move |_| {
            log::info!("storefront ready: {:?}", platform);
            || ()
        });
    }

    let open_viewer = {
        let viewer_index = viewer_index.clone();
        Callback::from(move |page: usize| viewer_index.set(Some(page)))
    };
    let close_viewer = {
        let viewer_index = viewer_index.clone();
        Callback::from(move |_: ()| viewer_index.set(None))
    };
    // Dragging past an edge of the zoomed image browses the gallery.
    let prev_image = {
        let viewer_index = viewer_index.clone();
        Callback::from(move |_: ()| {
            if let Some(i) = *viewer_index {
                viewer_index.set(Some(i.saturating_sub(1)));
            }
        })
    };
    let next_image = {
        let viewer_index = viewer_index.clone();
        let last = GALLERY.len() - 1;
        Callback::from(move |_: ()| {
            if let Some(i) = *viewer_index {
                viewer_index.set(Some((i + 1).min(last)));
            }
        })
    };
    let open_details = {
        let show_details = show_details.clone();
        Callback::from(move |_: ()| show_details.set(true))
    };
    let close_details = {
        let show_details = show_details.clone();
        Callback::from(move |_: ()| show_details.set(false))
    };

    html! {
        <div class="sf-page" style="max-width:640px; margin:0 auto; font-family:sans-serif;">
            <Carousel
                panels={urls(&BANNERS)}
                layout={CarouselLayout::Circular}
                config={(*config).clone()}
                platform={*platform}
            />
            <h2 style="margin:12px;">{"Product gallery"}</h2>
            <Carousel
                panels={gallery.clone()}
                config={(*config).clone()}
                platform={*platform}
                on_select={open_viewer}
                on_pull_past_end={open_details.clone()}
            />
            <button onclick={open_details.reform(|_| ())} style="margin:12px; padding:6px 12px;">{"Details"}</button>
            <ZoomViewer
                show={viewer_index.is_some()}
                images={gallery}
                index={viewer_index.unwrap_or(0)}
                config={(*config).clone()}
                platform={*platform}
                on_close={close_viewer}
                on_left_edge_exceeded={prev_image}
                on_right_edge_exceeded={next_image}
            />
            <DetailsPopup show={*show_details} on_close={close_details}>
                <ContainedScroll>
                    <table style="width:100%; border-collapse:collapse;">
                        { for SPECS.iter().map(|(k, v)| html! {
                            <tr style="border-bottom:1px solid #30363d;">
                                <td style="padding:10px 0; opacity:0.7;">{*k}</td>
                                <td style="padding:10px 0;">{*v}</td>
                            </tr>
                        }) }
                    </table>
                </ContainedScroll>
            </DetailsPopup>
        </div>
    }
}
