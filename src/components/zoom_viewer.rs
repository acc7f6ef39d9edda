use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::config::GestureConfig;
use crate::gesture::{EdgeExceeded, PinchPanTransformer, ZoomRelease};
use crate::model::Size;
use crate::platform::Platform;
use crate::state::ZoomState;
use crate::util::{bounding_rect, touch_input, viewport};

const SETTLE_TRANSITION: &str = "transform 250ms ease-out";

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomViewerProps {
    pub show: bool,
    pub images: Vec<AttrValue>,
    pub index: usize,
    pub config: GestureConfig,
    pub platform: Platform,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_left_edge_exceeded: Callback<()>,
    #[prop_or_default]
    pub on_right_edge_exceeded: Callback<()>,
}

fn apply_state(img: &HtmlElement, state: &ZoomState, transition: &str) {
    let style = img.style();
    let transform = state.transform_css();
    let _ = style.set_property("transition", transition);
    let _ = style.set_property("-webkit-transition", transition);
    let _ = style.set_property("transform", &transform);
    let _ = style.set_property("-webkit-transform", &transform);
    // Mirrored for stylesheets and automation.
    let _ = img.set_attribute("data-scale", &format!("{}", state.scale));
    let _ = img.set_attribute("data-left", &format!("{}", state.translate_x));
    let _ = img.set_attribute("data-top", &format!("{}", state.translate_y));
}

#[function_component]
pub fn ZoomViewer(props: &ZoomViewerProps) -> Html {
    let img_ref = use_node_ref();
    let src = props.images.get(props.index).cloned();
    let transformer = {
        let (cfg, platform) = (props.config.zoom.clone(), props.platform);
        use_mut_ref(move || PinchPanTransformer::new(cfg, platform))
    };

    {
        let img_ref = img_ref.clone();
        let transformer = transformer.clone();
        let on_left = props.on_left_edge_exceeded.clone();
        let on_right = props.on_right_edge_exceeded.clone();
        use_effect_with((props.show, src.clone()), move |(show, _src)| -> Box<dyn FnOnce()> {
            transformer.borrow_mut().reset();
            let Some(img) = img_ref.cast::<HtmlElement>().filter(|_| *show) else {
                return Box::new(|| ());
            };
            apply_state(&img, &ZoomState::identity(), "none");

            let touch_start_cb = {
                let img = img.clone();
                let transformer = transformer.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let mut t = transformer.borrow_mut();
                    t.touch_start(&touch_input(&e));
                    apply_state(&img, &t.live(), "none");
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let img = img.clone();
                let transformer = transformer.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    match transformer.borrow_mut().touch_move(&touch_input(&e)) {
                        Ok(Some(live)) => {
                            e.prevent_default();
                            apply_state(&img, &live, "none");
                        }
                        Ok(None) => {}
                        Err(err) => log::trace!("zoom touchmove ignored: {err}"),
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let img = img.clone();
                let transformer = transformer.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    // Lifting one finger of a pinch keeps the session open.
                    if e.touches().length() > 0 {
                        return;
                    }
                    let rendered = bounding_rect(&img);
                    let natural = Size::new(img.client_width() as f64, img.client_height() as f64);
                    let release = transformer.borrow_mut().touch_end(rendered, natural, viewport());
                    match release {
                        Ok(ZoomRelease { state, edge }) => {
                            apply_state(&img, &state, SETTLE_TRANSITION);
                            match edge {
                                Some(EdgeExceeded::Left) => on_left.emit(()),
                                Some(EdgeExceeded::Right) => on_right.emit(()),
                                None => {}
                            }
                        }
                        Err(err) => log::trace!("zoom touchend ignored: {err}"),
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_cancel_cb = {
                let img = img.clone();
                let transformer = transformer.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    let rendered = bounding_rect(&img);
                    let natural = Size::new(img.client_width() as f64, img.client_height() as f64);
                    if let Ok(release) = transformer.borrow_mut().touch_cancel(rendered, natural, viewport()) {
                        apply_state(&img, &release.state, SETTLE_TRANSITION);
                    }
                }) as Box<dyn FnMut(_)>)
            };

            let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                ("touchstart", &touch_start_cb),
                ("touchmove", &touch_move_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_cancel_cb),
            ];
            for (name, cb) in listeners {
                let _ = img.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
            }

            Box::new(move || {
                let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_cancel_cb),
                ];
                for (name, cb) in listeners {
                    let _ = img.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
            })
        });
    }

    let Some(src) = src.filter(|_| props.show) else {
        return html! {};
    };

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div class="sf-zoom-viewer" style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:#000; z-index:60; overflow:hidden; touch-action:none;">
        <img ref={img_ref} {src} draggable="false"
            style="max-width:100%; max-height:100%; transform-origin:50% 50%; user-select:none;" />
        <button onclick={close_cb} style="position:absolute; top:12px; right:12px; padding:4px 10px; background:rgba(0,0,0,0.5); color:#fff; border:1px solid #30363d; border-radius:6px;">{"Close"}</button>
    </div>}
}
