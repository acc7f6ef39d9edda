use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PaginationProps {
    pub count: usize,
    pub current: usize,
    #[prop_or_default]
    pub on_select: Callback<usize>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.count < 2 {
        return html! {};
    }
    html! {<div class="sf-pagination" style="position:absolute; left:0; right:0; bottom:8px; display:flex; justify-content:center; gap:6px;">
        { for (0..props.count).map(|i| {
            let cb = props.on_select.clone();
            let onclick = Callback::from(move |_| cb.emit(i));
            let active = i == props.current;
            let style = format!(
                "width:{}px; height:6px; border-radius:3px; background:{}; transition:width 0.2s;",
                if active { 14 } else { 6 },
                if active { "#fff" } else { "rgba(255,255,255,0.5)" }
            );
            html! { <span class={classes!(active.then_some("showpoint"))} {style} {onclick}></span> }
        }) }
    </div>}
}
