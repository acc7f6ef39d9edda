use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DetailsPopupProps {
    pub show: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component]
pub fn DetailsPopup(props: &DetailsPopupProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:flex-end; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; color:#e6edf3; border:1px solid #30363d; border-radius:12px 12px 0 0; padding:16px 20px; width:100%; max-width:640px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Product details"}</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            { props.children.clone() }
        </div>
    </div>}
}
