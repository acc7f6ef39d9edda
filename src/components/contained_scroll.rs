use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::gesture::{ScrollContainment, ScrollMetrics};

#[derive(Properties, PartialEq, Clone)]
pub struct ContainedScrollProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or(AttrValue::Static("60vh"))]
    pub max_height: AttrValue,
}

fn first_page_y(e: &TouchEvent) -> Option<f64> {
    e.touches().item(0).map(|t| t.page_y() as f64)
}

/// Scrollable list that swallows touch moves pushing past its ends.
#[function_component]
pub fn ContainedScroll(props: &ContainedScrollProps) -> Html {
    let list_ref = use_node_ref();
    let containment = use_mut_ref(ScrollContainment::default);

    {
        let list_ref = list_ref.clone();
        let containment = containment.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let Some(list) = list_ref.cast::<HtmlElement>() else {
                return Box::new(|| ());
            };
            let touch_start_cb = {
                let containment = containment.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if let Some(y) = first_page_y(&e) {
                        containment.borrow_mut().touch_start(y);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let containment = containment.clone();
                let list = list.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let Some(y) = first_page_y(&e) else {
                        return;
                    };
                    let metrics = ScrollMetrics {
                        scroll_top: list.scroll_top() as f64,
                        scroll_height: list.scroll_height() as f64,
                        client_height: list.client_height() as f64,
                    };
                    if let Ok(true) = containment.borrow().should_block(y, metrics) {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let containment = containment.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    containment.borrow_mut().touch_end();
                }) as Box<dyn FnMut(_)>)
            };

            let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                ("touchstart", &touch_start_cb),
                ("touchmove", &touch_move_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_end_cb),
            ];
            for (name, cb) in listeners {
                let _ = list.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
            }
            Box::new(move || {
                let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_end_cb),
                ];
                for (name, cb) in listeners {
                    let _ = list.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
            })
        });
    }

    let style = format!(
        "max-height:{}; overflow-y:auto; -webkit-overflow-scrolling:touch; overscroll-behavior:contain;",
        props.max_height
    );
    html! {<div ref={list_ref} class="sf-contained-scroll" {style}>
        { props.children.clone() }
    </div>}
}
