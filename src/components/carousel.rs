use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlElement, TouchEvent};
use yew::prelude::*;

use super::pagination::Pagination;
use crate::config::GestureConfig;
use crate::error::GestureError;
use crate::gesture::SwipeClassifier;
use crate::platform::Platform;
use crate::state::{CarouselEffect, CarouselLayout, CarouselState};
use crate::util::touch_input;

#[derive(Properties, PartialEq, Clone)]
pub struct CarouselProps {
    pub panels: Vec<AttrValue>,
    #[prop_or_default]
    pub layout: CarouselLayout,
    pub config: GestureConfig,
    pub platform: Platform,
    /// Tap on a panel, with its zero-based page.
    #[prop_or_default]
    pub on_select: Callback<usize>,
    /// Released after pulling beyond the last panel.
    #[prop_or_default]
    pub on_pull_past_end: Callback<()>,
}

fn apply_effect(strip: &HtmlElement, effect: CarouselEffect, transition_ms: u32) {
    let style = strip.style();
    let transition = if effect.is_animated() {
        format!("transform {}ms ease-out", transition_ms)
    } else {
        "none".to_string()
    };
    let transform = format!("translate3d({}px, 0, 0)", effect.offset());
    let _ = style.set_property("transition", &transition);
    let _ = style.set_property("-webkit-transition", &transition);
    let _ = style.set_property("transform", &transform);
    let _ = style.set_property("-webkit-transform", &transform);
}

/// Page shown in each strip slot; circular strips carry a clone at both ends.
fn slot_pages(count: usize, layout: CarouselLayout) -> Vec<usize> {
    match layout {
        CarouselLayout::Circular if count > 1 => {
            let mut slots = Vec::with_capacity(count + 2);
            slots.push(count - 1);
            slots.extend(0..count);
            slots.push(0);
            slots
        }
        _ => (0..count).collect(),
    }
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let container_ref = use_node_ref();
    let strip_ref = use_node_ref();
    let page = use_state(|| 0usize);
    let width = use_mut_ref(|| 0.0_f64);
    let carousel = {
        let (count, layout) = (props.panels.len(), props.layout);
        use_mut_ref(move || match CarouselState::new(count, layout) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("carousel disabled: {e}");
                None
            }
        })
    };
    let classifier = {
        let (cfg, platform) = (props.config.swipe.clone(), props.platform);
        use_mut_ref(move || SwipeClassifier::new(cfg, &platform))
    };
    let layout = carousel.borrow().as_ref().map_or(CarouselLayout::Bounded, |c| c.layout());

    {
        let container_ref = container_ref.clone();
        let strip_ref = strip_ref.clone();
        let page = page.clone();
        let width = width.clone();
        let carousel = carousel.clone();
        let classifier = classifier.clone();
        let autoplay = props.config.autoplay.clone();
        let transition_ms = props.config.swipe.transition_ms;
        let on_pull_past_end = props.on_pull_past_end.clone();

        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let (Some(window), Some(container), Some(strip)) = (
                web_sys::window(),
                container_ref.cast::<HtmlElement>(),
                strip_ref.cast::<HtmlElement>(),
            ) else {
                log::warn!("{}", GestureError::MissingElement("carousel strip"));
                return Box::new(|| ());
            };
            if carousel.borrow().is_none() {
                return Box::new(|| ());
            }

            *width.borrow_mut() = container.client_width() as f64;
            let apply: Rc<dyn Fn(CarouselEffect)> = {
                let strip = strip.clone();
                Rc::new(move |effect| apply_effect(&strip, effect, transition_ms))
            };
            if let Some(c) = carousel.borrow_mut().as_mut() {
                apply(c.resize(*width.borrow()));
            }
            let sync_page: Rc<dyn Fn()> = {
                let carousel = carousel.clone();
                Rc::new(move || {
                    if let Some(c) = carousel.borrow().as_ref() {
                        page.set(c.page());
                    }
                })
            };
            let animate = classifier.borrow().animates();

            // Autoplay: cancelled on touch-start, rescheduled on touch-end.
            let interval_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
            let tick = {
                let carousel = carousel.clone();
                let width = width.clone();
                let apply = apply.clone();
                let sync_page = sync_page.clone();
                Rc::new(Closure::wrap(Box::new(move || {
                    let w = *width.borrow();
                    let effect = carousel.borrow_mut().as_mut().and_then(|c| c.autoplay_tick(w, animate));
                    if let Some(effect) = effect {
                        apply(effect);
                        sync_page();
                    }
                }) as Box<dyn FnMut()>))
            };
            let stop_autoplay: Rc<dyn Fn()> = {
                let window = window.clone();
                let interval_id = interval_id.clone();
                Rc::new(move || {
                    if let Some(id) = interval_id.take() {
                        window.clear_interval_with_handle(id);
                    }
                })
            };
            let start_autoplay: Rc<dyn Fn()> = {
                let window = window.clone();
                let interval_id = interval_id.clone();
                let stop_autoplay = stop_autoplay.clone();
                let tick = tick.clone();
                let panels = carousel.borrow().as_ref().map_or(0, |c| c.panel_count());
                Rc::new(move || {
                    stop_autoplay();
                    if !autoplay.enabled || panels < 2 {
                        return;
                    }
                    match window.set_interval_with_callback_and_timeout_and_arguments_0(
                        (*tick).as_ref().unchecked_ref(),
                        autoplay.interval_ms as i32,
                    ) {
                        Ok(id) => interval_id.set(Some(id)),
                        Err(e) => log::warn!("autoplay timer not started: {:?}", e),
                    }
                })
            };
            start_autoplay();

            let touch_start_cb = {
                let carousel = carousel.clone();
                let classifier = classifier.clone();
                let width = width.clone();
                let apply = apply.clone();
                let sync_page = sync_page.clone();
                let stop_autoplay = stop_autoplay.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    stop_autoplay();
                    let input = touch_input(&e);
                    let w = *width.borrow();
                    let jump = carousel
                        .borrow_mut()
                        .as_mut()
                        .and_then(|c| classifier.borrow_mut().touch_start(&input, c, w));
                    if let Some(jump) = jump {
                        apply(jump);
                        sync_page();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let carousel = carousel.clone();
                let classifier = classifier.clone();
                let width = width.clone();
                let apply = apply.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let input = touch_input(&e);
                    let w = *width.borrow();
                    let mut cell = carousel.borrow_mut();
                    let Some(c) = cell.as_mut() else {
                        return;
                    };
                    match classifier.borrow_mut().touch_move(&input, c, w) {
                        Ok(Some(effect)) => {
                            e.prevent_default();
                            apply(effect);
                        }
                        Ok(None) => {}
                        Err(err) => log::trace!("carousel touchmove ignored: {err}"),
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let carousel = carousel.clone();
                let classifier = classifier.clone();
                let width = width.clone();
                let apply = apply.clone();
                let sync_page = sync_page.clone();
                let start_autoplay = start_autoplay.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    let w = *width.borrow();
                    let release = carousel
                        .borrow_mut()
                        .as_mut()
                        .map(|c| classifier.borrow_mut().touch_end(c, w));
                    match release {
                        Some(Ok(release)) => {
                            if let Some(effect) = release.effect {
                                apply(effect);
                            }
                            if release.pulled_past_end {
                                on_pull_past_end.emit(());
                            }
                        }
                        Some(Err(err)) => log::trace!("carousel touchend ignored: {err}"),
                        None => {}
                    }
                    sync_page();
                    start_autoplay();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_cancel_cb = {
                let carousel = carousel.clone();
                let classifier = classifier.clone();
                let width = width.clone();
                let apply = apply.clone();
                let start_autoplay = start_autoplay.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    let w = *width.borrow();
                    let effect = carousel
                        .borrow_mut()
                        .as_mut()
                        .and_then(|c| classifier.borrow_mut().touch_cancel(c, w));
                    if let Some(effect) = effect {
                        apply(effect);
                    }
                    start_autoplay();
                }) as Box<dyn FnMut(_)>)
            };
            // Registered for both the standard and the prefixed event; the
            // second delivery finds the lock already released.
            let transition_end_cb = {
                let carousel = carousel.clone();
                let width = width.clone();
                let apply = apply.clone();
                let sync_page = sync_page.clone();
                Closure::wrap(Box::new(move |_e: Event| {
                    let w = *width.borrow();
                    let jump = carousel.borrow_mut().as_mut().and_then(|c| c.transition_end(w));
                    if let Some(jump) = jump {
                        apply(jump);
                    }
                    sync_page();
                }) as Box<dyn FnMut(_)>)
            };
            let resize_cb = {
                let carousel = carousel.clone();
                let container = container.clone();
                let width = width.clone();
                let apply = apply.clone();
                let sync_page = sync_page.clone();
                Closure::wrap(Box::new(move |_e: Event| {
                    let w = container.client_width() as f64;
                    *width.borrow_mut() = w;
                    let jump = carousel.borrow_mut().as_mut().map(|c| c.resize(w));
                    if let Some(jump) = jump {
                        apply(jump);
                        sync_page();
                    }
                }) as Box<dyn FnMut(_)>)
            };

            let touch_listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                ("touchstart", &touch_start_cb),
                ("touchmove", &touch_move_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_cancel_cb),
            ];
            for (name, cb) in touch_listeners {
                let _ = container.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
            }
            for name in ["transitionend", "webkitTransitionEnd"] {
                let _ = strip.add_event_listener_with_callback(name, transition_end_cb.as_ref().unchecked_ref());
            }
            let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

            Box::new(move || {
                stop_autoplay();
                let touch_listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_cancel_cb),
                ];
                for (name, cb) in touch_listeners {
                    let _ = container.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
                for name in ["transitionend", "webkitTransitionEnd"] {
                    let _ = strip
                        .remove_event_listener_with_callback(name, transition_end_cb.as_ref().unchecked_ref());
                }
                let _ = window.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                let _keep_alive = (&tick, &resize_cb);
            })
        });
    }

    let on_dot = {
        let strip_ref = strip_ref.clone();
        let carousel = carousel.clone();
        let classifier = classifier.clone();
        let width = width.clone();
        let page = page.clone();
        let transition_ms = props.config.swipe.transition_ms;
        Callback::from(move |target: usize| {
            let Some(strip) = strip_ref.cast::<HtmlElement>() else {
                return;
            };
            let animate = classifier.borrow().animates();
            let w = *width.borrow();
            let mut cell = carousel.borrow_mut();
            let Some(c) = cell.as_mut() else {
                return;
            };
            if c.is_locked() {
                return;
            }
            apply_effect(&strip, c.go_to(target, w, animate), transition_ms);
            page.set(c.page());
        })
    };

    let slots = slot_pages(props.panels.len(), layout);
    let strip_style = format!(
        "display:flex; width:{}%; will-change:transform;",
        slots.len().max(1) * 100
    );
    let slot_style = format!("flex:0 0 {}%; overflow:hidden;", 100.0 / slots.len().max(1) as f64);

    html! {<div ref={container_ref} class="sf-carousel" style="position:relative; overflow:hidden; width:100%; touch-action:pan-y;">
        <div ref={strip_ref} class="sf-carousel-strip" style={strip_style}>
            { for slots.iter().map(|&p| {
                let cb = props.on_select.clone();
                let onclick = Callback::from(move |_| cb.emit(p));
                html! {<div class="sf-carousel-panel" style={slot_style.clone()} {onclick}>
                    <img src={props.panels[p].clone()} draggable="false" style="display:block; width:100%; pointer-events:none;" />
                </div>}
            }) }
        </div>
        <Pagination count={props.panels.len()} current={*page} on_select={on_dot} />
    </div>}
}
