// Browser helpers: logging setup and DOM-to-model conversions.
use wasm_bindgen::JsValue;
use web_sys::{Element, TouchEvent, TouchList};

use crate::model::{Point, Rect, TouchInput, Viewport};

/// Routes `log` records and panics to the browser console. Native builds
/// (tests) keep the default no-op logger.
pub fn init_logging(level: log::Level) {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(level));
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}

fn points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Active touches of an event, in client coordinates.
pub fn touch_input(e: &TouchEvent) -> TouchInput {
    TouchInput::new(points(&e.touches()), e.time_stamp())
}

pub fn viewport() -> Viewport {
    let win = web_sys::window();
    let dim = |v: Option<JsValue>, fallback: f64| v.and_then(|v| v.as_f64()).unwrap_or(fallback);
    let width = dim(win.as_ref().and_then(|w| w.inner_width().ok()), 375.0);
    let height = dim(win.as_ref().and_then(|w| w.inner_height().ok()), 667.0);
    Viewport::new(width, height)
}

pub fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}
