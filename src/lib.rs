//! Touch gestures for a mobile storefront: swipeable banner and gallery
//! carousels, a pinch/pan image viewer and scroll containment for popups.
//!
//! The gesture logic (`state`, `gesture`) is plain Rust driven by
//! `TouchInput` samples; `components` wires it to the DOM through yew.

pub mod components;
pub mod config;
pub mod error;
pub mod gesture;
pub mod model;
pub mod platform;
pub mod state;
pub mod util;

pub use config::GestureConfig;
pub use error::{GestureError, Result};
pub use platform::Platform;

/// Installs logging and mounts the demo storefront on `<body>`.
pub fn run() {
    util::init_logging(log::Level::Info);
    yew::Renderer::<components::App>::new().render();
}
