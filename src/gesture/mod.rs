//! The touch gesture interpreter: swipe classification for carousels,
//! pinch/pan for zoomable images, and scroll containment for popups.
//! Nothing in here touches the DOM.

pub mod containment;
pub mod elastic;
pub mod swipe;
pub mod zoom;

pub use containment::{ScrollContainment, ScrollMetrics};
pub use elastic::EdgeExceeded;
pub use swipe::{SwipeClassifier, SwipeOutcome, SwipeRelease};
pub use zoom::{PinchPanTransformer, ZoomMode, ZoomRelease};
