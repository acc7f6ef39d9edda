pub mod carousel;
pub mod session;
pub mod zoom;

pub use carousel::{CarouselEffect, CarouselLayout, CarouselState};
pub use session::GestureSession;
pub use zoom::ZoomState;
