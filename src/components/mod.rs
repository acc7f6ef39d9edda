pub mod app;
pub mod carousel;
pub mod contained_scroll;
pub mod details_popup;
pub mod pagination;
pub mod zoom_viewer;

pub use app::App;
pub use carousel::{Carousel, CarouselProps};
pub use contained_scroll::{ContainedScroll, ContainedScrollProps};
pub use zoom_viewer::{ZoomViewer, ZoomViewerProps};
