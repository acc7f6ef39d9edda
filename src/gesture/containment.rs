//! Keeps touch scrolling inside popup lists so the page underneath does
//! not scroll (or receive the tap) once the list hits either end.

use crate::error::{GestureError, Result};

/// Scroll position of a container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn at_bottom(&self) -> bool {
        (self.scroll_height - (self.scroll_top + self.client_height)).abs() <= 2.0
    }

    pub fn at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScrollContainment {
    start_y: Option<f64>,
}

impl ScrollContainment {
    pub fn touch_start(&mut self, page_y: f64) {
        self.start_y = Some(page_y);
    }

    /// Whether this move must be cancelled: the finger pushes further past
    /// an end the container already reached.
    pub fn should_block(&self, page_y: f64, metrics: ScrollMetrics) -> Result<bool> {
        let start = self.start_y.ok_or(GestureError::InvalidGestureState)?;
        let distance = start - page_y;
        Ok((metrics.at_bottom() && distance > 0.0) || (metrics.at_top() && distance < 0.0))
    }

    pub fn touch_end(&mut self) {
        self.start_y = None;
    }
}
