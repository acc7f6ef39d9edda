//! Core geometry and input types shared by the gesture interpreter.
//! Everything here is plain data; the web layer converts DOM touch events
//! into `TouchInput` and reads rectangles into `Rect`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Distance between two fingers under the given metric.
    pub fn distance(a: Point, b: Point, metric: DistanceMetric) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        match metric {
            DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
            DistanceMetric::HorizontalOnly => dx.abs(),
        }
    }
}

/// How the inter-finger distance of a pinch is measured.
///
/// `HorizontalOnly` reproduces storefront builds whose distance only ever
/// reflected the X difference between the two fingers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    HorizontalOnly,
}

/// One raw touch event: active touches in order plus a monotonic timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchInput {
    pub touches: Vec<Point>,
    pub time_ms: f64,
}

impl TouchInput {
    pub fn new(touches: Vec<Point>, time_ms: f64) -> Self {
        Self { touches, time_ms }
    }

    pub fn single(x: f64, y: f64, time_ms: f64) -> Self {
        Self::new(vec![Point::new(x, y)], time_ms)
    }

    pub fn pair(a: Point, b: Point, time_ms: f64) -> Self {
        Self::new(vec![a, b], time_ms)
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.touches.first().copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Carousel travel direction. `Forward` is the finger moving left, which
/// brings the next panel in and decreases the index by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn index_delta(self) -> i32 {
        match self {
            Direction::Forward => -1,
            Direction::Backward => 1,
        }
    }

    /// Direction implied by a horizontal finger delta; `None` for zero.
    pub fn from_delta(dx: f64) -> Option<Direction> {
        if dx < 0.0 {
            Some(Direction::Forward)
        } else if dx > 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}
