// Single-finger gesture session used by the swipe classifier.
use crate::model::{Axis, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub anchor: Point,
    pub last: Point,
    /// Move sample before `last`, once two move samples have arrived.
    pub previous: Option<Point>,
    pub distance_x: f64,
    pub axis: Option<Axis>,
    pub active: bool,
    pub started_ms: f64,
    pub last_ms: f64,
    moves: u32,
}

impl GestureSession {
    pub fn begin(anchor: Point, time_ms: f64) -> Self {
        Self {
            anchor,
            last: anchor,
            previous: None,
            distance_x: 0.0,
            axis: None,
            active: true,
            started_ms: time_ms,
            last_ms: time_ms,
            moves: 0,
        }
    }

    pub fn record(&mut self, p: Point, time_ms: f64) {
        if self.moves > 0 {
            self.previous = Some(self.last);
        }
        self.last = p;
        self.last_ms = time_ms;
        self.moves += 1;
        self.distance_x = p.x - self.anchor.x;
    }

    pub fn delta(&self) -> Point {
        Point::new(self.last.x - self.anchor.x, self.last.y - self.anchor.y)
    }

    /// Horizontal movement between the last two move samples; zero until a
    /// second move sample exists.
    pub fn last_step_x(&self) -> f64 {
        match self.previous {
            Some(prev) => self.last.x - prev.x,
            None => 0.0,
        }
    }

    /// Locks the axis on the first sample that actually moved. Ties go
    /// vertical so page scrolling is never hijacked.
    pub fn lock_axis(&mut self) -> Option<Axis> {
        if self.axis.is_none() {
            let d = self.delta();
            if d.x != 0.0 || d.y != 0.0 {
                self.axis = Some(if d.x.abs() > d.y.abs() {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                });
            }
        }
        self.axis
    }

    pub fn is_horizontal(&self) -> bool {
        self.axis == Some(Axis::Horizontal)
    }
}
