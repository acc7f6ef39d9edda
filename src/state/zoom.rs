// Resting transform of a zoomable image, carried between gesture sessions.
use serde::{Deserialize, Serialize};

use crate::model::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub scale: f64,
    /// Translation in unscaled pixels, applied after the scale.
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomState {
    pub const fn identity() -> Self {
        Self { scale: 1.0, translate_x: 0.0, translate_y: 0.0 }
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    pub fn is_zoomed(&self) -> bool {
        (self.scale - 1.0).abs() > f64::EPSILON
    }

    pub fn transform_css(&self) -> String {
        format!(
            "scale3d({s}, {s}, 1) translate3d({x}px, {y}px, 0)",
            s = self.scale,
            x = self.translate_x,
            y = self.translate_y
        )
    }

    /// Bounding rect of an element laid out at `layout` once this transform
    /// is applied around its centre.
    pub fn project_rect(&self, layout: Rect) -> Rect {
        let cx = layout.left + layout.width / 2.0 + self.scale * self.translate_x;
        let cy = layout.top + layout.height / 2.0 + self.scale * self.translate_y;
        let w = layout.width * self.scale;
        let h = layout.height * self.scale;
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }
}
