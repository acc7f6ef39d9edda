//! Scale shaping and release clamping for the zoom transformer.

use crate::config::ZoomConfig;
use crate::model::{Rect, Size, Viewport};
use crate::platform::Platform;
use crate::state::ZoomState;

/// Shapes the raw pinch scale while fingers are down. Elastic platforms let
/// it overshoot with resistance; others are pinned to the rest range.
pub fn shape_live_scale(raw: f64, platform: &Platform, cfg: &ZoomConfig) -> f64 {
    if !platform.elastic_zoom() {
        return clamp_rest_scale(raw, cfg);
    }
    if raw < cfg.min_scale {
        cfg.min_scale - (cfg.min_scale - raw) / 2.0
    } else if raw > cfg.elastic_hard_limit {
        cfg.elastic_ceiling
    } else if raw > cfg.max_scale {
        cfg.max_scale + (raw - cfg.max_scale) / cfg.elastic_overshoot_divisor
    } else {
        raw
    }
}

pub fn clamp_rest_scale(scale: f64, cfg: &ZoomConfig) -> f64 {
    scale.clamp(cfg.min_scale, cfg.max_scale)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisClamp {
    pub translation: f64,
    /// Empty space between the viewport's near edge and the element.
    pub near_gap: f64,
    /// Empty space between the element and the viewport's far edge.
    pub far_gap: f64,
}

/// Clamps one axis of the translation on release.
///
/// `near_edge` is the element's rendered left/top, `natural` its unscaled
/// length. An element smaller than the viewport is centred; otherwise an
/// edge pulled inside the viewport is snapped back flush.
pub fn clamp_axis(translation: f64, near_edge: f64, natural: f64, scale: f64, viewport: f64) -> AxisClamp {
    let scaled = natural * scale;
    if viewport >= scaled {
        return AxisClamp { translation: 0.0, near_gap: 0.0, far_gap: 0.0 };
    }
    let flush = (scaled - viewport) / 2.0 / scale;
    if near_edge > 0.0 {
        return AxisClamp { translation: flush, near_gap: near_edge, far_gap: 0.0 };
    }
    let far_gap = viewport - (scaled + near_edge);
    if far_gap > 0.0 {
        AxisClamp { translation: -flush, near_gap: 0.0, far_gap }
    } else {
        AxisClamp { translation, near_gap: 0.0, far_gap: 0.0 }
    }
}

/// Side whose gap exceeded the trigger on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeExceeded {
    /// The image was dragged right, opening space on the left.
    Left,
    /// The image was dragged left, opening space on the right.
    Right,
}

/// Clamps a live transform to its resting value. `rendered` is the
/// element's bounding rect under `live`, `natural` its unscaled size.
pub fn clamp_release(
    live: ZoomState,
    rendered: Rect,
    natural: Size,
    viewport: Viewport,
    cfg: &ZoomConfig,
) -> (ZoomState, Option<EdgeExceeded>) {
    let scale = clamp_rest_scale(live.scale, cfg);
    let x = clamp_axis(live.translate_x, rendered.left, natural.width, scale, viewport.width);
    let y = clamp_axis(live.translate_y, rendered.top, natural.height, scale, viewport.height);
    let trigger = viewport.width * cfg.edge_trigger_ratio;
    let edge = if x.near_gap > trigger {
        Some(EdgeExceeded::Left)
    } else if x.far_gap > trigger {
        Some(EdgeExceeded::Right)
    } else {
        None
    };
    let rest = ZoomState { scale, translate_x: x.translation, translate_y: y.translation };
    (rest, edge)
}
