//! Tunables for the gesture interpreter.
//!
//! Defaults reproduce the storefront's feel. A page can override any field
//! through JSON, either inline or from `localStorage`.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};
use crate::model::DistanceMetric;

pub const STORAGE_KEY: &str = "sf_gesture_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Fraction of the viewport width a drag must cover to change panel.
    pub distance_ratio: f64,
    /// Sample-to-sample horizontal movement that counts as a flick.
    pub velocity_threshold_px: f64,
    /// Divisor applied to drag distance beyond the first/last panel.
    pub edge_resistance: f64,
    /// Pull beyond the last panel that reports `pulled_past_end`.
    pub pull_past_end_px: f64,
    pub transition_ms: u32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            distance_ratio: 1.0 / 3.0,
            velocity_threshold_px: 6.0,
            edge_resistance: 3.0,
            pull_past_end_px: 55.0,
            transition_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Share of raw finger-distance change that reaches the scale.
    pub pinch_damping: f64,
    /// Live scale above this is pinned to `elastic_ceiling`.
    pub elastic_hard_limit: f64,
    pub elastic_ceiling: f64,
    /// Divisor for live scale beyond `max_scale` on elastic platforms.
    pub elastic_overshoot_divisor: f64,
    /// Fraction of the viewport an edge gap must exceed to fire the edge
    /// callbacks on release.
    pub edge_trigger_ratio: f64,
    pub distance_metric: DistanceMetric,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 2.5,
            pinch_damping: 2.0 / 3.0,
            elastic_hard_limit: 3.5,
            elastic_ceiling: 2.833,
            elastic_overshoot_divisor: 3.0,
            edge_trigger_ratio: 1.0 / 3.0,
            distance_metric: DistanceMetric::Euclidean,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub enabled: bool,
    pub interval_ms: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self { enabled: true, interval_ms: 5000 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub swipe: SwipeConfig,
    pub zoom: ZoomConfig,
    pub autoplay: AutoplayConfig,
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: GestureConfig =
            serde_json::from_str(raw).map_err(|e| GestureError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.swipe;
        if !(s.distance_ratio > 0.0 && s.distance_ratio <= 1.0) {
            return Err(invalid("swipe.distance_ratio must be in (0, 1]"));
        }
        if s.velocity_threshold_px <= 0.0 {
            return Err(invalid("swipe.velocity_threshold_px must be positive"));
        }
        if s.edge_resistance < 1.0 {
            return Err(invalid("swipe.edge_resistance must be at least 1"));
        }
        let z = &self.zoom;
        if !(z.min_scale > 0.0 && z.min_scale < z.max_scale) {
            return Err(invalid("zoom scale range must satisfy 0 < min < max"));
        }
        if !(z.pinch_damping > 0.0 && z.pinch_damping <= 1.0) {
            return Err(invalid("zoom.pinch_damping must be in (0, 1]"));
        }
        if z.elastic_hard_limit <= z.max_scale || z.elastic_ceiling < z.max_scale {
            return Err(invalid("zoom elastic limits must lie above max_scale"));
        }
        if z.elastic_overshoot_divisor < 1.0 {
            return Err(invalid("zoom.elastic_overshoot_divisor must be at least 1"));
        }
        if self.autoplay.enabled && self.autoplay.interval_ms < self.swipe.transition_ms {
            return Err(invalid("autoplay.interval_ms must not be shorter than a transition"));
        }
        Ok(())
    }

    /// Reads an override from `localStorage`, falling back to defaults when
    /// the key is absent or unreadable.
    pub fn load_from_storage() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring stored gesture config: {e}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

fn invalid(msg: &str) -> GestureError {
    GestureError::InvalidConfig(msg.to_string())
}
