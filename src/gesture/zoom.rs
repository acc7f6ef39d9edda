//! Pinch-to-zoom and pan for a single image.
//!
//! A session starts on every touch-start and decides its mode from the
//! first qualifying sample: one finger pans (only while zoomed in), two
//! fingers pinch. The mode then holds until the fingers lift, so a pinch
//! that briefly drops to one finger does not turn into a pan.

use crate::config::ZoomConfig;
use crate::error::{GestureError, Result};
use crate::gesture::elastic::{self, EdgeExceeded};
use crate::model::{Point, Rect, Size, TouchInput, Viewport};
use crate::platform::Platform;
use crate::state::ZoomState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomMode {
    Idle,
    Panning,
    Pinching,
}

#[derive(Debug, Clone, PartialEq)]
struct ZoomSession {
    mode: ZoomMode,
    /// Pan anchor or first pinch midpoint.
    reference_point: Point,
    /// First non-zero inter-finger distance; zero until captured.
    reference_distance: f64,
    prior: ZoomState,
    live: ZoomState,
}

impl ZoomSession {
    fn new(prior: ZoomState) -> Self {
        Self {
            mode: ZoomMode::Idle,
            reference_point: Point::default(),
            reference_distance: 0.0,
            prior,
            live: prior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRelease {
    pub state: ZoomState,
    pub edge: Option<EdgeExceeded>,
}

#[derive(Debug, Clone)]
pub struct PinchPanTransformer {
    config: ZoomConfig,
    platform: Platform,
    resting: ZoomState,
    session: Option<ZoomSession>,
}

impl PinchPanTransformer {
    pub fn new(config: ZoomConfig, platform: Platform) -> Self {
        Self { config, platform, resting: ZoomState::identity(), session: None }
    }

    /// State committed by the last release.
    pub fn resting(&self) -> ZoomState {
        self.resting
    }

    /// State to render right now.
    pub fn live(&self) -> ZoomState {
        self.session.as_ref().map_or(self.resting, |s| s.live)
    }

    pub fn mode(&self) -> ZoomMode {
        self.session.as_ref().map_or(ZoomMode::Idle, |s| s.mode)
    }

    /// Back to identity, e.g. when the viewer shows another image.
    pub fn reset(&mut self) {
        self.resting = ZoomState::identity();
        self.session = None;
    }

    /// Starts a new session from the resting state, discarding any previous
    /// one. A single finger on a zoomed image starts panning right away.
    pub fn touch_start(&mut self, input: &TouchInput) -> ZoomMode {
        let mut session = ZoomSession::new(self.resting);
        if input.len() == 1 && self.resting.is_zoomed() {
            if let Some(p) = input.first() {
                session.mode = ZoomMode::Panning;
                session.reference_point = p;
            }
        }
        let mode = session.mode;
        self.session = Some(session);
        mode
    }

    /// Applies one move sample. `Some` carries the transform to render and
    /// means the event was consumed; `None` leaves it to the page.
    pub fn touch_move(&mut self, input: &TouchInput) -> Result<Option<ZoomState>> {
        let session = self.session.as_mut().ok_or(GestureError::InvalidGestureState)?;
        match (session.mode, input.touches.as_slice()) {
            (ZoomMode::Idle | ZoomMode::Panning, [p]) if session.prior.is_zoomed() => {
                if session.mode == ZoomMode::Idle {
                    session.mode = ZoomMode::Panning;
                    session.reference_point = *p;
                }
                let prior = session.prior;
                session.live = ZoomState {
                    scale: prior.scale,
                    translate_x: (p.x - session.reference_point.x) / prior.scale + prior.translate_x,
                    translate_y: (p.y - session.reference_point.y) / prior.scale + prior.translate_y,
                };
                Ok(Some(session.live))
            }
            (ZoomMode::Idle | ZoomMode::Pinching, [a, b]) => {
                session.mode = ZoomMode::Pinching;
                let mid = Point::midpoint(*a, *b);
                let distance = Point::distance(*a, *b, self.config.distance_metric);
                if session.reference_distance <= 0.0 {
                    if distance <= 0.0 {
                        return Ok(None);
                    }
                    session.reference_distance = distance;
                    session.reference_point = mid;
                }
                let d0 = session.reference_distance;
                let raw = (d0 + (distance - d0) * self.config.pinch_damping) / d0 * session.prior.scale;
                let scale = elastic::shape_live_scale(raw, &self.platform, &self.config);
                let prior = session.prior;
                session.live = ZoomState {
                    scale,
                    translate_x: (mid.x - session.reference_point.x) / scale + prior.translate_x,
                    translate_y: (mid.y - session.reference_point.y) / scale + prior.translate_y,
                };
                Ok(Some(session.live))
            }
            _ => Ok(None),
        }
    }

    /// Commits the session: clamps the live transform against the viewport
    /// and reports an edge pulled far enough to navigate away.
    ///
    /// `rendered` is the element's current bounding rect and `natural` its
    /// untransformed size.
    pub fn touch_end(&mut self, rendered: Rect, natural: Size, viewport: Viewport) -> Result<ZoomRelease> {
        let session = self.session.take().ok_or(GestureError::InvalidGestureState)?;
        let (state, edge) = elastic::clamp_release(session.live, rendered, natural, viewport, &self.config);
        self.resting = state;
        log::debug!("zoom committed: {:?} edge={:?}", state, edge);
        Ok(ZoomRelease { state, edge })
    }

    /// Same as `touch_end` for an element whose untransformed box is
    /// `layout`; the rendered rect is derived from the live transform.
    pub fn touch_end_in_layout(&mut self, layout: Rect, viewport: Viewport) -> Result<ZoomRelease> {
        let rendered = self.live().project_rect(layout);
        self.touch_end(rendered, layout.size(), viewport)
    }

    /// Touch-cancel commits exactly like a release.
    pub fn touch_cancel(&mut self, rendered: Rect, natural: Size, viewport: Viewport) -> Result<ZoomRelease> {
        self.touch_end(rendered, natural, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DistanceMetric;

    fn transformer(platform: Platform) -> PinchPanTransformer {
        PinchPanTransformer::new(ZoomConfig::default(), platform)
    }

    fn pinch(t: &mut PinchPanTransformer, mid: Point, distance: f64) -> Option<ZoomState> {
        let a = Point::new(mid.x - distance / 2.0, mid.y);
        let b = Point::new(mid.x + distance / 2.0, mid.y);
        t.touch_move(&TouchInput::pair(a, b, 0.0)).unwrap()
    }

    const LAYOUT: Rect = Rect::new(0.0, 100.0, 400.0, 600.0);
    const VIEWPORT: Viewport = Viewport::new(400.0, 800.0);

    #[test]
    fn pinch_scale_is_damped_to_two_thirds() {
        let mut t = transformer(Platform::android(9));
        let mid = Point::new(200.0, 300.0);
        t.touch_start(&TouchInput::pair(Point::new(150.0, 300.0), Point::new(250.0, 300.0), 0.0));
        let first = pinch(&mut t, mid, 100.0).unwrap();
        assert_eq!(first.scale, 1.0);
        let z = pinch(&mut t, mid, 160.0).unwrap();
        assert!((z.scale - 1.4).abs() < 1e-9);
        assert_eq!(z.translate_x, 0.0);
        assert_eq!(t.mode(), ZoomMode::Pinching);
    }

    #[test]
    fn pinch_translation_is_in_unscaled_pixels() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 300.0), 100.0);
        let z = pinch(&mut t, Point::new(228.0, 286.0), 160.0).unwrap();
        assert!((z.translate_x - 20.0).abs() < 1e-9);
        assert!((z.translate_y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn pinch_scale_is_monotonic_in_distance() {
        for platform in [Platform::ios(), Platform::android(9)] {
            for d0 in [20.0, 100.0, 240.0] {
                let mut t = transformer(platform);
                t.touch_start(&TouchInput::default());
                let mut last = 0.0;
                let mut d = d0;
                while d < d0 * 8.0 {
                    let z = pinch(&mut t, Point::new(200.0, 300.0), d).unwrap();
                    assert!(z.scale >= last, "{platform:?} d0={d0} d={d}");
                    last = z.scale;
                    d += d0 / 7.0;
                }
            }
        }
    }

    #[test]
    fn successive_pinches_compose() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 160.0);
        let first = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap().state;
        assert!((first.scale - 1.4).abs() < 1e-9);

        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        let z = pinch(&mut t, Point::new(200.0, 400.0), 160.0).unwrap();
        assert!((z.scale - 1.96).abs() < 1e-9);
    }

    #[test]
    fn new_pinch_without_movement_reproduces_resting_state() {
        let mut t = transformer(Platform::ios());
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 250.0);
        let rest = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap().state;
        assert_eq!(rest.translate_x, 0.0);

        t.touch_start(&TouchInput::default());
        let again = pinch(&mut t, Point::new(120.0, 380.0), 90.0).unwrap();
        assert_eq!(again, rest);
    }

    #[test]
    fn ios_overshoot_springs_back_on_release() {
        let mut t = transformer(Platform::ios());
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        let live = pinch(&mut t, Point::new(200.0, 400.0), 400.0).unwrap();
        assert!(live.scale > 2.5);
        let rest = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap().state;
        assert_eq!(rest.scale, 2.5);

        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 400.0);
        let live = pinch(&mut t, Point::new(200.0, 400.0), 10.0).unwrap();
        assert!(live.scale < 1.0 && live.scale > 0.5);
        let rest = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap().state;
        assert_eq!(rest, ZoomState::identity());
    }

    #[test]
    fn one_finger_pans_only_when_zoomed() {
        let mut t = transformer(Platform::android(9));
        assert_eq!(t.touch_start(&TouchInput::single(100.0, 100.0, 0.0)), ZoomMode::Idle);
        assert_eq!(t.touch_move(&TouchInput::single(150.0, 100.0, 16.0)).unwrap(), None);
        t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();

        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 250.0);
        let rest = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap().state;
        assert_eq!(rest.scale, 2.0);

        assert_eq!(t.touch_start(&TouchInput::single(100.0, 100.0, 0.0)), ZoomMode::Panning);
        let z = t.touch_move(&TouchInput::single(160.0, 80.0, 16.0)).unwrap().unwrap();
        assert_eq!(z.scale, 2.0);
        assert_eq!(z.translate_x, 30.0);
        assert_eq!(z.translate_y, -10.0);
    }

    #[test]
    fn mode_holds_for_the_session() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 250.0);
        let zoomed = t.live();
        // One finger lifts mid-pinch: no switch to panning.
        assert_eq!(t.touch_move(&TouchInput::single(10.0, 10.0, 1.0)).unwrap(), None);
        assert_eq!(t.live(), zoomed);
        assert_eq!(t.mode(), ZoomMode::Pinching);
        t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();

        t.touch_start(&TouchInput::single(100.0, 100.0, 0.0));
        let two = TouchInput::pair(Point::new(0.0, 0.0), Point::new(300.0, 0.0), 2.0);
        assert_eq!(t.touch_move(&two).unwrap(), None);
        assert_eq!(t.mode(), ZoomMode::Panning);
    }

    #[test]
    fn touch_start_mid_pinch_restarts_from_rest() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        let live = pinch(&mut t, Point::new(240.0, 400.0), 220.0).unwrap();
        assert!(live.is_zoomed());
        assert_eq!(t.mode(), ZoomMode::Pinching);

        let mode = t.touch_start(&TouchInput::pair(Point::new(100.0, 400.0), Point::new(300.0, 400.0), 5.0));
        assert_eq!(mode, ZoomMode::Idle);
        assert_eq!(t.live(), ZoomState::identity());
        assert_eq!(t.resting(), ZoomState::identity());

        // The new pinch measures from its own first sample.
        let z = pinch(&mut t, Point::new(200.0, 400.0), 200.0).unwrap();
        assert_eq!(z, ZoomState::identity());
    }

    #[test]
    fn coincident_fingers_defer_the_reference() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        let p = Point::new(200.0, 200.0);
        assert_eq!(t.touch_move(&TouchInput::pair(p, p, 0.0)).unwrap(), None);
        assert_eq!(pinch(&mut t, p, 80.0).unwrap().scale, 1.0);
    }

    #[test]
    fn horizontal_metric_ignores_vertical_spread() {
        let cfg = ZoomConfig { distance_metric: DistanceMetric::HorizontalOnly, ..ZoomConfig::default() };
        let mut t = PinchPanTransformer::new(cfg, Platform::android(9));
        t.touch_start(&TouchInput::default());
        let a = Point::new(150.0, 300.0);
        t.touch_move(&TouchInput::pair(a, Point::new(250.0, 300.0), 0.0)).unwrap();
        let z = t.touch_move(&TouchInput::pair(a, Point::new(250.0, 500.0), 1.0)).unwrap().unwrap();
        assert_eq!(z.scale, 1.0);
    }

    #[test]
    fn right_edge_gap_fires_right_callback() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 250.0);
        t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();

        t.touch_start(&TouchInput::single(300.0, 400.0, 0.0));
        t.touch_move(&TouchInput::single(100.0, 400.0, 16.0)).unwrap();
        t.touch_move(&TouchInput::single(0.0, 400.0, 32.0)).unwrap();
        let release = t.touch_end(Rect::new(-550.0, 0.0, 800.0, 600.0), Size::new(400.0, 300.0), VIEWPORT).unwrap();
        assert_eq!(release.edge, Some(EdgeExceeded::Right));
        assert_eq!(release.state.translate_x, -100.0);
        assert_eq!(t.resting(), release.state);
    }

    #[test]
    fn left_edge_gap_fires_left_callback() {
        let mut t = transformer(Platform::android(9));
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 250.0);
        t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();

        t.touch_start(&TouchInput::single(100.0, 400.0, 0.0));
        t.touch_move(&TouchInput::single(440.0, 400.0, 16.0)).unwrap();
        let release = t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();
        assert_eq!(release.edge, Some(EdgeExceeded::Left));
        assert_eq!(release.state.translate_x, 100.0);
    }

    #[test]
    fn end_without_start_is_rejected() {
        let mut t = transformer(Platform::ios());
        assert_eq!(t.touch_end_in_layout(LAYOUT, VIEWPORT), Err(GestureError::InvalidGestureState));
        assert_eq!(
            t.touch_move(&TouchInput::single(0.0, 0.0, 0.0)),
            Err(GestureError::InvalidGestureState)
        );
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut t = transformer(Platform::ios());
        t.touch_start(&TouchInput::default());
        pinch(&mut t, Point::new(200.0, 400.0), 100.0);
        pinch(&mut t, Point::new(200.0, 400.0), 200.0);
        t.touch_end_in_layout(LAYOUT, VIEWPORT).unwrap();
        assert!(t.resting().is_zoomed());
        t.reset();
        assert_eq!(t.resting(), ZoomState::identity());
        assert_eq!(t.mode(), ZoomMode::Idle);
    }
}
