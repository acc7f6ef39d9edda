//! Single-finger swipe classification for carousel strips.

use crate::config::SwipeConfig;
use crate::error::{GestureError, Result};
use crate::model::{Axis, Direction, TouchInput};
use crate::platform::Platform;
use crate::state::{CarouselEffect, CarouselLayout, CarouselState, GestureSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Finger moved left far or fast enough; next panel.
    Advance,
    /// Finger moved right far or fast enough; previous panel.
    Retreat,
    /// Below both thresholds, vertical, or blocked at a bound.
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeRelease {
    pub outcome: SwipeOutcome,
    /// `None` when the strip never moved (vertical or tap).
    pub effect: Option<CarouselEffect>,
    /// Released on the last panel after pulling further than the
    /// configured distance.
    pub pulled_past_end: bool,
}

/// Classifies a finished horizontal drag from its cumulative distance and
/// its last sample-to-sample step.
pub fn classify(distance_x: f64, last_step_x: f64, width: f64, cfg: &SwipeConfig) -> SwipeOutcome {
    let direction = if distance_x.abs() >= width * cfg.distance_ratio {
        Direction::from_delta(distance_x)
    } else if last_step_x.abs() >= cfg.velocity_threshold_px {
        Direction::from_delta(last_step_x)
    } else {
        None
    };
    match direction {
        Some(Direction::Forward) => SwipeOutcome::Advance,
        Some(Direction::Backward) => SwipeOutcome::Retreat,
        None => SwipeOutcome::Cancel,
    }
}

#[derive(Debug, Clone)]
pub struct SwipeClassifier {
    config: SwipeConfig,
    animate: bool,
    session: Option<GestureSession>,
}

impl SwipeClassifier {
    pub fn new(config: SwipeConfig, platform: &Platform) -> Self {
        Self { config, animate: platform.animates_transitions(), session: None }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn animates(&self) -> bool {
        self.animate
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    /// Opens a fresh session anchored at the first touch and suspends
    /// autoplay. A wrap transition still in flight is settled first; the
    /// returned jump must be applied before the drag starts.
    pub fn touch_start(
        &mut self,
        input: &TouchInput,
        carousel: &mut CarouselState,
        width: f64,
    ) -> Option<CarouselEffect> {
        let first = input.first()?;
        self.session = Some(GestureSession::begin(first, input.time_ms));
        carousel.suspend_autoplay();
        carousel.settle(width)
    }

    /// Follows the finger. Returns the live drag effect while the session is
    /// horizontal; `None` means the event belongs to someone else (vertical
    /// scroll or a second finger).
    pub fn touch_move(
        &mut self,
        input: &TouchInput,
        carousel: &mut CarouselState,
        width: f64,
    ) -> Result<Option<CarouselEffect>> {
        let session = self.session.as_mut().ok_or(GestureError::InvalidGestureState)?;
        if input.len() > 1 {
            return Ok(None);
        }
        let Some(p) = input.first() else {
            return Ok(None);
        };
        session.record(p, input.time_ms);
        match session.lock_axis() {
            Some(Axis::Horizontal) => {
                Ok(Some(carousel.drag(session.distance_x, width, self.config.edge_resistance)))
            }
            _ => Ok(None),
        }
    }

    /// Classifies the drag and commits the carousel. Autoplay resumes
    /// whatever the outcome.
    pub fn touch_end(&mut self, carousel: &mut CarouselState, width: f64) -> Result<SwipeRelease> {
        let session = self.session.take().ok_or(GestureError::InvalidGestureState)?;
        carousel.resume_autoplay();
        if !session.is_horizontal() {
            return Ok(SwipeRelease { outcome: SwipeOutcome::Cancel, effect: None, pulled_past_end: false });
        }

        // Measured on the resisted overshoot the user actually sees.
        let pulled_past_end = carousel.layout() == CarouselLayout::Bounded
            && carousel.at_last()
            && session.distance_x / self.config.edge_resistance < -self.config.pull_past_end_px;

        let mut outcome = classify(session.distance_x, session.last_step_x(), width, &self.config);
        let direction = match outcome {
            SwipeOutcome::Advance => Some(Direction::Forward),
            SwipeOutcome::Retreat => Some(Direction::Backward),
            SwipeOutcome::Cancel => None,
        };
        let effect = match direction {
            Some(d) if carousel.can_step(d) => carousel.step(d, width, self.animate),
            _ => {
                outcome = SwipeOutcome::Cancel;
                carousel.snap_back(width, self.animate)
            }
        };
        log::debug!(
            "swipe released: dx={:.1} step={:.1} -> {:?}, index {}",
            session.distance_x,
            session.last_step_x(),
            outcome,
            carousel.index()
        );
        Ok(SwipeRelease { outcome, effect: Some(effect), pulled_past_end })
    }

    /// Abandons the session and returns the strip to rest.
    pub fn touch_cancel(&mut self, carousel: &mut CarouselState, width: f64) -> Option<CarouselEffect> {
        let session = self.session.take()?;
        carousel.resume_autoplay();
        session.is_horizontal().then(|| carousel.snap_back(width, self.animate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 400.0;

    fn setup(n: usize) -> (SwipeClassifier, CarouselState) {
        let c = CarouselState::new(n, CarouselLayout::Bounded).unwrap();
        (SwipeClassifier::new(SwipeConfig::default(), &Platform::ios()), c)
    }

    fn drag(sw: &mut SwipeClassifier, c: &mut CarouselState, xs: &[f64]) -> SwipeRelease {
        sw.touch_start(&TouchInput::single(xs[0], 300.0, 0.0), c, W);
        for (i, x) in xs.iter().enumerate().skip(1) {
            sw.touch_move(&TouchInput::single(*x, 300.0, i as f64 * 16.0), c, W).unwrap();
        }
        sw.touch_end(c, W).unwrap()
    }

    #[test]
    fn short_drag_released_at_once_snaps_back() {
        let (mut sw, mut c) = setup(3);
        let r = drag(&mut sw, &mut c, &[200.0, 80.0]);
        assert_eq!(r.outcome, SwipeOutcome::Cancel);
        assert_eq!(c.index(), 0);
        assert_eq!(r.effect, Some(CarouselEffect::Animate { offset: 0.0 }));
    }

    #[test]
    fn drag_past_a_third_advances() {
        let (mut sw, mut c) = setup(3);
        let r = drag(&mut sw, &mut c, &[200.0, 60.0]);
        assert_eq!(r.outcome, SwipeOutcome::Advance);
        assert_eq!(c.index(), -1);
        assert_eq!(r.effect, Some(CarouselEffect::Animate { offset: -400.0 }));
    }

    #[test]
    fn no_index_change_below_both_thresholds() {
        for d in [-130.0, -90.0, -10.0, 10.0, 90.0, 130.0] {
            let (mut sw, mut c) = setup(3);
            c.go_to(1, W, false);
            // Slow approach: every step under 6px.
            let mut xs = vec![200.0];
            let steps = (d / 5.0_f64).abs().ceil() as usize;
            for i in 1..=steps {
                xs.push(200.0 + d * i as f64 / steps as f64);
            }
            let r = drag(&mut sw, &mut c, &xs);
            assert_eq!(r.outcome, SwipeOutcome::Cancel, "d={d}");
            assert_eq!(c.index(), -1, "d={d}");
        }
    }

    #[test]
    fn flick_changes_index_by_one() {
        let (mut sw, mut c) = setup(3);
        c.go_to(1, W, false);
        let r = drag(&mut sw, &mut c, &[200.0, 195.0, 185.0]);
        assert_eq!(r.outcome, SwipeOutcome::Advance);
        assert_eq!(c.index(), -2);

        let (mut sw, mut c) = setup(3);
        c.go_to(1, W, false);
        let r = drag(&mut sw, &mut c, &[200.0, 204.0, 211.0]);
        assert_eq!(r.outcome, SwipeOutcome::Retreat);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn bounds_turn_swipes_into_no_ops() {
        let (mut sw, mut c) = setup(3);
        let r = drag(&mut sw, &mut c, &[100.0, 300.0]);
        assert_eq!(r.outcome, SwipeOutcome::Cancel);
        assert_eq!(c.index(), 0);

        c.go_to(2, W, false);
        let r = drag(&mut sw, &mut c, &[300.0, 100.0]);
        assert_eq!(r.outcome, SwipeOutcome::Cancel);
        assert_eq!(c.index(), -2);
        assert!(r.pulled_past_end);
    }

    #[test]
    fn pull_past_end_needs_visible_overshoot() {
        let (mut sw, mut c) = setup(3);
        c.go_to(2, W, false);
        // 60px of finger travel shows only 20px beyond the last panel.
        assert!(!drag(&mut sw, &mut c, &[300.0, 240.0]).pulled_past_end);
        // 162px shows 54px: still short.
        assert!(!drag(&mut sw, &mut c, &[300.0, 138.0]).pulled_past_end);
        // 168px shows 56px.
        assert!(drag(&mut sw, &mut c, &[300.0, 132.0]).pulled_past_end);

        let (mut sw, mut c) = setup(3);
        assert!(!drag(&mut sw, &mut c, &[300.0, 100.0]).pulled_past_end);
    }

    #[test]
    fn new_touch_start_replaces_the_session() {
        let (mut sw, mut c) = setup(3);
        sw.touch_start(&TouchInput::single(300.0, 300.0, 0.0), &mut c, W);
        sw.touch_move(&TouchInput::single(220.0, 300.0, 16.0), &mut c, W).unwrap();
        assert_eq!(sw.session().unwrap().distance_x, -80.0);

        sw.touch_start(&TouchInput::single(100.0, 300.0, 40.0), &mut c, W);
        assert_eq!(sw.session().unwrap().distance_x, 0.0);
        assert_eq!(sw.session().unwrap().axis, None);
        let e = sw.touch_move(&TouchInput::single(70.0, 300.0, 56.0), &mut c, W).unwrap();
        assert_eq!(sw.session().unwrap().distance_x, -30.0);
        assert_eq!(e, Some(CarouselEffect::Drag { offset: -30.0 }));
    }

    #[test]
    fn live_drag_applies_edge_resistance() {
        let (mut sw, mut c) = setup(3);
        sw.touch_start(&TouchInput::single(100.0, 300.0, 0.0), &mut c, W);
        let e = sw.touch_move(&TouchInput::single(190.0, 300.0, 16.0), &mut c, W).unwrap();
        assert_eq!(e, Some(CarouselEffect::Drag { offset: 30.0 }));
        let e = sw.touch_move(&TouchInput::single(40.0, 300.0, 32.0), &mut c, W).unwrap();
        assert_eq!(e, Some(CarouselEffect::Drag { offset: -60.0 }));
    }

    #[test]
    fn vertical_drag_is_left_to_the_page() {
        let (mut sw, mut c) = setup(3);
        sw.touch_start(&TouchInput::single(200.0, 300.0, 0.0), &mut c, W);
        assert!(c.is_autoplay_suspended());
        let e = sw.touch_move(&TouchInput::single(198.0, 250.0, 16.0), &mut c, W).unwrap();
        assert_eq!(e, None);
        let e = sw.touch_move(&TouchInput::single(20.0, 240.0, 32.0), &mut c, W).unwrap();
        assert_eq!(e, None);
        let r = sw.touch_end(&mut c, W).unwrap();
        assert_eq!(r.outcome, SwipeOutcome::Cancel);
        assert_eq!(r.effect, None);
        assert!(!c.is_autoplay_suspended());
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn second_finger_is_ignored() {
        let (mut sw, mut c) = setup(3);
        sw.touch_start(&TouchInput::single(200.0, 300.0, 0.0), &mut c, W);
        let two = TouchInput::pair(
            crate::model::Point::new(10.0, 300.0),
            crate::model::Point::new(390.0, 300.0),
            16.0,
        );
        assert_eq!(sw.touch_move(&two, &mut c, W).unwrap(), None);
        assert_eq!(sw.session().unwrap().distance_x, 0.0);
    }

    #[test]
    fn events_without_session_are_rejected() {
        let (mut sw, mut c) = setup(3);
        assert_eq!(
            sw.touch_move(&TouchInput::single(1.0, 1.0, 0.0), &mut c, W),
            Err(GestureError::InvalidGestureState)
        );
        assert_eq!(sw.touch_end(&mut c, W), Err(GestureError::InvalidGestureState));
        assert_eq!(sw.touch_cancel(&mut c, W), None);
    }

    #[test]
    fn legacy_android_jumps_instead_of_animating() {
        let mut sw = SwipeClassifier::new(SwipeConfig::default(), &Platform::android(4));
        let mut c = CarouselState::new(3, CarouselLayout::Bounded).unwrap();
        let r = drag(&mut sw, &mut c, &[300.0, 100.0]);
        assert_eq!(r.effect, Some(CarouselEffect::Jump { offset: -400.0 }));
        assert!(!c.is_locked());
    }

    #[test]
    fn classify_prefers_distance_direction() {
        let cfg = SwipeConfig::default();
        assert_eq!(classify(-140.0, 8.0, W, &cfg), SwipeOutcome::Advance);
        assert_eq!(classify(-20.0, 8.0, W, &cfg), SwipeOutcome::Retreat);
        assert_eq!(classify(-20.0, 5.9, W, &cfg), SwipeOutcome::Cancel);
    }
}
