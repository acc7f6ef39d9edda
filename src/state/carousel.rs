// Carousel state: which panel is showing and where the strip sits.
use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};
use crate::model::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselLayout {
    /// Stops at the first and last panel.
    #[default]
    Bounded,
    /// Wraps around using a clone of the last panel before the strip and a
    /// clone of the first panel after it.
    Circular,
}

/// What the render layer has to do with the strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselEffect {
    /// Follow the finger, no transition.
    Drag { offset: f64 },
    /// Animate to `offset`; report completion through `transition_end`.
    Animate { offset: f64 },
    /// Move to `offset` with transitions disabled.
    Jump { offset: f64 },
}

impl CarouselEffect {
    pub fn offset(&self) -> f64 {
        match *self {
            CarouselEffect::Drag { offset }
            | CarouselEffect::Animate { offset }
            | CarouselEffect::Jump { offset } => offset,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, CarouselEffect::Animate { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    index: i32,
    panel_count: usize,
    offset: f64,
    transition_locked: bool,
    autoplay_suspended: bool,
    layout: CarouselLayout,
}

impl CarouselState {
    pub fn new(panel_count: usize, layout: CarouselLayout) -> Result<Self> {
        if panel_count == 0 {
            return Err(GestureError::MissingElement("carousel panels"));
        }
        // A single panel has nothing to wrap to.
        let layout = if panel_count == 1 { CarouselLayout::Bounded } else { layout };
        Ok(Self {
            index: 0,
            panel_count,
            offset: 0.0,
            transition_locked: false,
            autoplay_suspended: false,
            layout,
        })
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn layout(&self) -> CarouselLayout {
        self.layout
    }

    pub fn is_locked(&self) -> bool {
        self.transition_locked
    }

    pub fn is_autoplay_suspended(&self) -> bool {
        self.autoplay_suspended
    }

    pub fn min_index(&self) -> i32 {
        -(self.panel_count as i32 - 1)
    }

    pub fn max_index(&self) -> i32 {
        0
    }

    pub fn at_first(&self) -> bool {
        self.index >= self.max_index()
    }

    pub fn at_last(&self) -> bool {
        self.index <= self.min_index()
    }

    /// Zero-based page shown by the pagination dots.
    pub fn page(&self) -> usize {
        (-self.index).rem_euclid(self.panel_count as i32) as usize
    }

    /// Strip translation that shows the current panel at rest.
    pub fn resting_offset(&self, width: f64) -> f64 {
        self.strip_offset(self.index, width)
    }

    pub fn strip_offset(&self, index: i32, width: f64) -> f64 {
        match self.layout {
            CarouselLayout::Bounded => index as f64 * width,
            // Leading clone occupies the first slot of the strip.
            CarouselLayout::Circular => (index - 1) as f64 * width,
        }
    }

    /// Number of slots rendered in the strip, clones included.
    pub fn strip_len(&self) -> usize {
        match self.layout {
            CarouselLayout::Bounded => self.panel_count,
            CarouselLayout::Circular => self.panel_count + 2,
        }
    }

    /// Re-anchors the strip after the panel width changed (mount, resize).
    /// The jump cancels any running transition, so a pending wrap is
    /// settled first.
    pub fn resize(&mut self, width: f64) -> CarouselEffect {
        self.transition_locked = false;
        self.wrap_to_twin(width);
        self.offset = self.resting_offset(width);
        CarouselEffect::Jump { offset: self.offset }
    }

    pub fn can_step(&self, direction: Direction) -> bool {
        if self.panel_count < 2 {
            return false;
        }
        match (self.layout, direction) {
            (CarouselLayout::Circular, _) => true,
            (CarouselLayout::Bounded, Direction::Forward) => !self.at_last(),
            (CarouselLayout::Bounded, Direction::Backward) => !self.at_first(),
        }
    }

    /// Live translation while the finger is down. Beyond the first or last
    /// panel of a bounded strip the drag is divided by `resistance`.
    pub fn drag(&mut self, delta: f64, width: f64, resistance: f64) -> CarouselEffect {
        let beyond_edge = self.layout == CarouselLayout::Bounded
            && ((self.at_first() && delta > 0.0) || (self.at_last() && delta < 0.0));
        let applied = if beyond_edge { delta / resistance } else { delta };
        self.offset = self.resting_offset(width) + applied;
        CarouselEffect::Drag { offset: self.offset }
    }

    /// Moves one panel. Bounded strips clamp at the ends; circular strips
    /// may land on a clone, which `transition_end` resolves.
    pub fn step(&mut self, direction: Direction, width: f64, animate: bool) -> CarouselEffect {
        if self.can_step(direction) {
            self.index += direction.index_delta();
        }
        self.move_to_rest(width, animate)
    }

    pub fn snap_back(&mut self, width: f64, animate: bool) -> CarouselEffect {
        self.move_to_rest(width, animate)
    }

    /// Shows `page` directly, e.g. from a pagination dot.
    pub fn go_to(&mut self, page: usize, width: f64, animate: bool) -> CarouselEffect {
        let page = page.min(self.panel_count - 1) as i32;
        self.index = -page;
        self.move_to_rest(width, animate)
    }

    /// Completion of the pending transition. Idempotent: a second
    /// notification for the same transition does nothing.
    pub fn transition_end(&mut self, width: f64) -> Option<CarouselEffect> {
        if !self.transition_locked {
            return None;
        }
        self.transition_locked = false;
        self.wrap_to_twin(width)
    }

    /// Drops a pending transition immediately, as when a new touch lands
    /// before the previous animation finished.
    pub fn settle(&mut self, width: f64) -> Option<CarouselEffect> {
        self.transition_locked = false;
        self.wrap_to_twin(width)
    }

    /// One autoplay step, skipped while a transition or a drag is pending.
    /// A bounded strip rewinds to the first panel after the last one.
    pub fn autoplay_tick(&mut self, width: f64, animate: bool) -> Option<CarouselEffect> {
        if self.panel_count < 2 || self.transition_locked || self.autoplay_suspended {
            return None;
        }
        if self.layout == CarouselLayout::Bounded && self.at_last() {
            return Some(self.go_to(0, width, animate));
        }
        Some(self.step(Direction::Forward, width, animate))
    }

    pub fn suspend_autoplay(&mut self) {
        self.autoplay_suspended = true;
    }

    pub fn resume_autoplay(&mut self) {
        self.autoplay_suspended = false;
    }

    fn move_to_rest(&mut self, width: f64, animate: bool) -> CarouselEffect {
        let target = self.resting_offset(width);
        if !animate {
            self.transition_locked = false;
            if let Some(jump) = self.wrap_to_twin(width) {
                return jump;
            }
            self.offset = target;
            return CarouselEffect::Jump { offset: target };
        }
        // No distance to cover means no transitionend will ever fire.
        if (target - self.offset).abs() < f64::EPSILON {
            self.offset = target;
            return CarouselEffect::Jump { offset: target };
        }
        self.offset = target;
        self.transition_locked = true;
        CarouselEffect::Animate { offset: target }
    }

    fn wrap_to_twin(&mut self, width: f64) -> Option<CarouselEffect> {
        let n = self.panel_count as i32;
        if self.index < self.min_index() {
            self.index += n;
        } else if self.index > self.max_index() {
            self.index -= n;
        } else {
            return None;
        }
        log::debug!("carousel wrapped to index {}", self.index);
        self.offset = self.resting_offset(width);
        Some(CarouselEffect::Jump { offset: self.offset })
    }
}
