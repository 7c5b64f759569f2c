#![forbid(unsafe_code)]

//! Animation state as a plain value.
//!
//! [`AnimationState::advance`] is a pure function: the old state and a time
//! delta go in, the new state comes out. The animator owns the only copy and
//! replaces it on every tick.

use std::time::Duration;

use linviz_core::animation::{Animation, Sweep, bump_offset};

use crate::animator::AnimatorConfig;

/// Progress of the highlight sweep of one structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Element the sweep targets. Kept after the sweep ends.
    pub active_index: Option<usize>,
    /// Eased progress in `[0.0, 1.0]`.
    pub progress: f32,
    pub running: bool,
    /// Time since the sweep started.
    pub elapsed: Duration,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::IDLE
    }
}

impl AnimationState {
    /// No sweep, nothing targeted.
    pub const IDLE: Self = Self {
        active_index: None,
        progress: 0.0,
        running: false,
        elapsed: Duration::ZERO,
    };

    /// A fresh sweep targeting `index`, at progress zero.
    pub fn started(index: usize) -> Self {
        Self {
            active_index: Some(index),
            progress: 0.0,
            running: true,
            elapsed: Duration::ZERO,
        }
    }

    /// State after `dt` more time has passed.
    #[must_use]
    pub fn advance(self, dt: Duration, config: &AnimatorConfig) -> Self {
        if !self.running {
            return self;
        }
        let mut sweep = Sweep::new(config.sweep).easing(config.easing);
        sweep.tick(self.elapsed.saturating_add(dt));
        let done = sweep.is_complete();
        Self {
            progress: if done { 1.0 } else { sweep.value() },
            running: !done,
            elapsed: sweep.elapsed(),
            ..self
        }
    }

    /// Vertical offset for element `index` at the current progress. Zero
    /// unless a sweep is running on that element.
    pub fn offset_for(&self, index: usize, height: f32) -> i32 {
        if self.running && self.active_index == Some(index) {
            bump_offset(self.progress, height)
        } else {
            0
        }
    }
}
