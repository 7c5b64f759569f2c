#![forbid(unsafe_code)]

//! Highlight sweep plus deferred commit, per structure.
//!
//! # State machine
//!
//! ```text
//!   Idle --start(i)--> Running(i) --sweep elapsed--> Idle(i)
//!          ^                |
//!          +----start(j)----+   (retarget: progress back to 0, index j)
//! ```
//!
//! Independently of the sweep, every `start` schedules a one-shot commit.
//! Restarting the sweep abandons only the motion: the earlier commit stays in
//! the queue and still fires at its own deadline. Commits are returned from
//! [`MutationAnimator::tick`] as data for the owner to apply.
//!
//! # Invariants
//!
//! - At most one sweep is active.
//! - Commits fire in deadline order, ties in start order.
//! - A commit fires exactly once unless cancelled or reset first.

use std::time::Duration;

use linviz_core::animation::{EasingFn, ease_out_cubic};
use tracing::{debug, trace};

use crate::state::AnimationState;
use crate::timer::{TimerQueue, TimerTicket};

/// Handle to a scheduled commit.
pub type CommitTicket = TimerTicket;

/// What happens to commits still pending when a new mutation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Leave them queued; each fires on its own timer.
    #[default]
    KeepPending,
    /// The owner applies them immediately before starting the new mutation.
    ///
    /// The flush happens before the mutation is validated, so it also runs
    /// when the mutation is then rejected.
    FlushPending,
}

/// Timing of the sweep and of the deferred commits.
#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    /// Length of the eased progress sweep.
    pub sweep: Duration,
    /// Delay before an insert's highlight is cleared.
    pub settle_delay: Duration,
    /// Delay before a delete or modify is applied.
    pub commit_delay: Duration,
    /// Peak upward offset of the animated element.
    pub bump_height: f32,
    pub easing: EasingFn,
    pub restart: RestartPolicy,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            sweep: Duration::from_millis(500),
            settle_delay: Duration::from_millis(600),
            commit_delay: Duration::from_millis(500),
            bump_height: 10.0,
            easing: ease_out_cubic,
            restart: RestartPolicy::KeepPending,
        }
    }
}

impl AnimatorConfig {
    /// Set the sweep duration (builder).
    #[must_use]
    pub fn sweep(mut self, sweep: Duration) -> Self {
        self.sweep = sweep;
        self
    }

    /// Set the insert settle delay (builder).
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the delete/modify commit delay (builder).
    #[must_use]
    pub fn commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay = delay;
        self
    }

    /// Set the bump height (builder).
    #[must_use]
    pub fn bump_height(mut self, height: f32) -> Self {
        self.bump_height = height;
        self
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set the restart policy (builder).
    #[must_use]
    pub fn restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart = policy;
        self
    }
}

/// Drives the sweep and holds the pending commits of one structure.
#[derive(Debug)]
pub struct MutationAnimator<C> {
    config: AnimatorConfig,
    state: AnimationState,
    timers: TimerQueue<C>,
}

impl<C> Default for MutationAnimator<C> {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

impl<C> MutationAnimator<C> {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            state: AnimationState::IDLE,
            timers: TimerQueue::new(),
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Number of commits waiting for their deadline.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Whether a sweep is running or a commit is pending.
    pub fn is_busy(&self) -> bool {
        self.state.running || !self.timers.is_empty()
    }

    /// Time until the next commit fires.
    pub fn next_commit_in(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Start a sweep on `index` and schedule `commit` after `delay`.
    pub fn start(&mut self, index: usize, commit: C, delay: Duration) -> CommitTicket {
        if self.state.running {
            debug!(
                from = ?self.state.active_index,
                to = index,
                progress = self.state.progress,
                "retargeting sweep"
            );
        }
        self.state = AnimationState::started(index);
        let ticket = self.timers.schedule(delay, commit);
        debug!(
            index,
            delay_ms = delay.as_millis() as u64,
            pending = self.timers.len(),
            "commit scheduled"
        );
        ticket
    }

    /// Advance by `dt`. Returns the commits that came due, earliest first.
    pub fn tick(&mut self, dt: Duration) -> Vec<C> {
        let was_running = self.state.running;
        self.state = self.state.advance(dt, &self.config);
        if was_running && !self.state.running {
            trace!(index = ?self.state.active_index, "sweep finished");
        }
        let due = self.timers.advance(dt);
        if !due.is_empty() {
            debug!(count = due.len(), pending = self.timers.len(), "commits fired");
        }
        due
    }

    /// Cancel one pending commit.
    pub fn cancel(&mut self, ticket: CommitTicket) -> Option<C> {
        let cancelled = self.timers.cancel(ticket);
        if cancelled.is_some() {
            debug!(?ticket, "commit cancelled");
        }
        cancelled
    }

    /// Remove every pending commit, in firing order, without applying them.
    pub fn take_pending(&mut self) -> Vec<C> {
        self.timers.drain()
    }

    /// Stop the sweep and cancel every pending commit.
    pub fn reset(&mut self) -> usize {
        let cancelled = self.timers.clear();
        if cancelled > 0 {
            debug!(cancelled, "pending commits cancelled by reset");
        }
        self.state = AnimationState::IDLE;
        cancelled
    }

    /// Offset of element `index` at the current progress.
    pub fn offset_for(&self, index: usize) -> i32 {
        self.state.offset_for(index, self.config.bump_height)
    }
}
