#![forbid(unsafe_code)]

//! Time-driven side of a mutation: the eased highlight sweep and the
//! deferred structural commit that follows it.
//!
//! Nothing here reads a clock on its own. Owners advance time explicitly with
//! `tick(dt)`; [`FrameClock`] turns wall-clock readings into those deltas for
//! callers running a real event loop.

pub mod animator;
pub mod clock;
pub mod state;
pub mod timer;

pub use animator::{AnimatorConfig, CommitTicket, MutationAnimator, RestartPolicy};
pub use clock::FrameClock;
pub use state::AnimationState;
pub use timer::{TimerQueue, TimerTicket};
