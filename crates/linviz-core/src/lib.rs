#![forbid(unsafe_code)]

//! Core: geometry, easing curves, structure kinds, pointer events and errors.

pub mod animation;
pub mod error;
pub mod event;
pub mod geometry;
pub mod kind;
pub mod logging;

pub use error::MutationError;
pub use geometry::{Point, Rect, Size};
pub use kind::{KindCaps, StructureKind};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
