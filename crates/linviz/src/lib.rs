#![forbid(unsafe_code)]

//! linviz public facade crate.
//!
//! This crate ties the store, the packer, the animator and the render model
//! of one structure together behind [`Visualizer`], re-exports the common
//! types of the internal crates and offers a small prelude.
//!
//! ```
//! use std::time::Duration;
//! use linviz::prelude::*;
//!
//! let mut view = ArrayView::new(ViewConfig::default());
//! view.resize(800, 400);
//! view.initialize_len(5);
//! assert!(view.insert(-1, "x"));
//! assert!(view.frame().element(0).unwrap().state == VisualState::Highlighted);
//!
//! view.tick(Duration::from_millis(600));
//! assert_eq!(view.values(), ["x"]);
//! ```

pub mod config;
pub mod view;

use std::fmt;

pub use config::{ConfigError, ViewConfig};
pub use view::{ArrayView, ListView, TickOutcome, Visualizer};

// --- Core re-exports -------------------------------------------------------

pub use linviz_core::event::{MouseButton, PointerEvent, ViewEvent};
pub use linviz_core::{KindCaps, MutationError, Point, Rect, Size, StructureKind};

// --- Layout re-exports -----------------------------------------------------

pub use linviz_layout::{LayoutFrame, PackStrategy, PackerConfig};

// --- Store re-exports ------------------------------------------------------

pub use linviz_store::{NodeChain, SlotArray, Structure};

// --- Runtime re-exports ----------------------------------------------------

pub use linviz_runtime::{AnimationState, AnimatorConfig, FrameClock, RestartPolicy};

// --- Render re-exports -----------------------------------------------------

pub use linviz_render::{CellScale, HitTarget, Palette, RenderFrame, VisualState};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for linviz.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A mutation was rejected by the store.
    Mutation(MutationError),
    /// A configuration value could not be used.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutation(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mutation(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<MutationError> for Error {
    fn from(err: MutationError) -> Self {
        Self::Mutation(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for linviz APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ArrayView, CellScale, Error, HitTarget, ListView, PointerEvent, RenderFrame, Result,
        Structure, TickOutcome, ViewConfig, ViewEvent, VisualState, Visualizer,
    };

    pub use crate::{core, layout, render, runtime, store};
}

pub use linviz_core as core;
pub use linviz_layout as layout;
pub use linviz_render as render;
pub use linviz_runtime as runtime;
pub use linviz_store as store;
