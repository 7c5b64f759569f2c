#![forbid(unsafe_code)]

//! Drawable frames for the visualized structures.
//!
//! [`derive_frame`] combines stored elements, the packed layout and the
//! animation state into a [`RenderFrame`]: one sprite per laid-out element
//! with its visual state and colors, the sentinel head for chains, and the
//! connector arrows between nodes. The frame also answers hit tests against
//! the un-animated boxes.
//!
//! [`paint`] rasterizes a frame into text rows for terminals and snapshots.

pub mod derive;
pub mod model;
pub mod paint;
pub mod palette;

pub use derive::{FrameInput, derive_frame};
pub use model::{
    Connector, ConnectorKind, ElementSprite, HitTarget, RenderFrame, SentinelSprite, VisualState,
};
pub use paint::{CellScale, TextCanvas, paint};
pub use palette::{Palette, Rgb, StateStyle};
