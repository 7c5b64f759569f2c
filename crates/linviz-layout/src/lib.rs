#![forbid(unsafe_code)]

//! Adaptive packing of linear structures onto a canvas.
//!
//! Given a canvas size and an element count, [`pack`] searches a bounded
//! space of element widths, connector lengths and spacings for the first
//! grid arrangement whose derived element height is legible:
//!
//! - widths are tried from widest to narrowest,
//! - for each width, connector lengths (chains only) shortest first,
//! - for each connector, spacings tightest first.
//!
//! The order is the tie-break: a larger element always wins over a denser
//! packing. When nothing in the space qualifies a minimum-size fallback is
//! used instead, so a frame is always produced for valid geometry.
//!
//! [`Packer`] wraps the pure function with the "keep the previous frame"
//! behavior callers want while the canvas is not yet sized.
//!
//! ```
//! use linviz_core::{Size, StructureKind};
//! use linviz_layout::{PackerConfig, pack};
//!
//! let config = PackerConfig::for_kind(StructureKind::Slots);
//! let frame = pack(Size::new(800, 600), 30, &config).unwrap();
//! assert_eq!((frame.columns, frame.rows), (5, 6));
//! ```

mod config;
mod frame;
mod pack;
mod packer;

pub use config::{ConnectorRange, PackerConfig};
pub use frame::{LayoutFrame, PackStrategy};
pub use linviz_core::geometry::{Point, Rect, Size};
pub use pack::pack;
pub use packer::Packer;
