#![forbid(unsafe_code)]

//! Pointer input and the events a view emits to its controller.

use crate::geometry::Point;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// A button press on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: MouseButton,
}

impl PointerEvent {
    /// A left-button press at `(x, y)`.
    pub const fn left(x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub const fn new(position: Point, button: MouseButton) -> Self {
        Self { position, button }
    }
}

/// Notifications from a view to whoever drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// An occupied slot or a data node was clicked. Never emitted for holes
    /// or for the sentinel.
    ElementClicked { index: usize },
}
