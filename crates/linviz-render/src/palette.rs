#![forbid(unsafe_code)]

//! Colors and font sizing.

use crate::model::VisualState;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill, border and text color of one visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateStyle {
    pub fill: Rgb,
    pub border: Rgb,
    pub text: Rgb,
}

/// Colors of every visual state plus background and connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub empty: StateStyle,
    pub highlighted: StateStyle,
    pub normal: StateStyle,
    pub sentinel: StateStyle,
    pub connector: Rgb,
    pub label: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::new(240, 240, 240),
            empty: StateStyle {
                fill: Rgb::WHITE,
                border: Rgb::new(200, 200, 200),
                text: Rgb::new(180, 180, 180),
            },
            highlighted: StateStyle {
                fill: Rgb::new(100, 200, 255),
                border: Rgb::new(50, 150, 255),
                text: Rgb::BLACK,
            },
            normal: StateStyle {
                fill: Rgb::new(200, 230, 255),
                border: Rgb::new(100, 180, 255),
                text: Rgb::BLACK,
            },
            sentinel: StateStyle {
                fill: Rgb::new(255, 220, 200),
                border: Rgb::new(255, 150, 100),
                text: Rgb::BLACK,
            },
            connector: Rgb::new(100, 100, 100),
            label: Rgb::new(100, 100, 100),
        }
    }
}

impl Palette {
    pub fn style(&self, state: VisualState) -> StateStyle {
        match state {
            VisualState::Empty => self.empty,
            VisualState::Highlighted => self.highlighted,
            VisualState::Normal => self.normal,
            VisualState::Sentinel => self.sentinel,
        }
    }
}

/// Font size for a slot value.
pub fn slot_font_px(width: i32) -> i32 {
    (width / 6).clamp(8, 14)
}

/// Font size for the placeholder of an empty slot.
pub fn hole_font_px(width: i32) -> i32 {
    (width / 7).clamp(8, 12)
}

/// Font size for chain node text, sentinel included.
pub fn node_font_px(width: i32) -> i32 {
    (width / 8).clamp(8, 12)
}
