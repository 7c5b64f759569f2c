#![forbid(unsafe_code)]

use linviz_core::Size;

use crate::config::PackerConfig;
use crate::frame::LayoutFrame;
use crate::pack::pack;

/// Stateful wrapper around [`pack`].
///
/// Keeps the last good frame when the canvas is not sized yet or the
/// structure is empty, and skips the search when neither input changed.
#[derive(Debug, Clone)]
pub struct Packer {
    config: PackerConfig,
    frame: LayoutFrame,
    last_input: Option<(Size, usize)>,
}

impl Packer {
    pub fn new(config: PackerConfig) -> Self {
        let frame = LayoutFrame::initial(&config);
        Self {
            config,
            frame,
            last_input: None,
        }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Current frame. Before the first successful pack this carries the
    /// configured placeholder metrics and no positions.
    pub fn frame(&self) -> &LayoutFrame {
        &self.frame
    }

    /// Recompute the frame for `canvas` and `count`.
    ///
    /// Returns `true` when the frame changed.
    pub fn repack(&mut self, canvas: Size, count: usize) -> bool {
        if self.last_input == Some((canvas, count)) {
            return false;
        }
        let Some(frame) = pack(canvas, count, &self.config) else {
            linviz_core::trace!(?canvas, count, "keeping previous layout");
            return false;
        };
        self.last_input = Some((canvas, count));
        let changed = frame != self.frame;
        self.frame = frame;
        changed
    }

    /// Drop the memoized input so the next [`repack`](Self::repack) runs the
    /// search again.
    pub fn invalidate(&mut self) {
        self.last_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PackStrategy;

    #[test]
    fn starts_with_placeholder_metrics() {
        let packer = Packer::new(PackerConfig::chain());
        let frame = packer.frame();
        assert_eq!(frame.strategy, PackStrategy::Initial);
        assert_eq!(frame.element, Size::new(100, 60));
        assert_eq!(frame.connector, 40);
        assert!(frame.is_empty());
        assert!(frame.sentinel.is_some());
    }

    #[test]
    fn degenerate_canvas_keeps_previous_frame() {
        let mut packer = Packer::new(PackerConfig::slots());
        assert!(packer.repack(Size::new(800, 600), 30));
        let before = packer.frame().clone();
        assert!(!packer.repack(Size::new(0, 0), 30));
        assert_eq!(packer.frame(), &before);
        assert!(!packer.repack(Size::new(800, 600), 0));
        assert_eq!(packer.frame(), &before);
    }

    #[test]
    fn unchanged_inputs_are_memoized() {
        let mut packer = Packer::new(PackerConfig::slots());
        assert!(packer.repack(Size::new(800, 600), 12));
        assert!(!packer.repack(Size::new(800, 600), 12));
        packer.invalidate();
        // Same inputs produce the same frame, so nothing changed.
        assert!(!packer.repack(Size::new(800, 600), 12));
        assert!(packer.repack(Size::new(800, 600), 13));
        assert_eq!(packer.frame().len(), 13);
    }
}
