#![forbid(unsafe_code)]

//! Text rasterization of a [`RenderFrame`].
//!
//! Canvas units are mapped onto a character grid by a [`CellScale`]. Boxes
//! are drawn with a border style per visual state, connectors as line runs
//! ending in an arrow glyph, and text centered by display width.

use linviz_core::{Point, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::{ConnectorKind, RenderFrame, VisualState};

/// Canvas units per character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub x: i32,
    pub y: i32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self { x: 8, y: 16 }
    }
}

impl CellScale {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn col(&self, x: i32) -> i32 {
        x.div_euclid(self.x.max(1))
    }

    fn row(&self, y: i32) -> i32 {
        y.div_euclid(self.y.max(1))
    }

    /// Cell rectangle covering `rect`, at least one cell in each direction.
    fn cells(&self, rect: Rect) -> Rect {
        let x0 = self.col(rect.x);
        let y0 = self.row(rect.y);
        let x1 = self.col(rect.right() - 1).max(x0);
        let y1 = self.row(rect.bottom() - 1).max(y0);
        Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }
}

/// Box-drawing characters of one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };

    const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    const DASHED: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '┄',
        vertical: '┆',
    };

    fn for_state(state: VisualState) -> Self {
        match state {
            VisualState::Empty => Self::DASHED,
            VisualState::Highlighted => Self::HEAVY,
            VisualState::Normal => Self::ROUNDED,
            VisualState::Sentinel => Self::DOUBLE,
        }
    }
}

/// Fixed-size grid of characters. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

/// Placeholder stored in the cell after a double-width character.
const CONTINUATION: char = '\0';

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn set(&mut self, x: i32, y: i32, c: char) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = c;
        }
    }

    pub fn draw_horizontal_line(&mut self, x: i32, y: i32, len: i32, c: char) {
        for dx in 0..len.max(0) {
            self.set(x + dx, y, c);
        }
    }

    pub fn draw_vertical_line(&mut self, x: i32, y: i32, len: i32, c: char) {
        for dy in 0..len.max(0) {
            self.set(x, y + dy, c);
        }
    }

    fn fill(&mut self, rect: Rect, c: char) {
        for y in rect.y..rect.bottom() {
            self.draw_horizontal_line(rect.x, y, rect.width, c);
        }
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_horizontal_line(left, top, rect.width, chars.horizontal);
        self.draw_horizontal_line(left, bottom, rect.width, chars.horizontal);
        self.draw_vertical_line(left, top, rect.height, chars.vertical);
        self.draw_vertical_line(right, top, rect.height, chars.vertical);
        // Corners last so they win over the edges.
        self.set(left, top, chars.top_left);
        self.set(right, top, chars.top_right);
        self.set(left, bottom, chars.bottom_left);
        self.set(right, bottom, chars.bottom_right);
    }

    /// Write `text` from `x`, stopping before `max_x`. Returns the column
    /// after the last written character.
    pub fn print_text_clipped(&mut self, x: i32, y: i32, text: &str, max_x: i32) -> i32 {
        let mut cx = x;
        for c in text.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if cx + w > max_x {
                break;
            }
            self.set(cx, y, c);
            if w == 2 {
                self.set(cx + 1, y, CONTINUATION);
            }
            cx += w;
        }
        cx
    }

    /// Write `text` centered within `rect`'s interior row `y`.
    fn print_centered(&mut self, inner: Rect, y: i32, text: &str) {
        let width = UnicodeWidthStr::width(text) as i32;
        let x = inner.x + ((inner.width - width) / 2).max(0);
        self.print_text_clipped(x, y, text, inner.right());
    }

    /// Rows of the grid with trailing spaces removed.
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| {
                let line: String = row.iter().filter(|c| **c != CONTINUATION).collect();
                line.trim_end().to_owned()
            })
            .collect()
    }
}

/// Rasterize `frame` onto a character grid.
pub fn paint(frame: &RenderFrame, scale: CellScale) -> Vec<String> {
    let cols = scale.col(frame.canvas.width.max(1) - 1) + 1;
    let rows = scale.row(frame.canvas.height.max(1) - 1) + 1;
    let mut canvas = TextCanvas::new(cols.max(0) as usize, rows.max(0) as usize);

    for c in &frame.connectors {
        let from = Point::new(scale.col(c.from.x), scale.row(c.from.y));
        // A downward tip touches the top edge of its box; keep it one row up.
        let to = match c.kind {
            ConnectorKind::Horizontal => Point::new(scale.col(c.to.x), scale.row(c.to.y)),
            ConnectorKind::Down => Point::new(scale.col(c.to.x), scale.row(c.to.y - 1)),
        };
        match c.kind {
            ConnectorKind::Horizontal => {
                canvas.draw_horizontal_line(from.x, from.y, to.x - from.x, '─');
                canvas.set(to.x, to.y, '▶');
            }
            ConnectorKind::Down => {
                // Elbow when the endpoints are not in the same column.
                let mid = from.y + (to.y - from.y) / 2;
                canvas.draw_vertical_line(from.x, from.y, mid - from.y + 1, '│');
                if from.x != to.x {
                    let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
                    canvas.draw_horizontal_line(lo, mid, hi - lo + 1, '─');
                }
                canvas.draw_vertical_line(to.x, mid, to.y - mid, '│');
                canvas.set(to.x, to.y, '▼');
            }
        }
    }

    if let Some(head) = &frame.sentinel {
        draw_box(&mut canvas, scale.cells(head.rect), VisualState::Sentinel, &head.text);
    }
    for e in &frame.elements {
        draw_box(&mut canvas, scale.cells(e.rect), e.state, &e.text);
    }
    for e in &frame.elements {
        if let Some(r) = e.label_rect {
            let cells = scale.cells(r);
            let row = Rect::new(cells.x, cells.bottom() - 1, cells.width, 1);
            canvas.print_centered(row, row.y, &e.label);
        }
    }
    canvas.to_lines()
}

fn draw_box(canvas: &mut TextCanvas, cells: Rect, state: VisualState, text: &str) {
    canvas.fill(cells, ' ');
    canvas.draw_border(cells, BorderChars::for_state(state));
    if cells.width > 2 && cells.height > 2 {
        let inner = Rect::new(cells.x + 1, cells.y + 1, cells.width - 2, cells.height - 2);
        canvas.print_centered(inner, inner.y + (inner.height - 1) / 2, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connector, ElementSprite, SentinelSprite};
    use crate::palette::Palette;
    use linviz_core::{Size, StructureKind};

    fn sprite(index: usize, rect: Rect, text: &str, state: VisualState) -> ElementSprite {
        ElementSprite {
            index,
            rect,
            base_rect: rect,
            text: text.into(),
            state,
            style: Palette::default().style(state),
            font_px: 10,
            label: index.to_string(),
            label_rect: Some(Rect::new(rect.x, rect.y - 18, rect.width, 15)),
        }
    }

    #[test]
    fn print_text_clips_wide_chars() {
        let mut canvas = TextCanvas::new(5, 1);
        let end = canvas.print_text_clipped(0, 0, "a中文", 4);
        assert_eq!(end, 3);
        assert_eq!(canvas.to_lines(), vec!["a中"]);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut canvas = TextCanvas::new(2, 2);
        canvas.set(-1, 0, 'x');
        canvas.set(2, 1, 'x');
        canvas.draw_horizontal_line(1, 1, 10, '-');
        assert_eq!(canvas.to_lines(), vec!["", " -"]);
    }

    #[test]
    fn paints_boxes_labels_and_text() {
        let mut frame = RenderFrame::empty(StructureKind::Slots, Size::new(80, 64));
        frame
            .elements
            .push(sprite(0, Rect::new(0, 32, 40, 32), "ab", VisualState::Normal));
        frame
            .elements
            .push(sprite(1, Rect::new(40, 32, 40, 32), "empty", VisualState::Empty));
        let lines = paint(&frame, CellScale::new(8, 16));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  0    1");
        assert_eq!(lines[2], "╭───╮┌┄┄┄┐");
        assert_eq!(lines[3], "╰───╯└┄┄┄┘");
    }

    #[test]
    fn paints_text_inside_tall_boxes() {
        let mut frame = RenderFrame::empty(StructureKind::Slots, Size::new(40, 48));
        let mut e = sprite(0, Rect::new(0, 0, 40, 48), "x", VisualState::Highlighted);
        e.label_rect = None;
        frame.elements.push(e);
        let lines = paint(&frame, CellScale::new(8, 16));
        assert_eq!(lines, vec!["┏━━━┓", "┃ x ┃", "┗━━━┛"]);
    }

    #[test]
    fn paints_chain_arrows() {
        let mut frame = RenderFrame::empty(StructureKind::Chain, Size::new(96, 48));
        frame.sentinel = Some(SentinelSprite {
            rect: Rect::new(0, 0, 24, 48),
            text: "head".into(),
            style: Palette::default().sentinel,
            font_px: 8,
        });
        let mut node = sprite(0, Rect::new(64, 0, 24, 48), "a", VisualState::Normal);
        node.label_rect = None;
        frame.elements.push(node);
        frame
            .connectors
            .push(Connector::horizontal(Point::new(24, 24), Point::new(56, 24)));
        let lines = paint(&frame, CellScale::new(8, 16));
        assert_eq!(lines[1], "║h║────▶│a│");
    }
}
