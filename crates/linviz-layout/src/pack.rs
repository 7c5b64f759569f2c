#![forbid(unsafe_code)]

use linviz_core::{KindCaps, Point, Size};

use crate::config::PackerConfig;
use crate::frame::{LayoutFrame, PackStrategy};

/// One accepted point of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    width: i32,
    height: i32,
    spacing: i32,
    connector: i32,
    columns: usize,
}

impl Candidate {
    /// Horizontal advance from one column to the next.
    fn unit(&self) -> i32 {
        self.width + self.connector + self.spacing
    }
}

/// Pack `count` elements onto a `canvas`.
///
/// Returns `None` when there is nothing to lay out or the canvas has no area
/// yet; callers keep whatever frame they had (see [`crate::Packer`]).
pub fn pack(canvas: Size, count: usize, config: &PackerConfig) -> Option<LayoutFrame> {
    if canvas.is_degenerate() || count == 0 {
        linviz_core::trace!(?canvas, count, "pack deferred");
        return None;
    }
    let span = linviz_core::debug_span!("pack", kind = %config.kind, count);
    let _guard = span.enter();

    // Margins give way on canvases narrower than twice the margin so that the
    // available area never collapses below one unit.
    let margin_x = config.margin_x.clamp(0, (canvas.width - 1) / 2);
    let margin_y = config.margin_y.clamp(0, (canvas.height - 1) / 2);
    let available = Size::new(canvas.width - 2 * margin_x, canvas.height - 2 * margin_y);

    let (candidate, strategy) = match search(available, count, config) {
        Some(found) => (found, PackStrategy::Searched),
        None => {
            let fallback = fallback(available, config);
            linviz_core::debug!(
                width = fallback.width,
                height = fallback.height,
                columns = fallback.columns,
                "no candidate qualified, using fallback"
            );
            (fallback, PackStrategy::Fallback)
        }
    };

    let columns = candidate.columns;
    let rows = count.div_ceil(columns);
    let unit = candidate.unit();
    let block_width = columns as i32 * unit - candidate.spacing;
    let start_x = margin_x + ((available.width - block_width) / 2).max(0);
    let row_advance = candidate.height + config.row_gap;

    let (start_y, sentinel) = if config.kind.caps().contains(KindCaps::SENTINEL) {
        let head = Point::new(margin_x, margin_y);
        (margin_y + candidate.height + config.sentinel_gap, Some(head))
    } else {
        let block_height = rows as i32 * candidate.height + (rows as i32 - 1) * config.row_gap;
        (margin_y + ((available.height - block_height) / 2).max(0), None)
    };

    let positions = (0..count)
        .map(|i| {
            let row = (i / columns) as i32;
            let col = (i % columns) as i32;
            Point::new(start_x + col * unit, start_y + row * row_advance)
        })
        .collect();

    linviz_core::debug!(
        width = candidate.width,
        height = candidate.height,
        spacing = candidate.spacing,
        connector = candidate.connector,
        columns,
        rows,
        "packed"
    );

    Some(LayoutFrame {
        kind: config.kind,
        canvas,
        element: Size::new(candidate.width, candidate.height),
        spacing: candidate.spacing,
        connector: candidate.connector,
        columns,
        rows,
        row_gap: config.row_gap,
        positions,
        sentinel,
        strategy,
    })
}

/// First `(width, connector, spacing)` in search order whose derived height
/// falls inside the configured band with at least two columns.
///
/// A band hit that fits only one column ends the spacing sweep for that
/// width and connector; wider spacings cannot add columns back.
fn search(available: Size, count: usize, config: &PackerConfig) -> Option<Candidate> {
    let connectors = config.connector_candidates();
    for width in config.width_candidates() {
        for &connector in &connectors {
            for spacing in config.spacing_candidates() {
                let unit = width + connector + spacing;
                if unit <= 0 {
                    continue;
                }
                let fit = (available.width + spacing) / unit;
                let columns = fit.max(1) as usize;
                let rows = count.div_ceil(columns);
                let height =
                    (available.height - (rows as i32 - 1) * config.row_gap) / rows as i32;
                if !(config.min_height..=config.max_height).contains(&height) {
                    continue;
                }
                if fit < 2 {
                    linviz_core::trace!(width, connector, spacing, fit, "single column rejected");
                    break;
                }
                return Some(Candidate {
                    width,
                    height,
                    spacing,
                    connector,
                    columns,
                });
            }
        }
    }
    None
}

/// Minimum-size arrangement used when the search finds nothing.
fn fallback(available: Size, config: &PackerConfig) -> Candidate {
    let spacing = config.min_spacing.max(0);
    let connector = config.min_connector().max(0);
    let preferred = if config.kind.caps().contains(KindCaps::CONNECTORS) {
        (available.width - connector - spacing) / 2
    } else {
        available.width - spacing
    };
    let width = preferred
        .min(config.max_width)
        .max(1)
        .min(available.width.max(1));
    let height = config.max_height.min(available.height).max(1);
    let mut candidate = Candidate {
        width,
        height,
        spacing,
        connector,
        columns: 1,
    };
    candidate.columns = ((available.width + spacing) / candidate.unit()).max(1) as usize;
    candidate
}
