// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtualized vertical layout over a paragraph sequence.
//!
//! A [`SlidingWindowLayout`] realizes only the paragraphs around the viewport:
//! the visible ones plus a margin of [`LayoutParams::window_extent`] paragraphs
//! on each side. Everything outside the window is estimated from the average
//! height of the realized cells, so the cost of a rebuild depends on the window
//! size and never on the document size.
//!
//! Layouts are immutable snapshots. When the viewport, the origin or the
//! content changes, build a new one; [`SlidingWindowLayout::is_valid`] tells
//! whether a layout still matches the current parameters.

use alloc::vec::Vec;

use peniko::kurbo::Point;

use crate::TextPos;
use crate::document::Document;
use crate::line_box::{LineBox, LineBoxFactory};

mod cell;
mod origin;

pub use cell::RealizedCell;
pub use origin::origin_after_change;

/// Space around the text inside the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Insets {
    /// Space above the first paragraph.
    pub top: f64,
    /// Space right of the text.
    pub right: f64,
    /// Space below the last paragraph.
    pub bottom: f64,
    /// Space left of the text.
    pub left: f64,
}

impl Insets {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same padding on every side.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// The scroll position: a paragraph and the distance from its top to the top of the viewport.
///
/// At the top of the document the origin is `(0, -padding.top)`, leaving the
/// top padding visible.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Origin {
    /// Paragraph at the top of the viewport.
    pub index: usize,
    /// Offset of the viewport top from that paragraph's top, in pixels.
    pub offset: f64,
}

impl Origin {
    /// Creates an origin.
    pub const fn new(index: usize, offset: f64) -> Self {
        Self { index, offset }
    }
}

/// Inputs that determine a layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutParams {
    /// Viewport width.
    pub viewport_width: f64,
    /// Viewport height.
    pub viewport_height: f64,
    /// Extra space below every paragraph.
    pub line_spacing: f64,
    /// Padding between the viewport and the text.
    pub padding: Insets,
    /// Wrap paragraphs at the available width.
    pub wrap: bool,
    /// Paragraphs realized beyond each edge of the viewport.
    pub window_extent: usize,
}

impl LayoutParams {
    /// The width paragraphs wrap at, if wrapping is enabled.
    pub fn wrap_width(&self) -> Option<f64> {
        let width = self.viewport_width - self.padding.left - self.padding.right;
        self.wrap.then(|| width.max(1.0))
    }
}

/// A contiguous window of realized paragraphs around the viewport.
#[derive(Clone, Debug)]
pub struct SlidingWindowLayout<L> {
    cells: Vec<RealizedCell<L>>,
    params: LayoutParams,
    origin: Origin,
    paragraph_count: usize,
    /// Position of the origin paragraph within `cells`.
    origin_slot: usize,
    /// Cells from `origin_slot` that intersect the viewport.
    visible_count: usize,
    top_count: usize,
    top_height: f64,
    bottom_count: usize,
    bottom_height: f64,
}

impl<L: LineBox> SlidingWindowLayout<L> {
    /// A layout with no realized cells.
    pub fn empty(params: LayoutParams, origin: Origin, paragraph_count: usize) -> Self {
        Self {
            cells: Vec::new(),
            params,
            origin,
            paragraph_count,
            origin_slot: 0,
            visible_count: 0,
            top_count: 0,
            top_height: 0.0,
            bottom_count: 0,
            bottom_height: 0.0,
        }
    }

    /// Realizes the paragraphs around `origin`.
    ///
    /// Lays out paragraphs downward from the origin until the viewport is full,
    /// then `window_extent` more; then the same number upward, plus whatever the
    /// lower margin could not use because the document ended.
    pub fn build<D, F>(document: &D, factory: &mut F, params: LayoutParams, origin: Origin) -> Self
    where
        D: Document + ?Sized,
        F: LineBoxFactory<LineBox = L>,
    {
        let count = document.size();
        let Some(last_index) = count.checked_sub(1) else {
            return Self::empty(params, Origin::default(), 0);
        };
        let origin = Origin::new(origin.index.min(last_index), origin.offset);
        let wrap_width = params.wrap_width();
        let extent = params.window_extent;
        let spacing = params.line_spacing;

        let mut below: Vec<RealizedCell<L>> = Vec::new();
        let mut y = -origin.offset;
        let mut visible_count = None;
        for index in origin.index..count {
            let cell = Self::realize(document, factory, index, wrap_width, spacing, y);
            y = cell.bottom();
            below.push(cell);
            match visible_count {
                None if y >= params.viewport_height => visible_count = Some(below.len()),
                Some(visible) if below.len() >= visible + extent => break,
                _ => {}
            }
        }
        let visible_count = visible_count.unwrap_or(below.len());
        let top_extent = extent + (visible_count + extent).saturating_sub(below.len());

        let mut above: Vec<RealizedCell<L>> = Vec::new();
        let mut y = -origin.offset;
        for index in (origin.index.saturating_sub(top_extent)..origin.index).rev() {
            let mut cell = Self::realize(document, factory, index, wrap_width, spacing, 0.0);
            y -= cell.height;
            cell.y = y;
            above.push(cell);
        }
        above.reverse();

        let top_count = above.len();
        let top_height = above.iter().map(|c| c.height).sum();
        let bottom_count = below.len();
        let bottom_height = below.iter().map(|c| c.height).sum();
        let mut cells = above;
        cells.append(&mut below);

        let layout = Self {
            cells,
            params,
            origin,
            paragraph_count: count,
            origin_slot: top_count,
            visible_count,
            top_count,
            top_height,
            bottom_count,
            bottom_height,
        };
        tracing::debug!(
            origin = ?layout.origin,
            realized = layout.cells.len(),
            visible = layout.visible_count,
            estimated_extent = layout.estimated_extent(),
            "rebuilt sliding window layout"
        );
        layout
    }

    fn realize<D, F>(
        document: &D,
        factory: &mut F,
        index: usize,
        wrap_width: Option<f64>,
        line_spacing: f64,
        y: f64,
    ) -> RealizedCell<L>
    where
        D: Document + ?Sized,
        F: LineBoxFactory<LineBox = L>,
    {
        let text = document.plain_text(index);
        let line_box = factory.create(index, &text, wrap_width);
        let height = line_box.height() + line_spacing;
        RealizedCell {
            index,
            line_box,
            height,
            y,
        }
    }
}

impl<L> SlidingWindowLayout<L> {
    /// Returns `true` if the layout was built with these parameters and origin paragraph.
    ///
    /// A layout that is not valid must be rebuilt rather than adjusted.
    pub fn is_valid(&self, params: &LayoutParams, origin_index: usize) -> bool {
        self.params == *params && self.origin.index == origin_index
    }

    /// The parameters the layout was built with.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// The origin the layout was built from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Number of paragraphs in the document when the layout was built.
    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    /// Returns `true` if no paragraph is realized.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The realized cells, in paragraph order.
    pub fn cells(&self) -> &[RealizedCell<L>] {
        &self.cells
    }

    /// The realized cell for paragraph `index`, if it is inside the window.
    pub fn cell(&self, index: usize) -> Option<&RealizedCell<L>> {
        let first = self.cells.first()?.index;
        self.cells.get(index.checked_sub(first)?)
    }

    /// The cells that intersect the viewport.
    pub fn visible_cells(&self) -> &[RealizedCell<L>] {
        &self.cells[self.origin_slot..self.origin_slot + self.visible_count]
    }

    /// Index of the first paragraph intersecting the viewport.
    pub fn first_visible_index(&self) -> Option<usize> {
        self.visible_cells().first().map(RealizedCell::index)
    }

    /// Index of the last paragraph intersecting the viewport.
    pub fn last_visible_index(&self) -> Option<usize> {
        self.visible_cells().last().map(RealizedCell::index)
    }

    /// Realized paragraphs above the origin paragraph.
    pub fn top_margin_count(&self) -> usize {
        self.top_count
    }

    /// Realized paragraphs from the origin paragraph down.
    pub fn bottom_margin_count(&self) -> usize {
        self.bottom_count
    }

    /// Total height of the realized paragraphs.
    pub fn realized_height(&self) -> f64 {
        self.top_height + self.bottom_height
    }

    /// Average height of a realized paragraph, or zero if none is realized.
    pub fn average_height(&self) -> f64 {
        match self.top_count + self.bottom_count {
            0 => 0.0,
            n => (self.top_height + self.bottom_height) / n as f64,
        }
    }

    /// Estimated height of the whole document, including padding.
    ///
    /// Paragraphs outside the window are assumed to have the average realized
    /// height. The value is an approximation for large documents.
    pub fn estimated_extent(&self) -> f64 {
        let unrealized = self.paragraph_count - self.cells.len();
        unrealized as f64 * self.average_height()
            + self.realized_height()
            + self.params.padding.top
            + self.params.padding.bottom
    }

    /// Estimated distance from the document top to the viewport top, for a vertical scroll bar.
    pub fn scroll_value(&self) -> f64 {
        let first = self.cells.first().map_or(0, RealizedCell::index);
        first as f64 * self.average_height()
            + self.top_height
            + self.origin.offset
            + self.params.padding.top
    }

    /// Fraction of the document covered by the viewport, in `0.0..=1.0`.
    pub fn visible_fraction(&self) -> f64 {
        let extent = self.estimated_extent();
        if extent <= 0.0 {
            1.0
        } else {
            (self.params.viewport_height / extent).min(1.0)
        }
    }

    /// The realized cell containing `y`, relative to the viewport top.
    ///
    /// A `y` exactly at the bottom of the last paragraph of the document
    /// resolves to that paragraph.
    pub fn cell_at_y(&self, y: f64) -> Option<&RealizedCell<L>> {
        let first = self.cells.first()?;
        if y < first.y {
            return None;
        }
        let slot = self.cells.partition_point(|c| c.bottom() <= y);
        if let Some(cell) = self.cells.get(slot) {
            return Some(cell);
        }
        let last = self.cells.last()?;
        let at_document_end = last.index + 1 == self.paragraph_count && y <= last.bottom();
        at_document_end.then_some(last)
    }
}

impl<L: LineBox> SlidingWindowLayout<L> {
    /// The document position at `point`.
    ///
    /// `point.x` is measured from the text's left edge and `point.y` from the
    /// viewport top. Returns `None` outside the realized window.
    pub fn text_pos_at(&self, point: Point) -> Option<TextPos> {
        let cell = self.cell_at_y(point.y)?;
        let local = Point::new(point.x, point.y - cell.y);
        let offset = cell.line_box.offset_at_point(local);
        Some(TextPos::new(cell.index, offset))
    }
}
