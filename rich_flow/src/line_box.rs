// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendered form of a single paragraph.
//!
//! Shaping, glyph rendering and hit-testing inside a paragraph belong to the
//! host. The editor only needs the few queries on [`LineBox`], and creates
//! line boxes through a [`LineBoxFactory`] when a paragraph enters the
//! realized window.
//!
//! [`FixedPitchLineBox`] is a self-contained implementation for monospace text,
//! useful for terminals, tests and headless hosts.

use alloc::vec::Vec;

use peniko::kurbo::{BezPath, Point, Rect, Shape};

/// The laid-out form of one paragraph, in cell-local coordinates.
///
/// The origin is the top-left corner of the paragraph. Offsets are byte offsets
/// into the paragraph's plain text.
pub trait LineBox {
    /// The caret outline at `offset`.
    ///
    /// `leading` selects the leading edge of the character at `offset`, which
    /// matters where a wrapped paragraph continues on the next row.
    fn caret_shape(&self, offset: usize, leading: bool) -> BezPath;

    /// The outline covering `start..end`, one rectangle per visual row.
    fn range_shape(&self, start: usize, end: usize) -> BezPath;

    /// Length of the rendered text in bytes.
    fn text_len(&self) -> usize;

    /// Height of the paragraph at the width it was laid out for.
    fn height(&self) -> f64;

    /// The offset closest to a cell-local point.
    fn offset_at_point(&self, point: Point) -> usize;

    /// Top and bottom of the visual row holding the caret at `offset`.
    ///
    /// Defaults to the whole box, which suits line boxes that never wrap.
    fn line_extent(&self, _offset: usize, _leading: bool) -> (f64, f64) {
        (0.0, self.height())
    }
}

/// Creates line boxes for paragraphs as they are realized.
pub trait LineBoxFactory {
    /// The line box type produced.
    type LineBox: LineBox;

    /// Lays out `text`, the content of paragraph `index`.
    ///
    /// With `wrap_width` set, rows wrap at that width; otherwise the paragraph is
    /// a single row.
    fn create(&mut self, index: usize, text: &str, wrap_width: Option<f64>) -> Self::LineBox;
}

/// A monospace line box: every character advances by the same width.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPitchLineBox {
    /// Byte offset of every character start, followed by the text length.
    boundaries: Vec<usize>,
    /// Characters per row.
    columns: usize,
    char_width: f64,
    line_height: f64,
}

impl FixedPitchLineBox {
    /// Lays out `text` with `columns` characters per row.
    pub fn new(text: &str, columns: usize, char_width: f64, line_height: f64) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self {
            boundaries,
            columns: columns.max(1),
            char_width,
            line_height,
        }
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Number of visual rows, at least one.
    pub fn rows(&self) -> usize {
        self.char_count().div_ceil(self.columns).max(1)
    }

    fn char_index(&self, offset: usize) -> usize {
        self.boundaries
            .partition_point(|b| *b < offset)
            .min(self.char_count())
    }

    /// Row and column of the caret before character `index`.
    fn row_col(&self, index: usize, leading: bool) -> (usize, usize) {
        let wraps_here = index > 0 && index % self.columns == 0;
        if wraps_here && (!leading || index == self.char_count()) {
            (index / self.columns - 1, self.columns)
        } else {
            (index / self.columns, index % self.columns)
        }
    }

    fn row_rect(&self, row: usize, col0: usize, col1: usize) -> Rect {
        Rect::new(
            col0 as f64 * self.char_width,
            row as f64 * self.line_height,
            col1 as f64 * self.char_width,
            (row + 1) as f64 * self.line_height,
        )
    }
}

impl LineBox for FixedPitchLineBox {
    fn caret_shape(&self, offset: usize, leading: bool) -> BezPath {
        let (row, col) = self.row_col(self.char_index(offset), leading);
        let x = col as f64 * self.char_width;
        let mut path = BezPath::new();
        path.move_to((x, row as f64 * self.line_height));
        path.line_to((x, (row + 1) as f64 * self.line_height));
        path
    }

    fn range_shape(&self, start: usize, end: usize) -> BezPath {
        let mut path = BezPath::new();
        let (first, last) = (self.char_index(start), self.char_index(end));
        if first >= last {
            return path;
        }
        let first_row = first / self.columns;
        let last_row = (last - 1) / self.columns;
        for row in first_row..=last_row {
            let row_start = row * self.columns;
            let col0 = first.saturating_sub(row_start);
            let col1 = (last - row_start).min(self.columns);
            let rect = self.row_rect(row, col0, col1);
            path.extend(rect.path_elements(0.1));
        }
        path
    }

    fn text_len(&self) -> usize {
        self.boundaries[self.char_count()]
    }

    fn height(&self) -> f64 {
        self.rows() as f64 * self.line_height
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "row and column indices are small, non-negative values after clamping"
    )]
    fn offset_at_point(&self, point: Point) -> usize {
        let row = (point.y / self.line_height).floor().max(0.0) as usize;
        let row = row.min(self.rows() - 1);
        let row_start = row * self.columns;
        let row_len = (self.char_count() - row_start.min(self.char_count())).min(self.columns);
        let col = (point.x / self.char_width).round().max(0.0) as usize;
        let col = col.min(row_len);
        self.boundaries[(row_start + col).min(self.char_count())]
    }

    fn line_extent(&self, offset: usize, leading: bool) -> (f64, f64) {
        let (row, _) = self.row_col(self.char_index(offset), leading);
        let rect = self.row_rect(row, 0, 0);
        (rect.y0, rect.y1)
    }
}

/// Creates [`FixedPitchLineBox`]es with a fixed character cell size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedPitchFactory {
    /// Advance of every character.
    pub char_width: f64,
    /// Height of every row.
    pub line_height: f64,
}

impl FixedPitchFactory {
    /// Creates a factory for `char_width` × `line_height` character cells.
    pub fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl LineBoxFactory for FixedPitchFactory {
    type LineBox = FixedPitchLineBox;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "column counts are clamped to at least one and far below usize::MAX"
    )]
    fn create(&mut self, _index: usize, text: &str, wrap_width: Option<f64>) -> FixedPitchLineBox {
        let columns = match wrap_width {
            Some(width) => (width / self.char_width).floor().max(1.0) as usize,
            None => usize::MAX,
        };
        FixedPitchLineBox::new(text, columns, self.char_width, self.line_height)
    }
}
