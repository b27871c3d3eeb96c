// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A paragraph currently realized by a [`SlidingWindowLayout`](super::SlidingWindowLayout).
///
/// `y` is the top of the cell relative to the top of the viewport; cells above
/// the viewport have negative offsets. The height includes line spacing and is
/// only meaningful for the width the layout was built with.
#[derive(Clone, Debug)]
pub struct RealizedCell<L> {
    pub(super) index: usize,
    pub(super) line_box: L,
    pub(super) height: f64,
    pub(super) y: f64,
}

impl<L> RealizedCell<L> {
    /// The paragraph index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The paragraph's line box.
    pub fn line_box(&self) -> &L {
        &self.line_box
    }

    /// Height of the cell, including line spacing.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Top of the cell relative to the viewport top.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Bottom of the cell relative to the viewport top.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if `y` falls within `y()..bottom()`.
    pub fn contains_y(&self, y: f64) -> bool {
        self.y <= y && y < self.bottom()
    }
}
