// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Origin, SlidingWindowLayout};
use crate::document::ContentChange;

impl<L> SlidingWindowLayout<L> {
    /// The origin after scrolling by `delta` pixels (positive scrolls down).
    ///
    /// The result never scrolls above the top padding of the first paragraph,
    /// and never lifts the bottom padding of the last paragraph above the
    /// viewport bottom. Returns `None` when the document fits in the viewport or
    /// when the origin would not change.
    ///
    /// `delta` should stay within the realized window; larger jumps are clamped
    /// to its edges.
    pub fn compute_origin(&self, delta: f64) -> Option<Origin> {
        let first = self.cells.first()?;
        let last = self.cells.last()?;
        let viewport_height = self.params.viewport_height;
        if self.estimated_extent() <= viewport_height {
            return None;
        }

        let top = if first.index == 0 {
            first.y - self.params.padding.top
        } else {
            first.y
        };
        let mut target = delta;
        if last.index + 1 == self.paragraph_count {
            let bottom = last.bottom() + self.params.padding.bottom;
            target = target.min(bottom - viewport_height);
        } else {
            target = target.min(last.bottom());
        }
        target = target.max(top);

        let cell = match self.cell_at_y(target) {
            Some(cell) => cell,
            None if target < first.y => first,
            None => last,
        };
        let origin = Origin::new(cell.index, target - cell.y);
        (origin != self.origin).then_some(origin)
    }
}

/// Adjusts an origin for a content change, so that the viewport keeps showing
/// the same text where possible.
///
/// If the origin's paragraph was removed or merged by the edit, the origin
/// moves to the top of the edit's first paragraph. If the edit lies entirely
/// above the origin, the origin index shifts by the number of paragraphs added
/// or removed.
pub fn origin_after_change(origin: Origin, change: &ContentChange) -> Origin {
    if !change.is_edit() {
        return origin;
    }
    let start = change.start.paragraph();
    let end = change.end.paragraph();
    if origin.index > start && origin.index <= end {
        Origin::new(start, 0.0)
    } else if origin.index > end {
        let index = origin
            .index
            .checked_add_signed(change.paragraph_delta())
            .unwrap_or(0);
        Origin::new(index, origin.offset)
    } else {
        origin
    }
}
