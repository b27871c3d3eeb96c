// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection segments built from markers, and the model that owns them.

use crate::error::SelectionError;
use crate::{Marker, TextPos};

/// A selected range of a document, bounded by two markers.
///
/// `min` never follows `max`. One end is the anchor (where the selection
/// started) and the other is the caret (where it is extended); `caret_at_min`
/// records which is which.
///
/// Segments are immutable. Transformations like [`extend`](Self::extend)
/// return a new segment for the owning [`SelectionModel`] to swap in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSegment {
    min: Marker,
    max: Marker,
    caret_at_min: bool,
}

impl SelectionSegment {
    /// Creates a segment from already ordered ends.
    ///
    /// Fails if `min` is after `max`.
    pub fn from_ordered(
        min: Marker,
        max: Marker,
        caret_at_min: bool,
    ) -> Result<Self, SelectionError> {
        if min > max {
            return Err(SelectionError::Unordered {
                min: min.position(),
                max: max.position(),
            });
        }
        Ok(Self {
            min,
            max,
            caret_at_min,
        })
    }

    /// Creates a segment from an anchor and a caret in either order.
    pub fn from_anchor_caret(anchor: Marker, caret: Marker) -> Self {
        if caret < anchor {
            Self {
                min: caret,
                max: anchor,
                caret_at_min: true,
            }
        } else {
            Self {
                min: anchor,
                max: caret,
                caret_at_min: false,
            }
        }
    }

    /// Creates a collapsed segment with the caret and anchor on one marker.
    pub fn collapsed(marker: Marker) -> Self {
        Self {
            min: marker.clone(),
            max: marker,
            caret_at_min: false,
        }
    }

    /// Returns a segment with the same anchor and a new caret.
    #[must_use]
    pub fn extend(&self, caret: Marker) -> Self {
        Self::from_anchor_caret(self.anchor().clone(), caret)
    }

    /// The lower end.
    pub fn min(&self) -> &Marker {
        &self.min
    }

    /// The upper end.
    pub fn max(&self) -> &Marker {
        &self.max
    }

    /// The end the selection was started from.
    pub fn anchor(&self) -> &Marker {
        if self.caret_at_min {
            &self.max
        } else {
            &self.min
        }
    }

    /// The end that moves when the selection is extended.
    pub fn caret(&self) -> &Marker {
        if self.caret_at_min {
            &self.min
        } else {
            &self.max
        }
    }

    /// Whether the caret is the lower end.
    pub fn is_caret_at_min(&self) -> bool {
        self.caret_at_min
    }

    /// Returns `true` if both ends are at the same position.
    pub fn is_collapsed(&self) -> bool {
        self.min.position() == self.max.position()
    }

    /// Both ends as positions, lower first.
    pub fn range(&self) -> (TextPos, TextPos) {
        (self.min.position(), self.max.position())
    }

    /// Returns `true` if `min` is not after `max`.
    pub fn is_normalized(&self) -> bool {
        self.min <= self.max
    }

    /// Restores `min <= max` after the markers moved, keeping the anchor/caret roles.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.is_normalized() {
            self.clone()
        } else {
            Self {
                min: self.max.clone(),
                max: self.min.clone(),
                caret_at_min: !self.caret_at_min,
            }
        }
    }
}

/// Owns the current selection of an editor.
///
/// The model holds the only long-lived references to its markers: replacing the
/// selection drops the previous pair, which releases them from the document.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    segment: Option<SelectionSegment>,
}

impl SelectionModel {
    /// Creates a model with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current segment, if any.
    pub fn segment(&self) -> Option<&SelectionSegment> {
        self.segment.as_ref()
    }

    /// Replaces the selection.
    pub fn set(&mut self, segment: SelectionSegment) {
        self.segment = Some(segment);
    }

    /// Removes the selection.
    pub fn clear(&mut self) {
        self.segment = None;
    }

    /// The caret position, if there is a selection.
    pub fn caret(&self) -> Option<TextPos> {
        self.segment.as_ref().map(|s| s.caret().position())
    }

    /// The anchor position, if there is a selection.
    pub fn anchor(&self) -> Option<TextPos> {
        self.segment.as_ref().map(|s| s.anchor().position())
    }

    /// The selected range, lower end first, if there is a selection.
    pub fn range(&self) -> Option<(TextPos, TextPos)> {
        self.segment.as_ref().map(SelectionSegment::range)
    }

    /// Returns `true` if a non-empty range is selected.
    pub fn has_range(&self) -> bool {
        self.segment.as_ref().is_some_and(|s| !s.is_collapsed())
    }

    /// Re-establishes the ordering invariant after a document edit moved the markers.
    pub fn revalidate(&mut self) {
        if let Some(segment) = &self.segment {
            if !segment.is_normalized() {
                tracing::debug!(?segment, "renormalizing selection after edit");
                self.segment = Some(segment.normalized());
            }
        }
    }
}
