// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value positions within a paragraph-structured document.

use core::fmt;

/// A location in a document, expressed as a paragraph index and a byte offset
/// into that paragraph's plain text.
///
/// The offset is a UTF-8 byte index and is expected to fall on a `char`
/// boundary. Offsets carry no meaning beyond their own paragraph; ranges that
/// span paragraphs are expressed as pairs of positions.
///
/// Positions are ordered lexicographically: first by paragraph, then by offset.
///
/// A `TextPos` is a snapshot. It does not follow the document through edits;
/// use a [`Marker`](crate::Marker) for that.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TextPos {
    // Field order matters: the derived `Ord` compares `paragraph` first.
    paragraph: usize,
    offset: usize,
}

impl TextPos {
    /// The start of the document.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a position at `offset` bytes into paragraph `paragraph`.
    pub const fn new(paragraph: usize, offset: usize) -> Self {
        Self { paragraph, offset }
    }

    /// The paragraph index.
    pub const fn paragraph(self) -> usize {
        self.paragraph
    }

    /// The byte offset within the paragraph.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Returns a position in the same paragraph at a different offset.
    #[must_use]
    pub const fn with_offset(self, offset: usize) -> Self {
        Self::new(self.paragraph, offset)
    }

    /// Returns `true` if this position is at the start of its paragraph.
    pub const fn is_paragraph_start(self) -> bool {
        self.offset == 0
    }
}

impl fmt::Debug for TextPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextPos({}:{})", self.paragraph, self.offset)
    }
}

impl fmt::Display for TextPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.paragraph, self.offset)
    }
}

impl From<(usize, usize)> for TextPos {
    fn from((paragraph, offset): (usize, usize)) -> Self {
        Self::new(paragraph, offset)
    }
}
