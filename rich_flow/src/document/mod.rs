// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document interface consumed by the editor.
//!
//! A [`Document`] is an ordered collection of paragraphs. All structural edits
//! go through [`Document::replace`], which updates every live [`Marker`] before
//! it returns and queues a [`ContentChange`] for observers to drain with
//! [`Document::take_changes`].

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::DocumentError;
use crate::{Marker, TextPos};

pub mod plain;

pub use plain::PlainDocument;

/// A clipboard and import/export data format, identified by a MIME-like name.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct DataFormat(&'static str);

impl DataFormat {
    /// UTF-8 text with paragraphs separated by `\n`.
    pub const PLAIN_TEXT: Self = Self("text/plain");
    /// Paragraph text plus style runs, encoded as JSON.
    pub const RICH_TEXT: Self = Self("application/x-rich-flow+json");

    /// Creates a format with the given identifier.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The format identifier.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Character-level style attributes.
///
/// `None` leaves the attribute unspecified, so that layered attributes can be
/// combined with [`StyleAttributes::merge`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    /// Bold weight.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Underline decoration.
    pub underline: Option<bool>,
    /// Strikethrough decoration.
    pub strikethrough: Option<bool>,
    /// Font size in points.
    pub font_size: Option<f32>,
    /// Font family name.
    pub font_family: Option<String>,
    /// Text color as RGBA8.
    pub text_color: Option<[u8; 4]>,
}

impl StyleAttributes {
    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overrides attributes in `self` with those set in `other`.
    pub fn merge(&mut self, other: &Self) {
        fn take<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }
        take(&mut self.bold, &other.bold);
        take(&mut self.italic, &other.italic);
        take(&mut self.underline, &other.underline);
        take(&mut self.strikethrough, &other.strikethrough);
        take(&mut self.font_size, &other.font_size);
        take(&mut self.font_family, &other.font_family);
        take(&mut self.text_color, &other.text_color);
    }
}

/// Whether a change altered text or only styles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Text was replaced; positions after the range may have moved.
    Edit,
    /// Only attributes changed; no position moved.
    Style,
}

/// Notification of a completed document change.
///
/// `start..end` is the affected range in pre-edit coordinates. For edits, the
/// inserted content is described by three counts:
/// - `added_top`: bytes inserted into the paragraph containing `start`;
/// - `paragraphs_inserted`: paragraph breaks inserted;
/// - `added_bottom`: bytes inserted into the last inserted paragraph (zero when
///   no break was inserted).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContentChange {
    /// What kind of change this is.
    pub kind: ChangeKind,
    /// Start of the affected range.
    pub start: TextPos,
    /// End of the affected range, before the edit.
    pub end: TextPos,
    /// Bytes inserted on the first affected paragraph.
    pub added_top: usize,
    /// Paragraph breaks inserted.
    pub paragraphs_inserted: usize,
    /// Bytes inserted on the last inserted paragraph.
    pub added_bottom: usize,
}

impl ContentChange {
    /// Describes replacing `start..end` with `text`.
    pub fn edit(start: TextPos, end: TextPos, text: &str) -> Self {
        let (added_top, paragraphs_inserted, added_bottom) = match text.rfind('\n') {
            None => (text.len(), 0, 0),
            Some(last) => {
                let first = text.find('\n').unwrap_or(last);
                let breaks = text.bytes().filter(|b| *b == b'\n').count();
                (first, breaks, text.len() - last - 1)
            }
        };
        Self {
            kind: ChangeKind::Edit,
            start,
            end,
            added_top,
            paragraphs_inserted,
            added_bottom,
        }
    }

    /// Describes a style change over `start..end`.
    pub fn style(start: TextPos, end: TextPos) -> Self {
        Self {
            kind: ChangeKind::Style,
            start,
            end,
            added_top: 0,
            paragraphs_inserted: 0,
            added_bottom: 0,
        }
    }

    /// Returns `true` for text edits.
    pub fn is_edit(&self) -> bool {
        self.kind == ChangeKind::Edit
    }

    /// Net number of paragraphs added by the change.
    pub fn paragraph_delta(&self) -> isize {
        self.paragraphs_inserted as isize
            - (self.end.paragraph() - self.start.paragraph()) as isize
    }
}

/// An ordered collection of paragraphs that an editor can read and modify.
///
/// Positions passed in must address existing paragraphs and fall on character
/// boundaries; implementations reject anything else with a [`DocumentError`].
pub trait Document {
    /// Number of paragraphs.
    fn size(&self) -> usize;

    /// The plain text of one paragraph, without a trailing line break.
    fn plain_text(&self, index: usize) -> Cow<'_, str>;

    /// Length in bytes of one paragraph's plain text.
    fn paragraph_len(&self, index: usize) -> usize {
        self.plain_text(index).len()
    }

    /// Whether [`replace`](Self::replace) and friends accept edits.
    fn is_writable(&self) -> bool;

    /// Replaces `start..end` with `text`, where `\n` starts a new paragraph.
    ///
    /// Every live marker is updated before this returns. Returns the position
    /// just past the inserted text.
    fn replace(
        &mut self,
        start: TextPos,
        end: TextPos,
        text: &str,
    ) -> Result<TextPos, DocumentError>;

    /// Applies `attrs` on top of the existing styles in `start..end`.
    fn apply_style(
        &mut self,
        start: TextPos,
        end: TextPos,
        attrs: &StyleAttributes,
    ) -> Result<(), DocumentError>;

    /// Creates a marker at `pos` that follows subsequent edits.
    fn create_marker(&mut self, pos: TextPos) -> Marker;

    /// Formats [`export`](Self::export) can produce, most preferred first.
    fn supported_export_formats(&self) -> &[DataFormat];

    /// Formats [`import`](Self::import) accepts, most preferred first.
    fn supported_import_formats(&self) -> &[DataFormat];

    /// Serializes `start..end` in `format`.
    fn export(
        &self,
        start: TextPos,
        end: TextPos,
        format: DataFormat,
    ) -> Result<Vec<u8>, DocumentError>;

    /// Replaces `start..end` with content decoded from `data`.
    ///
    /// Returns the position just past the inserted content.
    fn import(
        &mut self,
        start: TextPos,
        end: TextPos,
        format: DataFormat,
        data: &[u8],
    ) -> Result<TextPos, DocumentError>;

    /// Drains change notifications queued since the last call, oldest first.
    fn take_changes(&mut self) -> Vec<ContentChange>;

    /// Reverts the most recent edit, returning the range of restored content.
    fn undo(&mut self) -> Option<(TextPos, TextPos)> {
        None
    }

    /// Reapplies the most recently undone edit, returning the range of restored content.
    fn redo(&mut self) -> Option<(TextPos, TextPos)> {
        None
    }

    /// The position after the last character of the last paragraph.
    fn end(&self) -> TextPos {
        match self.size() {
            0 => TextPos::ZERO,
            n => TextPos::new(n - 1, self.paragraph_len(n - 1)),
        }
    }

    /// The nearest existing position to `pos`.
    fn clamp(&self, pos: TextPos) -> TextPos {
        let size = self.size();
        if size == 0 {
            return TextPos::ZERO;
        }
        if pos.paragraph() >= size {
            return self.end();
        }
        let len = self.paragraph_len(pos.paragraph());
        pos.with_offset(pos.offset().min(len))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentChange, StyleAttributes};
    use crate::TextPos;

    #[test]
    fn content_change_counts() {
        let change = ContentChange::edit(TextPos::new(1, 2), TextPos::new(3, 0), "ab\n\ncde");
        assert_eq!(change.added_top, 2);
        assert_eq!(change.paragraphs_inserted, 2);
        assert_eq!(change.added_bottom, 3);
        assert_eq!(change.paragraph_delta(), 0);

        let change = ContentChange::edit(TextPos::new(4, 0), TextPos::new(6, 1), "");
        assert_eq!(change.paragraph_delta(), -2);
        assert!(change.is_edit());
    }

    #[test]
    fn style_merge_overrides_set_fields() {
        let mut base = StyleAttributes {
            bold: Some(true),
            font_size: Some(12.0),
            ..StyleAttributes::default()
        };
        base.merge(&StyleAttributes {
            font_size: Some(18.0),
            italic: Some(true),
            ..StyleAttributes::default()
        });
        assert_eq!(base.bold, Some(true));
        assert_eq!(base.italic, Some(true));
        assert_eq!(base.font_size, Some(18.0));
        assert!(!base.is_empty());
        assert!(StyleAttributes::default().is_empty());
    }
}
