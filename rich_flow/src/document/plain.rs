// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Document`] backed by a vector of paragraph strings.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use super::{ContentChange, DataFormat, Document, StyleAttributes};
use crate::error::DocumentError;
use crate::marker::{MarkerRegistry, TextEdit};
use crate::{Marker, TextPos};

const DEFAULT_FORMATS: &[DataFormat] = &[DataFormat::RICH_TEXT, DataFormat::PLAIN_TEXT];

/// A style layer anchored by markers, so that it follows edits.
#[derive(Clone, Debug)]
struct StyleRun {
    start: Marker,
    end: Marker,
    attrs: StyleAttributes,
}

/// One undoable replacement: `removed` used to occupy `start..`, and
/// `inserted` now occupies `start..inserted_end`.
#[derive(Clone, Debug)]
struct UndoEntry {
    start: TextPos,
    removed: String,
    inserted: String,
    inserted_end: TextPos,
}

/// Serialized form of [`DataFormat::RICH_TEXT`].
///
/// Run positions are relative to the start of the exported range.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct RichPayload {
    paragraphs: Vec<String>,
    #[serde(default)]
    runs: Vec<RichRun>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct RichRun {
    start: TextPos,
    end: TextPos,
    attrs: StyleAttributes,
}

/// A simple writable document.
///
/// It always holds at least one (possibly empty) paragraph, keeps an undo
/// history of text edits, and supports [`DataFormat::RICH_TEXT`] and
/// [`DataFormat::PLAIN_TEXT`] for clipboard transfer.
#[derive(Debug)]
pub struct PlainDocument {
    paragraphs: Vec<String>,
    markers: MarkerRegistry,
    styles: Vec<StyleRun>,
    changes: Vec<ContentChange>,
    undo: Vec<UndoEntry>,
    redo: Vec<UndoEntry>,
    writable: bool,
    import_formats: Vec<DataFormat>,
    export_formats: Vec<DataFormat>,
}

impl Default for PlainDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainDocument {
    /// Creates a writable document with a single empty paragraph.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![String::new()],
            markers: MarkerRegistry::new(),
            styles: Vec::new(),
            changes: Vec::new(),
            undo: Vec::new(),
            redo: Vec::new(),
            writable: true,
            import_formats: DEFAULT_FORMATS.to_vec(),
            export_formats: DEFAULT_FORMATS.to_vec(),
        }
    }

    /// Creates a document from text, splitting paragraphs at `\n`.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.paragraphs = text.split('\n').map(ToString::to_string).collect();
        doc
    }

    /// Creates a document with one paragraph per item.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        doc.paragraphs = paragraphs.into_iter().map(Into::into).collect();
        if doc.paragraphs.is_empty() {
            doc.paragraphs.push(String::new());
        }
        doc
    }

    /// Enables or disables editing.
    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    /// Overrides the accepted import formats, most preferred first.
    pub fn set_import_formats(&mut self, formats: Vec<DataFormat>) {
        self.import_formats = formats;
    }

    /// Overrides the produced export formats, most preferred first.
    pub fn set_export_formats(&mut self, formats: Vec<DataFormat>) {
        self.export_formats = formats;
    }

    /// All paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// The paragraph strings.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Number of markers currently held by someone.
    pub fn live_markers(&self) -> usize {
        self.markers.live_count()
    }

    /// The combined style at `pos`, from every run covering it.
    pub fn style_at(&self, pos: TextPos) -> StyleAttributes {
        let mut attrs = StyleAttributes::default();
        for run in &self.styles {
            if run.start.position() <= pos && pos < run.end.position() {
                attrs.merge(&run.attrs);
            }
        }
        attrs
    }

    /// The text of `start..end`, with `\n` between paragraphs.
    pub fn text_range(&self, start: TextPos, end: TextPos) -> String {
        if start.paragraph() == end.paragraph() {
            return self.paragraphs[start.paragraph()][start.offset()..end.offset()].to_string();
        }
        let mut out = String::new();
        out.push_str(&self.paragraphs[start.paragraph()][start.offset()..]);
        for paragraph in &self.paragraphs[start.paragraph() + 1..end.paragraph()] {
            out.push('\n');
            out.push_str(paragraph);
        }
        out.push('\n');
        out.push_str(&self.paragraphs[end.paragraph()][..end.offset()]);
        out
    }

    fn check_pos(&self, pos: TextPos) -> Result<(), DocumentError> {
        let Some(paragraph) = self.paragraphs.get(pos.paragraph()) else {
            return Err(DocumentError::OutOfRange {
                pos,
                size: self.paragraphs.len(),
            });
        };
        if pos.offset() > paragraph.len() {
            return Err(DocumentError::OutOfRange {
                pos,
                size: self.paragraphs.len(),
            });
        }
        if !paragraph.is_char_boundary(pos.offset()) {
            return Err(DocumentError::NotOnCharBoundary { pos });
        }
        Ok(())
    }

    fn check_range(&self, start: TextPos, end: TextPos) -> Result<(), DocumentError> {
        self.check_pos(start)?;
        self.check_pos(end)?;
        if start > end {
            return Err(DocumentError::InvalidRange { start, end });
        }
        Ok(())
    }

    /// Splices `text` into `start..end`, moves markers and queues the change.
    ///
    /// The range must already be validated.
    fn splice(&mut self, start: TextPos, end: TextPos, text: &str) -> TextPos {
        let tail = self.paragraphs[end.paragraph()][end.offset()..].to_string();
        let head = &self.paragraphs[start.paragraph()][..start.offset()];

        let mut lines = text.split('\n');
        let mut replacement: Vec<String> = Vec::new();
        let mut first = head.to_string();
        first.push_str(lines.next().unwrap_or_default());
        replacement.push(first);
        replacement.extend(lines.map(ToString::to_string));
        if let Some(last) = replacement.last_mut() {
            last.push_str(&tail);
        }
        self.paragraphs
            .splice(start.paragraph()..=end.paragraph(), replacement);

        let edit = TextEdit::from_text(start, end, text);
        let paragraphs = &self.paragraphs;
        self.markers
            .apply_edit(&edit, |pos| clamp_to(paragraphs, pos));
        self.styles
            .retain(|run| run.start.position() < run.end.position());
        self.changes.push(ContentChange::edit(start, end, text));
        edit.inserted_end()
    }

    fn relative(origin: TextPos, pos: TextPos) -> TextPos {
        if pos.paragraph() == origin.paragraph() {
            TextPos::new(0, pos.offset() - origin.offset())
        } else {
            TextPos::new(pos.paragraph() - origin.paragraph(), pos.offset())
        }
    }

    fn absolute(origin: TextPos, rel: TextPos) -> TextPos {
        if rel.paragraph() == 0 {
            TextPos::new(origin.paragraph(), origin.offset() + rel.offset())
        } else {
            TextPos::new(origin.paragraph() + rel.paragraph(), rel.offset())
        }
    }

    fn export_rich(&self, start: TextPos, end: TextPos) -> Result<Vec<u8>, DocumentError> {
        let paragraphs = self
            .text_range(start, end)
            .split('\n')
            .map(ToString::to_string)
            .collect();
        let runs = self
            .styles
            .iter()
            .filter_map(|run| {
                let run_start = run.start.position().max(start);
                let run_end = run.end.position().min(end);
                (run_start < run_end).then(|| RichRun {
                    start: Self::relative(start, run_start),
                    end: Self::relative(start, run_end),
                    attrs: run.attrs.clone(),
                })
            })
            .collect();
        serde_json::to_vec(&RichPayload { paragraphs, runs }).map_err(|err| DocumentError::Decode {
            format: DataFormat::RICH_TEXT,
            reason: err.to_string(),
        })
    }

    fn import_rich(
        &mut self,
        start: TextPos,
        end: TextPos,
        data: &[u8],
    ) -> Result<TextPos, DocumentError> {
        let payload: RichPayload =
            serde_json::from_slice(data).map_err(|err| DocumentError::Decode {
                format: DataFormat::RICH_TEXT,
                reason: err.to_string(),
            })?;
        let text = payload.paragraphs.join("\n");
        let inserted_end = self.replace(start, end, &text)?;
        for run in payload.runs {
            let run_start = self.clamp(Self::absolute(start, run.start));
            let run_end = self.clamp(Self::absolute(start, run.end)).min(inserted_end);
            if run_start < run_end {
                self.apply_style(run_start, run_end, &run.attrs)?;
            }
        }
        Ok(inserted_end)
    }
}

fn clamp_to(paragraphs: &[String], pos: TextPos) -> TextPos {
    let Some(last) = paragraphs.len().checked_sub(1) else {
        return TextPos::ZERO;
    };
    if pos.paragraph() > last {
        return TextPos::new(last, paragraphs[last].len());
    }
    let len = paragraphs[pos.paragraph()].len();
    pos.with_offset(pos.offset().min(len))
}

impl Document for PlainDocument {
    fn size(&self) -> usize {
        self.paragraphs.len()
    }

    fn plain_text(&self, index: usize) -> Cow<'_, str> {
        self.paragraphs
            .get(index)
            .map_or(Cow::Borrowed(""), |p| Cow::Borrowed(p.as_str()))
    }

    fn paragraph_len(&self, index: usize) -> usize {
        self.paragraphs.get(index).map_or(0, String::len)
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn replace(
        &mut self,
        start: TextPos,
        end: TextPos,
        text: &str,
    ) -> Result<TextPos, DocumentError> {
        if !self.writable {
            return Err(DocumentError::ReadOnly);
        }
        self.check_range(start, end)?;
        let removed = self.text_range(start, end);
        let inserted_end = self.splice(start, end, text);
        self.undo.push(UndoEntry {
            start,
            removed,
            inserted: text.to_string(),
            inserted_end,
        });
        self.redo.clear();
        Ok(inserted_end)
    }

    fn apply_style(
        &mut self,
        start: TextPos,
        end: TextPos,
        attrs: &StyleAttributes,
    ) -> Result<(), DocumentError> {
        if !self.writable {
            return Err(DocumentError::ReadOnly);
        }
        self.check_range(start, end)?;
        if start == end || attrs.is_empty() {
            return Ok(());
        }
        let run = StyleRun {
            start: self.markers.create(start),
            end: self.markers.create(end),
            attrs: attrs.clone(),
        };
        self.styles.push(run);
        self.changes.push(ContentChange::style(start, end));
        Ok(())
    }

    fn create_marker(&mut self, pos: TextPos) -> Marker {
        let pos = self.clamp(pos);
        self.markers.create(pos)
    }

    fn supported_export_formats(&self) -> &[DataFormat] {
        &self.export_formats
    }

    fn supported_import_formats(&self) -> &[DataFormat] {
        &self.import_formats
    }

    fn export(
        &self,
        start: TextPos,
        end: TextPos,
        format: DataFormat,
    ) -> Result<Vec<u8>, DocumentError> {
        self.check_range(start, end)?;
        if !self.export_formats.contains(&format) {
            return Err(DocumentError::UnsupportedFormat(format));
        }
        match format {
            DataFormat::PLAIN_TEXT => Ok(self.text_range(start, end).into_bytes()),
            DataFormat::RICH_TEXT => self.export_rich(start, end),
            other => Err(DocumentError::UnsupportedFormat(other)),
        }
    }

    fn import(
        &mut self,
        start: TextPos,
        end: TextPos,
        format: DataFormat,
        data: &[u8],
    ) -> Result<TextPos, DocumentError> {
        if !self.import_formats.contains(&format) {
            return Err(DocumentError::UnsupportedFormat(format));
        }
        match format {
            DataFormat::PLAIN_TEXT => {
                let text = core::str::from_utf8(data).map_err(|err| DocumentError::Decode {
                    format,
                    reason: err.to_string(),
                })?;
                self.replace(start, end, &text.replace("\r\n", "\n"))
            }
            DataFormat::RICH_TEXT => self.import_rich(start, end, data),
            other => Err(DocumentError::UnsupportedFormat(other)),
        }
    }

    fn take_changes(&mut self) -> Vec<ContentChange> {
        core::mem::take(&mut self.changes)
    }

    fn undo(&mut self) -> Option<(TextPos, TextPos)> {
        if !self.writable {
            return None;
        }
        let entry = self.undo.pop()?;
        let restored_end = self.splice(entry.start, entry.inserted_end, &entry.removed);
        let range = (entry.start, restored_end);
        self.redo.push(entry);
        Some(range)
    }

    fn redo(&mut self) -> Option<(TextPos, TextPos)> {
        if !self.writable {
            return None;
        }
        let entry = self.redo.pop()?;
        let removed_end = crate::marker::inserted_end(entry.start, &entry.removed);
        let inserted_end = self.splice(entry.start, removed_end, &entry.inserted);
        debug_assert_eq!(
            inserted_end, entry.inserted_end,
            "redo diverged from the original edit"
        );
        let range = (entry.start, inserted_end);
        self.undo.push(entry);
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::PlainDocument;
    use crate::document::{ChangeKind, DataFormat, Document, StyleAttributes};
    use crate::error::DocumentError;
    use crate::TextPos;
    use proptest::prelude::*;

    fn pos(p: usize, o: usize) -> TextPos {
        TextPos::new(p, o)
    }

    #[test]
    fn replace_splits_and_merges_paragraphs() {
        let mut doc = PlainDocument::from_text("hello\nworld");
        let end = doc.replace(pos(0, 2), pos(1, 3), "y\nthe\nwo").unwrap();
        assert_eq!(doc.paragraphs(), ["hey", "the", "wold"]);
        assert_eq!(end, pos(2, 2));
        let end = doc.replace(pos(0, 3), pos(2, 0), "").unwrap();
        assert_eq!(doc.text(), "heywold");
        assert_eq!(end, pos(0, 3));
    }

    #[test]
    fn replace_validates_positions() {
        let mut doc = PlainDocument::from_text("añb");
        assert_eq!(
            doc.replace(pos(0, 2), pos(0, 2), "x"),
            Err(DocumentError::NotOnCharBoundary { pos: pos(0, 2) })
        );
        assert_eq!(
            doc.replace(pos(1, 0), pos(1, 0), "x"),
            Err(DocumentError::OutOfRange {
                pos: pos(1, 0),
                size: 1
            })
        );
        assert_eq!(
            doc.replace(pos(0, 3), pos(0, 1), ""),
            Err(DocumentError::InvalidRange {
                start: pos(0, 3),
                end: pos(0, 1)
            })
        );
        doc.set_writable(false);
        assert_eq!(
            doc.replace(pos(0, 0), pos(0, 0), "x"),
            Err(DocumentError::ReadOnly)
        );
    }

    #[test]
    fn replace_moves_markers_and_queues_change() {
        let mut doc = PlainDocument::from_text("ab\ncd\nef");
        let before = doc.create_marker(pos(0, 1));
        let inside = doc.create_marker(pos(1, 1));
        let after = doc.create_marker(pos(2, 1));
        doc.replace(pos(0, 2), pos(1, 2), "").unwrap();
        assert_eq!(before.position(), pos(0, 1));
        assert_eq!(inside.position(), pos(0, 2));
        assert_eq!(after.position(), pos(1, 1));
        let changes = doc.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Edit);
        assert_eq!(changes[0].paragraph_delta(), -1);
        assert!(doc.take_changes().is_empty());
    }

    #[test]
    fn undo_redo_restores_text() {
        let mut doc = PlainDocument::from_text("one\ntwo");
        doc.replace(pos(0, 3), pos(1, 0), " and ").unwrap();
        assert_eq!(doc.text(), "one and two");
        assert_eq!(doc.undo(), Some((pos(0, 3), pos(1, 0))));
        assert_eq!(doc.text(), "one\ntwo");
        assert_eq!(doc.redo(), Some((pos(0, 3), pos(0, 8))));
        assert_eq!(doc.text(), "one and two");
        assert_eq!(doc.redo(), None);
    }

    #[test]
    fn style_runs_follow_edits() {
        let mut doc = PlainDocument::from_text("plain bold");
        let bold = StyleAttributes {
            bold: Some(true),
            ..StyleAttributes::default()
        };
        doc.apply_style(pos(0, 6), pos(0, 10), &bold).unwrap();
        doc.replace(pos(0, 0), pos(0, 0), ">> ").unwrap();
        assert_eq!(doc.style_at(pos(0, 9)).bold, Some(true));
        assert_eq!(doc.style_at(pos(0, 8)).bold, None);
    }

    #[test]
    fn rich_text_round_trip_keeps_styles() {
        let mut doc = PlainDocument::from_text("ab\ncd");
        let italic = StyleAttributes {
            italic: Some(true),
            ..StyleAttributes::default()
        };
        doc.apply_style(pos(0, 1), pos(1, 1), &italic).unwrap();
        let data = doc
            .export(pos(0, 1), pos(1, 2), DataFormat::RICH_TEXT)
            .unwrap();

        let mut target = PlainDocument::from_text("XY");
        let end = target
            .import(pos(0, 1), pos(0, 1), DataFormat::RICH_TEXT, &data)
            .unwrap();
        assert_eq!(target.text(), "Xb\ncdY");
        assert_eq!(end, pos(1, 2));
        assert_eq!(target.style_at(pos(0, 1)).italic, Some(true));
        assert_eq!(target.style_at(pos(1, 0)).italic, Some(true));
        assert_eq!(target.style_at(pos(1, 1)).italic, None);
    }

    #[test]
    fn import_rejects_bad_payloads() {
        let mut doc = PlainDocument::new();
        assert!(matches!(
            doc.import(pos(0, 0), pos(0, 0), DataFormat::RICH_TEXT, b"not json"),
            Err(DocumentError::Decode { .. })
        ));
        assert!(matches!(
            doc.import(pos(0, 0), pos(0, 0), DataFormat::new("image/png"), b""),
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert_eq!(
            doc.import(pos(0, 0), pos(0, 0), DataFormat::PLAIN_TEXT, b"a\r\nb"),
            Ok(pos(1, 1))
        );
        assert_eq!(doc.paragraphs(), ["a", "b"]);
    }

    fn edit_strategy() -> impl Strategy<Value = (usize, usize, usize, usize, String)> {
        (
            any::<usize>(),
            any::<usize>(),
            any::<usize>(),
            any::<usize>(),
            "[a-c\n]{0,5}",
        )
    }

    proptest! {
        #[test]
        fn markers_stay_in_range(
            initial in "[a-c\n]{0,12}",
            seeds in proptest::collection::vec((0_usize..16, 0_usize..16), 1..6),
            edits in proptest::collection::vec(edit_strategy(), 1..10),
        ) {
            let mut doc = PlainDocument::from_text(&initial);
            let markers: Vec<_> = seeds
                .into_iter()
                .map(|(p, o)| doc.create_marker(TextPos::new(p, o)))
                .collect();
            for (p0, o0, p1, o1, text) in edits {
                let a = doc.clamp(TextPos::new(p0 % doc.size(), o0 % 8));
                let b = doc.clamp(TextPos::new(p1 % doc.size(), o1 % 8));
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                let edit = crate::marker::TextEdit::from_text(start, end, &text);
                let expected: Vec<_> = markers.iter().map(|m| edit.map(m.position())).collect();
                doc.replace(start, end, &text).unwrap();
                for (marker, expected) in markers.iter().zip(expected) {
                    let now = marker.position();
                    prop_assert!(now.paragraph() < doc.size());
                    prop_assert!(now.offset() <= doc.paragraph_len(now.paragraph()));
                    prop_assert_eq!(now, expected);
                }
            }
        }
    }
}
