// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use super::RichTextEditor;
use super::navigation::WordTarget;
use crate::TextPos;
use crate::clipboard::{Clipboard, ClipboardContent};
use crate::document::{DataFormat, Document};
use crate::line_box::LineBoxFactory;
use crate::segment::TextSegmenter;

/// Characters typed text never contains: C0 controls and DEL.
fn is_control(c: char) -> bool {
    c < ' ' || c == '\u{7f}'
}

impl<D, F, S> RichTextEditor<D, F, S>
where
    D: Document,
    F: LineBoxFactory,
    S: TextSegmenter,
{
    // --- MARK: Text input ---

    /// Replaces the selection with typed `text`.
    ///
    /// Control characters are dropped; input made only of control characters
    /// does nothing.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let filtered: String = text.chars().filter(|c| !is_control(*c)).collect();
        if filtered.is_empty() {
            return false;
        }
        self.replace_selection(&filtered)
    }

    fn can_edit(&self) -> bool {
        let editable = self.editable && self.document.is_writable();
        if !editable {
            tracing::trace!("editing disabled");
        }
        editable
    }

    /// Replaces `start..end` and leaves the caret after the new text.
    fn replace_range(&mut self, start: TextPos, end: TextPos, text: &str) -> bool {
        match self.document.replace(start, end, text) {
            Ok(caret) => {
                self.finish_edit(caret);
                true
            }
            Err(err) => {
                tracing::warn!(%err, %start, %end, "document rejected edit");
                self.sync_document();
                false
            }
        }
    }

    fn finish_edit(&mut self, caret: TextPos) {
        self.sync_document();
        self.phantom_x = None;
        self.set_caret(caret);
        self.scroll_caret_to_visible();
    }

    pub(super) fn replace_selection(&mut self, text: &str) -> bool {
        if !self.can_edit() {
            return false;
        }
        let Some((start, end)) = self.selection.range() else {
            return false;
        };
        self.replace_range(start, end, text)
    }

    /// Deletes the selection if it is not empty, otherwise `caret..target` in
    /// document order.
    fn delete_towards(&mut self, target: impl FnOnce(&Self, TextPos) -> Option<TextPos>) -> bool {
        if !self.can_edit() {
            return false;
        }
        let Some((start, end)) = self.selection.range() else {
            return false;
        };
        if start != end {
            return self.replace_range(start, end, "");
        }
        let Some(other) = target(self, start) else {
            return false;
        };
        match other.cmp(&start) {
            core::cmp::Ordering::Less => self.replace_range(other, start, ""),
            core::cmp::Ordering::Greater => self.replace_range(start, other, ""),
            core::cmp::Ordering::Equal => false,
        }
    }

    // --- MARK: Deletion ---

    pub(super) fn backspace(&mut self) -> bool {
        self.delete_towards(|editor, caret| editor.next_character(caret, false))
    }

    pub(super) fn delete(&mut self) -> bool {
        self.delete_towards(|editor, caret| editor.next_character(caret, true))
    }

    pub(super) fn delete_word(&mut self, target: WordTarget) -> bool {
        self.delete_towards(|editor, caret| editor.word_boundary(caret, target))
    }

    pub(super) fn delete_paragraph_start(&mut self) -> bool {
        self.delete_towards(|_, caret| Some(caret.with_offset(0)))
    }

    /// Deletes every paragraph the selection touches, with the line break that follows it.
    pub(super) fn delete_paragraph(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        let Some((start, end)) = self.selection.range() else {
            return false;
        };
        let from = TextPos::new(start.paragraph(), 0);
        let to = self.document.clamp(TextPos::new(end.paragraph() + 1, 0));
        if from == to {
            return false;
        }
        self.replace_range(from, to, "")
    }

    // --- MARK: Clipboard ---

    /// Copies the selection in every format the document exports.
    pub(super) fn copy(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let Some((start, end)) = self.selection.range() else {
            return false;
        };
        if start == end {
            return false;
        }
        let mut content = ClipboardContent::new();
        for &format in self.document.supported_export_formats() {
            match self.document.export(start, end, format) {
                Ok(data) => content.insert(format, data),
                Err(err) => tracing::warn!(?format, %err, "export failed"),
            }
        }
        if content.is_empty() {
            return false;
        }
        clipboard.write(content);
        true
    }

    /// Copies the selection, then deletes it if the document is editable.
    pub(super) fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.copy(clipboard) {
            return false;
        }
        if self.can_edit() {
            self.replace_selection("");
        }
        true
    }

    /// Pastes in the first format the document imports that the clipboard holds.
    pub(super) fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.can_edit() {
            return false;
        }
        let Some(format) = self
            .document
            .supported_import_formats()
            .iter()
            .copied()
            .find(|format| clipboard.has_format(*format))
        else {
            tracing::trace!("no clipboard format the document can import");
            return false;
        };
        let Some(data) = clipboard.read(format) else {
            return false;
        };
        let Some((start, end)) = self.selection.range() else {
            return false;
        };
        match self.document.import(start, end, format, &data) {
            Ok(caret) => {
                self.finish_edit(caret);
                true
            }
            Err(err) => {
                tracing::warn!(?format, %err, "clipboard payload could not be imported");
                self.sync_document();
                false
            }
        }
    }

    /// Pastes the clipboard text, ignoring richer formats.
    pub(super) fn paste_plain_text(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if !self.can_edit() {
            return false;
        }
        let Some(data) = clipboard.read(DataFormat::PLAIN_TEXT) else {
            return false;
        };
        let text = match core::str::from_utf8(&data) {
            Ok(text) => text.replace("\r\n", "\n"),
            Err(err) => {
                tracing::warn!(%err, "clipboard text is not valid UTF-8");
                return false;
            }
        };
        self.replace_selection(&text)
    }

    // --- MARK: History ---

    pub(super) fn undo(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        match self.document.undo() {
            Some((start, end)) => {
                self.finish_history(start, end);
                true
            }
            None => false,
        }
    }

    pub(super) fn redo(&mut self) -> bool {
        if !self.can_edit() {
            return false;
        }
        match self.document.redo() {
            Some((start, end)) => {
                self.finish_history(start, end);
                true
            }
            None => false,
        }
    }

    fn finish_history(&mut self, start: TextPos, end: TextPos) {
        self.sync_document();
        self.phantom_x = None;
        self.select(start, end);
        self.scroll_caret_to_visible();
    }
}
