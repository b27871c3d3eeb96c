// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Point, Shape};

use super::RichTextEditor;
use crate::TextPos;
use crate::document::Document;
use crate::line_box::{LineBox, LineBoxFactory};
use crate::segment::TextSegmenter;

/// A word boundary relative to the caret, within its paragraph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum WordTarget {
    PreviousStart,
    NextStart,
    NextEnd,
}

impl WordTarget {
    fn resolve<S: TextSegmenter>(self, segmenter: &S, text: &str, offset: usize) -> usize {
        match self {
            Self::PreviousStart => segmenter.previous_word_start(text, offset),
            Self::NextStart => segmenter.next_word_start(text, offset),
            Self::NextEnd => segmenter.next_word_end(text, offset),
        }
    }
}

impl<D, F, S> RichTextEditor<D, F, S>
where
    D: Document,
    F: LineBoxFactory,
    S: TextSegmenter,
{
    /// The grapheme boundary next to `pos`, crossing into the adjacent paragraph
    /// at paragraph ends.
    pub(super) fn next_character(&self, pos: TextPos, forward: bool) -> Option<TextPos> {
        let text = self.document.plain_text(pos.paragraph());
        if forward {
            match self.segmenter.next_grapheme(&text, pos.offset()) {
                Some(offset) => Some(pos.with_offset(offset)),
                None => {
                    let next = pos.paragraph() + 1;
                    (next < self.document.size()).then(|| TextPos::new(next, 0))
                }
            }
        } else {
            match self.segmenter.previous_grapheme(&text, pos.offset()) {
                Some(offset) => Some(pos.with_offset(offset)),
                None => {
                    let previous = pos.paragraph().checked_sub(1)?;
                    let len = self.document.paragraph_len(previous);
                    Some(TextPos::new(previous, len))
                }
            }
        }
    }

    /// The word boundary `target` from `pos`, never leaving its paragraph.
    ///
    /// `None` for an empty paragraph.
    pub(super) fn word_boundary(&self, pos: TextPos, target: WordTarget) -> Option<TextPos> {
        let text = self.document.plain_text(pos.paragraph());
        if text.is_empty() {
            return None;
        }
        let offset = target.resolve(&self.segmenter, &text, pos.offset());
        Some(pos.with_offset(offset))
    }

    pub(super) fn move_character(&mut self, forward: bool, extend: bool) -> bool {
        let Some(segment) = self.selection.segment() else {
            return false;
        };
        let (min, max) = segment.range();
        let caret = segment.caret().position();
        self.phantom_x = None;
        if !extend && min != max {
            self.move_caret(if forward { max } else { min }, false);
            return true;
        }
        let Some(target) = self.next_character(caret, forward) else {
            return false;
        };
        self.move_caret(target, extend);
        true
    }

    pub(super) fn move_word(&mut self, target: WordTarget, extend: bool) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        let Some(pos) = self.word_boundary(caret, target) else {
            return false;
        };
        if pos == caret && (extend || !self.selection.has_range()) {
            tracing::trace!(?target, %caret, "word move has no target");
            return false;
        }
        self.phantom_x = None;
        self.move_caret(pos, extend);
        true
    }

    /// Moves the caret `delta` pixels up (negative) or down (positive),
    /// keeping its horizontal position across repeated moves.
    pub(super) fn move_vertically(&mut self, delta: f64, extend: bool) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        self.scroll_caret_to_visible();
        let Some(bounds) = self.caret_bounds(caret) else {
            return false;
        };
        let x = *self.phantom_x.get_or_insert(bounds.center().x);
        let y = if delta > 0.0 {
            bounds.y1 + delta + 0.5 + self.config.line_spacing
        } else {
            bounds.y0 + delta - 0.5
        };
        let Some(target) = self.text_pos_at_exact(Point::new(x, y)) else {
            tracing::trace!(y, "no paragraph at vertical move target");
            return false;
        };
        self.move_caret(target, extend);
        true
    }

    /// Moves to the start or end of the visual line containing the caret.
    pub(super) fn move_to_line_edge(&mut self, start: bool, extend: bool) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        self.scroll_caret_to_visible();
        let Some(cell) = self.layout.cell(caret.paragraph()) else {
            return false;
        };
        let line_box = cell.line_box();
        let row = line_box.caret_shape(caret.offset(), true).bounding_box();
        let x = if start { 0.0 } else { f64::MAX };
        let offset = line_box.offset_at_point(Point::new(x, (row.y0 + row.y1) / 2.0));
        self.phantom_x = None;
        self.move_caret(caret.with_offset(offset), extend);
        true
    }

    pub(super) fn move_to_paragraph_edge(&mut self, start: bool, extend: bool) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        let offset = if start {
            0
        } else {
            self.document.paragraph_len(caret.paragraph())
        };
        self.phantom_x = None;
        self.move_caret(caret.with_offset(offset), extend);
        true
    }

    /// Moves to the start of the paragraph, or to the start of the previous
    /// one when already there; and likewise downward with paragraph ends.
    pub(super) fn move_paragraph(&mut self, down: bool, extend: bool) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        let index = caret.paragraph();
        let target = if down {
            let end = self.document.paragraph_len(index);
            if caret.offset() < end {
                Some(caret.with_offset(end))
            } else {
                let next = index + 1;
                (next < self.document.size())
                    .then(|| TextPos::new(next, self.document.paragraph_len(next)))
            }
        } else if caret.offset() > 0 {
            Some(caret.with_offset(0))
        } else if index > 0 {
            Some(TextPos::new(index - 1, 0))
        } else {
            None
        };
        let Some(target) = target else {
            return false;
        };
        self.phantom_x = None;
        self.move_caret(target, extend);
        true
    }

    pub(super) fn move_to_document_edge(&mut self, start: bool, extend: bool) -> bool {
        if self.document.size() == 0 {
            return false;
        }
        let target = if start {
            TextPos::ZERO
        } else {
            self.document.end()
        };
        self.phantom_x = None;
        self.move_caret(target, extend);
        true
    }

    pub(super) fn select_all(&mut self) -> bool {
        if self.document.size() == 0 {
            return false;
        }
        let end = self.document.end();
        self.phantom_x = None;
        self.select(TextPos::ZERO, end);
        true
    }

    pub(super) fn select_paragraph(&mut self) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        let end = self.document.paragraph_len(caret.paragraph());
        self.phantom_x = None;
        self.select(caret.with_offset(0), caret.with_offset(end));
        true
    }

    /// Selects the segment between the word boundaries around the caret.
    pub(super) fn select_word(&mut self) -> bool {
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        let around = {
            let text = self.document.plain_text(caret.paragraph());
            self.segmenter.segment_around(&text, caret.offset())
        };
        let Some((start, end)) = around else {
            return false;
        };
        self.phantom_x = None;
        self.select(caret.with_offset(start), caret.with_offset(end));
        true
    }

    pub(super) fn deselect(&mut self) -> bool {
        if !self.selection.has_range() {
            return false;
        }
        let Some(caret) = self.selection.caret() else {
            return false;
        };
        self.set_caret(caret);
        true
    }
}

#[cfg(test)]
mod tests {
    use peniko::kurbo::Size;

    use crate::behavior::Command;
    use crate::clipboard::MemoryClipboard;
    use crate::config::EditorConfig;
    use crate::document::PlainDocument;
    use crate::line_box::FixedPitchFactory;
    use crate::{RichTextEditor, TextPos};

    fn editor(text: &str) -> RichTextEditor<PlainDocument, FixedPitchFactory> {
        let mut editor = RichTextEditor::new(
            PlainDocument::from_text(text),
            FixedPitchFactory::new(10.0, 20.0),
            EditorConfig::default(),
        );
        editor.set_viewport_size(Size::new(200.0, 100.0));
        editor
    }

    fn run(
        editor: &mut RichTextEditor<PlainDocument, FixedPitchFactory>,
        command: Command,
    ) -> bool {
        editor.execute(command, &mut MemoryClipboard::new())
    }

    #[test]
    fn move_right_crosses_paragraphs() {
        let mut ed = editor("ab\ncd");
        ed.set_caret(TextPos::new(0, 2));
        assert!(run(&mut ed, Command::MoveRight));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 0)));
        assert!(run(&mut ed, Command::MoveLeft));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 2)));
    }

    #[test]
    fn move_at_document_edges_is_noop() {
        let mut ed = editor("ab");
        assert!(!run(&mut ed, Command::MoveLeft));
        ed.set_caret(TextPos::new(0, 2));
        assert!(!run(&mut ed, Command::MoveRight));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 2)));
    }

    #[test]
    fn move_left_jumps_over_selection() {
        let mut ed = editor("hello world");
        ed.select(TextPos::new(0, 2), TextPos::new(0, 7));
        assert!(run(&mut ed, Command::MoveLeft));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 2)));
        assert!(!ed.selection().has_range());

        ed.select(TextPos::new(0, 7), TextPos::new(0, 2));
        assert!(run(&mut ed, Command::MoveRight));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 7)));
    }

    #[test]
    fn select_left_extends_by_grapheme() {
        let mut ed = editor("e\u{301}x");
        ed.set_caret(TextPos::new(0, 4));
        assert!(run(&mut ed, Command::SelectLeft));
        assert!(run(&mut ed, Command::SelectLeft));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 0)));
        assert_eq!(ed.anchor(), Some(TextPos::new(0, 4)));
    }

    #[test]
    fn word_moves_stay_in_paragraph() {
        let mut ed = editor("ab  cd\nef");
        ed.set_caret(TextPos::new(0, 6));
        assert!(run(&mut ed, Command::MoveWordPrevious));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 4)));
        assert!(run(&mut ed, Command::MoveWordPrevious));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 0)));
        assert!(run(&mut ed, Command::MoveWordNextEnd));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 2)));
        ed.set_caret(TextPos::new(0, 6));
        assert!(!run(&mut ed, Command::MoveWordNext));
        assert!(!run(&mut ed, Command::SelectWordNextEnd));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 6)));
    }

    #[test]
    fn word_move_at_paragraph_end_still_collapses_selection() {
        let mut ed = editor("ab cd");
        ed.select(TextPos::new(0, 1), TextPos::new(0, 5));
        assert!(run(&mut ed, Command::MoveWordNext));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 5)));
        assert!(!ed.selection().has_range());
        assert!(!run(&mut ed, Command::MoveWordNext));
    }

    #[test]
    fn word_moves_in_empty_paragraph_are_noops() {
        let mut ed = editor("ab\n\ncd");
        ed.set_caret(TextPos::new(1, 0));
        assert!(!run(&mut ed, Command::MoveWordNext));
        assert!(!run(&mut ed, Command::SelectWord));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 0)));
    }

    #[test]
    fn vertical_moves_keep_phantom_x() {
        let mut ed = editor("abcdef\nab\nabcdef");
        ed.set_caret(TextPos::new(0, 5));
        assert!(run(&mut ed, Command::MoveDown));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 2)));
        assert_eq!(ed.phantom_x(), Some(50.0));
        assert!(run(&mut ed, Command::MoveDown));
        assert_eq!(ed.caret(), Some(TextPos::new(2, 5)));
        assert!(run(&mut ed, Command::MoveLeft));
        assert_eq!(ed.phantom_x(), None);
    }

    #[test]
    fn vertical_move_past_document_end_is_noop() {
        let mut ed = editor("abc\ndef");
        ed.set_caret(TextPos::new(1, 1));
        assert!(!run(&mut ed, Command::MoveDown));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 1)));
        ed.set_caret(TextPos::new(0, 1));
        assert!(!run(&mut ed, Command::MoveUp));
    }

    #[test]
    fn line_edges_follow_wrapped_rows() {
        // 200px wide viewport, 10px characters: 20 characters per row.
        let text = "abcdefghijklmnopqrstuvwxyz";
        let mut ed = editor(text);
        ed.set_caret(TextPos::new(0, 23));
        assert!(run(&mut ed, Command::MoveToLineStart));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 20)));
        ed.set_caret(TextPos::new(0, 3));
        assert!(run(&mut ed, Command::SelectToLineEnd));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 20)));
        assert_eq!(ed.anchor(), Some(TextPos::new(0, 3)));
        assert!(run(&mut ed, Command::MoveToParagraphEnd));
        assert_eq!(ed.caret(), Some(TextPos::new(0, 26)));
    }

    #[test]
    fn paragraph_up_down() {
        let mut ed = editor("ab\ncde\nf");
        ed.set_caret(TextPos::new(1, 1));
        assert!(run(&mut ed, Command::MoveParagraphDown));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 3)));
        assert!(run(&mut ed, Command::MoveParagraphDown));
        assert_eq!(ed.caret(), Some(TextPos::new(2, 1)));
        assert!(!run(&mut ed, Command::MoveParagraphDown));
        assert!(run(&mut ed, Command::MoveParagraphUp));
        assert_eq!(ed.caret(), Some(TextPos::new(2, 0)));
        assert!(run(&mut ed, Command::MoveParagraphUp));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 0)));
    }

    #[test]
    fn document_edges_and_select_all() {
        let mut ed = editor("ab\ncd");
        assert!(run(&mut ed, Command::MoveToDocumentEnd));
        assert_eq!(ed.caret(), Some(TextPos::new(1, 2)));
        assert!(run(&mut ed, Command::SelectToDocumentStart));
        assert_eq!(
            ed.selection().range(),
            Some((TextPos::ZERO, TextPos::new(1, 2)))
        );
        assert!(run(&mut ed, Command::Deselect));
        assert_eq!(ed.caret(), Some(TextPos::ZERO));
        assert!(run(&mut ed, Command::SelectAll));
        assert_eq!(
            ed.selection().range(),
            Some((TextPos::ZERO, TextPos::new(1, 2)))
        );
    }

    #[test]
    fn select_word_and_paragraph() {
        let mut ed = editor("one two\nthree");
        ed.set_caret(TextPos::new(0, 5));
        assert!(run(&mut ed, Command::SelectWord));
        assert_eq!(
            ed.selection().range(),
            Some((TextPos::new(0, 4), TextPos::new(0, 7)))
        );
        ed.set_caret(TextPos::new(1, 2));
        assert!(run(&mut ed, Command::SelectParagraph));
        assert_eq!(
            ed.selection().range(),
            Some((TextPos::new(1, 0), TextPos::new(1, 5)))
        );
    }
}
