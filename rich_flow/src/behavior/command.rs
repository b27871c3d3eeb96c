// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An editing or navigation command understood by a [`RichTextEditor`](crate::RichTextEditor).
///
/// `Move*` commands collapse the selection to the new caret, `Select*`
/// commands keep the anchor and move the caret.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Command {
    /// One grapheme left, or to the start of a non-empty selection.
    MoveLeft,
    /// One grapheme right, or to the end of a non-empty selection.
    MoveRight,
    /// One visual line up.
    MoveUp,
    /// One visual line down.
    MoveDown,
    /// One viewport height up.
    PageUp,
    /// One viewport height down.
    PageDown,
    /// Start of the previous word in the paragraph.
    MoveWordPrevious,
    /// Start of the next word in the paragraph.
    MoveWordNext,
    /// End of the next word in the paragraph.
    MoveWordNextEnd,
    /// Start of the visual line.
    MoveToLineStart,
    /// End of the visual line.
    MoveToLineEnd,
    /// Start of the paragraph.
    MoveToParagraphStart,
    /// End of the paragraph.
    MoveToParagraphEnd,
    /// Start of the paragraph, or of the previous one if already there.
    MoveParagraphUp,
    /// End of the paragraph, or of the next one if already there.
    MoveParagraphDown,
    /// Start of the document.
    MoveToDocumentStart,
    /// End of the document.
    MoveToDocumentEnd,

    /// Extends the selection one grapheme left.
    SelectLeft,
    /// Extends the selection one grapheme right.
    SelectRight,
    /// Extends the selection one visual line up.
    SelectUp,
    /// Extends the selection one visual line down.
    SelectDown,
    /// Extends the selection one viewport height up.
    SelectPageUp,
    /// Extends the selection one viewport height down.
    SelectPageDown,
    /// Extends the selection to the start of the previous word.
    SelectWordPrevious,
    /// Extends the selection to the start of the next word.
    SelectWordNext,
    /// Extends the selection to the end of the next word.
    SelectWordNextEnd,
    /// Extends the selection to the start of the visual line.
    SelectToLineStart,
    /// Extends the selection to the end of the visual line.
    SelectToLineEnd,
    /// Extends the selection to the start of the paragraph.
    SelectToParagraphStart,
    /// Extends the selection to the end of the paragraph.
    SelectToParagraphEnd,
    /// Extends the selection like [`MoveParagraphUp`](Self::MoveParagraphUp).
    SelectParagraphUp,
    /// Extends the selection like [`MoveParagraphDown`](Self::MoveParagraphDown).
    SelectParagraphDown,
    /// Extends the selection to the start of the document.
    SelectToDocumentStart,
    /// Extends the selection to the end of the document.
    SelectToDocumentEnd,

    /// Selects the whole document.
    SelectAll,
    /// Selects the paragraph containing the caret.
    SelectLine,
    /// Selects the paragraph containing the caret.
    SelectParagraph,
    /// Selects the word (or the run of spaces or punctuation) at the caret.
    SelectWord,
    /// Collapses the selection to the caret.
    Deselect,

    /// Deletes the selection, or the grapheme before the caret.
    Backspace,
    /// Deletes the selection, or the grapheme after the caret.
    Delete,
    /// Deletes from the start of the previous word to the caret.
    DeleteWordPrevious,
    /// Deletes from the caret to the start of the next word.
    DeleteWordNextStart,
    /// Deletes from the caret to the end of the next word.
    DeleteWordNextEnd,
    /// Deletes the paragraphs spanned by the selection, line breaks included.
    DeleteParagraph,
    /// Deletes from the start of the paragraph to the caret.
    DeleteParagraphStart,
    /// Replaces the selection with a paragraph break.
    InsertLineBreak,
    /// Replaces the selection with the configured tab text.
    InsertTab,

    /// Copies the selection to the clipboard.
    Copy,
    /// Copies the selection to the clipboard and deletes it.
    Cut,
    /// Replaces the selection with the clipboard content, in the richest shared format.
    Paste,
    /// Replaces the selection with the clipboard text.
    PastePlainText,
    /// Reverts the last edit.
    Undo,
    /// Reapplies the last reverted edit.
    Redo,
}

impl Command {
    /// Returns `true` if the command can modify the document.
    pub fn is_edit(self) -> bool {
        matches!(
            self,
            Self::Backspace
                | Self::Delete
                | Self::DeleteWordPrevious
                | Self::DeleteWordNextStart
                | Self::DeleteWordNextEnd
                | Self::DeleteParagraph
                | Self::DeleteParagraphStart
                | Self::InsertLineBreak
                | Self::InsertTab
                | Self::Cut
                | Self::Paste
                | Self::PastePlainText
                | Self::Undo
                | Self::Redo
        )
    }
}
