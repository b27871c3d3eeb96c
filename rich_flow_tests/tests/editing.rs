// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing command tests.

use rich_flow::{Command, Document, Origin, TextPos};

use crate::util::{EditorBuilder, RepeatedDocument, editor, numbered_lines, run};

#[test]
fn editing_backspace_across_paragraphs() {
    let mut editor = editor("ab\ncd");
    editor.set_caret(TextPos::new(1, 0));
    assert!(run(&mut editor, Command::Backspace));
    assert_eq!(editor.document().paragraphs(), ["abcd"]);
    assert_eq!(editor.caret(), Some(TextPos::new(0, 2)));
    assert_eq!(editor.layout().cells().len(), 1);
}

#[test]
fn editing_delete_at_paragraph_end_merges() {
    let mut editor = editor("ab\ncd");
    editor.set_caret(TextPos::new(0, 2));
    assert!(run(&mut editor, Command::Delete));
    assert_eq!(editor.document().paragraphs(), ["abcd"]);
    assert_eq!(editor.caret(), Some(TextPos::new(0, 2)));
}

#[test]
fn editing_backspace_at_document_start_is_noop() {
    let mut editor = editor("ab");
    assert!(!run(&mut editor, Command::Backspace));
    assert_eq!(editor.document().text(), "ab");
}

#[test]
fn editing_deletes_selection_across_paragraphs() {
    let mut editor = editor("abc\ndef\nghi");
    editor.select(TextPos::new(2, 1), TextPos::new(0, 1));
    assert!(run(&mut editor, Command::Delete));
    assert_eq!(editor.document().paragraphs(), ["ahi"]);
    assert_eq!(editor.caret(), Some(TextPos::new(0, 1)));
    assert!(!editor.selection().has_range());
}

#[test]
fn editing_typing_replaces_selection_then_inserts() {
    let mut editor = editor("abc\ndef");
    editor.select(TextPos::new(0, 1), TextPos::new(1, 2));
    assert!(editor.insert_text("XY"));
    assert_eq!(editor.document().paragraphs(), ["aXYf"]);
    assert_eq!(editor.caret(), Some(TextPos::new(0, 3)));
    assert!(run(&mut editor, Command::InsertLineBreak));
    assert_eq!(editor.document().paragraphs(), ["aXY", "f"]);
    assert_eq!(editor.caret(), Some(TextPos::new(1, 0)));
}

#[test]
fn editing_line_break_at_viewport_bottom_scrolls() {
    let mut editor = editor(&numbered_lines(50));
    editor.set_caret(TextPos::new(4, 6));
    assert!(run(&mut editor, Command::InsertLineBreak));
    assert_eq!(editor.caret(), Some(TextPos::new(5, 0)));
    assert_eq!(editor.origin(), Origin::new(1, 0.0));
    assert_eq!(editor.document().size(), 51);
}

#[test]
fn editing_custom_tab_text() {
    let mut editor = EditorBuilder::new()
        .config(|config| config.tab_text = "    ".into())
        .build("x");
    assert!(run(&mut editor, Command::InsertTab));
    assert_eq!(editor.document().text(), "    x");
    assert_eq!(editor.caret(), Some(TextPos::new(0, 4)));
}

#[test]
fn editing_read_only_document_is_noop() {
    let mut editor = EditorBuilder::new().build_document(RepeatedDocument::new(3, "abc"));
    editor.set_caret(TextPos::new(1, 1));
    for command in [
        Command::Backspace,
        Command::Delete,
        Command::DeleteParagraph,
        Command::DeleteWordPrevious,
        Command::InsertLineBreak,
        Command::InsertTab,
        Command::Undo,
    ] {
        assert!(!run(&mut editor, command), "{command:?} should be a no-op");
    }
    assert!(!editor.insert_text("x"));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 1)));
    assert!(run(&mut editor, Command::MoveRight));
}

#[test]
fn editing_disabled_editor_still_navigates() {
    let mut editor = editor("abc");
    editor.set_editable(false);
    assert!(!editor.is_editable());
    assert!(!editor.insert_text("x"));
    assert!(run(&mut editor, Command::SelectAll));
    assert_eq!(editor.document().text(), "abc");
}

#[test]
fn editing_undo_redo_round_trip() {
    let mut editor = editor("one\ntwo");
    editor.set_caret(TextPos::new(0, 3));
    assert!(run(&mut editor, Command::Delete));
    assert_eq!(editor.document().paragraphs(), ["onetwo"]);
    assert!(run(&mut editor, Command::Undo));
    assert_eq!(editor.document().paragraphs(), ["one", "two"]);
    assert_eq!(
        editor.selection().range(),
        Some((TextPos::new(0, 3), TextPos::new(1, 0)))
    );
    assert!(run(&mut editor, Command::Redo));
    assert_eq!(editor.document().paragraphs(), ["onetwo"]);
    assert_eq!(editor.caret(), Some(TextPos::new(0, 3)));
    assert!(!run(&mut editor, Command::Redo));
}

#[test]
fn editing_phantom_x_resets_after_edit() {
    let mut editor = editor("abcdef\nab\nabcdef");
    editor.set_caret(TextPos::new(0, 5));
    assert!(run(&mut editor, Command::MoveDown));
    assert_eq!(editor.phantom_x(), Some(50.0));
    assert!(editor.insert_text("z"));
    assert_eq!(editor.phantom_x(), None);
    assert!(run(&mut editor, Command::MoveDown));
    assert_eq!(editor.caret(), Some(TextPos::new(2, 3)));
}
