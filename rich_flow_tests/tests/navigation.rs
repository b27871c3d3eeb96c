// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret movement, pointer and key binding tests.

use peniko::kurbo::Point;
use rich_flow::{Command, Key, KeyBinding, MemoryClipboard, Origin, TextPos};

use crate::util::{EditorBuilder, editor, numbered_lines, run};

#[test]
fn navigation_jump_over_selection() {
    let mut editor = editor("hello world");
    editor.select(TextPos::new(0, 2), TextPos::new(0, 8));
    assert!(run(&mut editor, Command::MoveLeft));
    assert_eq!(editor.caret(), Some(TextPos::new(0, 2)));
    assert!(!editor.selection().has_range());

    editor.select(TextPos::new(0, 2), TextPos::new(0, 8));
    assert!(run(&mut editor, Command::MoveRight));
    assert_eq!(editor.caret(), Some(TextPos::new(0, 8)));
}

#[test]
fn navigation_word_previous_skips_spaces() {
    let mut editor = editor("ab  cd");
    editor.set_caret(TextPos::new(0, 6));
    assert!(run(&mut editor, Command::MoveWordPrevious));
    assert_eq!(editor.caret(), Some(TextPos::new(0, 4)));
    assert!(run(&mut editor, Command::MoveWordPrevious));
    assert_eq!(editor.caret(), Some(TextPos::ZERO));
}

#[test]
fn navigation_word_moves_handle_non_ascii() {
    let mut editor = editor("größe straße");
    assert!(run(&mut editor, Command::MoveWordNextEnd));
    assert_eq!(editor.caret(), Some(TextPos::new(0, "größe".len())));
    assert!(run(&mut editor, Command::MoveWordNext));
    assert_eq!(editor.caret(), Some(TextPos::new(0, "größe ".len())));
}

#[test]
fn navigation_select_down_keeps_anchor() {
    let mut editor = editor("abc\ndef");
    editor.set_caret(TextPos::new(0, 1));
    assert!(run(&mut editor, Command::SelectDown));
    assert_eq!(editor.anchor(), Some(TextPos::new(0, 1)));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 1)));
}

#[test]
fn navigation_page_down_and_up_scroll() {
    let mut editor = editor(&numbered_lines(50));
    assert!(run(&mut editor, Command::PageDown));
    assert_eq!(editor.caret(), Some(TextPos::new(6, 0)));
    assert_eq!(editor.origin(), Origin::new(2, 0.0));

    assert!(run(&mut editor, Command::PageUp));
    assert_eq!(editor.caret(), Some(TextPos::ZERO));
    assert_eq!(editor.origin(), Origin::new(0, 0.0));
}

#[test]
fn navigation_caret_scrolls_back_into_view() {
    let mut editor = editor(&numbered_lines(50));
    editor.set_caret(TextPos::new(1, 0));
    assert!(editor.scroll_by(400.0));
    assert_eq!(editor.origin(), Origin::new(20, 0.0));
    assert!(run(&mut editor, Command::MoveRight));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 1)));
    assert_eq!(editor.origin(), Origin::new(1, 0.0));
}

#[test]
fn navigation_document_end_shows_last_row_of_wrapped_paragraph() {
    let text = format!("{}\n{}", numbered_lines(300), "x".repeat(200));
    let mut editor = editor(&text);
    assert!(run(&mut editor, Command::MoveToDocumentEnd));
    assert_eq!(editor.caret(), Some(TextPos::new(300, 200)));
    assert_eq!(editor.origin(), Origin::new(300, 100.0));
    let caret = editor.caret_geometry().unwrap();
    assert!(caret.bounds.y0 >= 0.0, "caret starts above the viewport");
    assert!(caret.bounds.y1 <= 100.5, "caret ends below the viewport");
}

#[test]
fn navigation_unwrapped_text_scrolls_horizontally() {
    let mut editor = EditorBuilder::new()
        .config(|config| config.wrap_text = false)
        .build(&"a".repeat(40));
    assert!(run(&mut editor, Command::MoveToLineEnd));
    assert_eq!(editor.caret(), Some(TextPos::new(0, 40)));
    assert_eq!(editor.scroll_x(), 210.0);
    let caret = editor.caret_geometry().unwrap();
    assert!(caret.bounds.x0 > 0.0 && caret.bounds.x1 < 200.0);

    assert!(run(&mut editor, Command::MoveToLineStart));
    assert_eq!(editor.scroll_x(), 0.0);
}

#[test]
fn navigation_wrapped_text_ignores_horizontal_scroll() {
    let mut editor = editor("abc");
    assert!(!editor.scroll_horizontal(50.0));
    assert_eq!(editor.scroll_x(), 0.0);
}

#[test]
fn navigation_pointer_press_and_extend() {
    let mut editor = editor("abcdef\nghijkl");
    assert!(editor.pointer_pressed(Point::new(24.0, 30.0), false));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 2)));
    assert!(editor.pointer_pressed(Point::new(44.0, 5.0), true));
    assert_eq!(
        editor.selection().range(),
        Some((TextPos::new(0, 4), TextPos::new(1, 2)))
    );
    assert_eq!(editor.anchor(), Some(TextPos::new(1, 2)));
}

#[test]
fn navigation_pointer_below_text_hits_last_paragraph() {
    let mut editor = editor("ab\ncd");
    assert!(editor.pointer_pressed(Point::new(100.0, 90.0), false));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 2)));
}

#[test]
fn navigation_double_and_triple_click() {
    let mut editor = editor("one two\nthree");
    assert!(editor.double_click(Point::new(52.0, 5.0)));
    assert_eq!(
        editor.selection().range(),
        Some((TextPos::new(0, 4), TextPos::new(0, 7)))
    );
    assert!(editor.triple_click(Point::new(10.0, 25.0)));
    assert_eq!(
        editor.selection().range(),
        Some((TextPos::new(1, 0), TextPos::new(1, 5)))
    );
}

#[test]
fn navigation_key_bindings() {
    let mut editor = editor("ab\ncd");
    let mut cb = MemoryClipboard::new();
    assert!(editor.handle_key(KeyBinding::ctrl(Key::End), &mut cb));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 2)));
    assert!(editor.handle_key(KeyBinding::shift(Key::Home), &mut cb));
    assert_eq!(editor.anchor(), Some(TextPos::new(1, 2)));
    assert_eq!(editor.caret(), Some(TextPos::new(1, 0)));
    assert!(!editor.handle_key(KeyBinding::plain(Key::Escape), &mut cb));

    editor
        .keymap_mut()
        .bind(KeyBinding::plain(Key::Escape), Command::SelectAll);
    assert!(editor.handle_key(KeyBinding::plain(Key::Escape), &mut cb));
    assert_eq!(
        editor.selection().range(),
        Some((TextPos::ZERO, TextPos::new(1, 2)))
    );
}
