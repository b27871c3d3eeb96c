// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod documents;

pub(crate) use documents::RepeatedDocument;

use peniko::kurbo::Size;
use rich_flow::{
    Command, Document, EditorConfig, FixedPitchFactory, MemoryClipboard, PlainDocument,
    RichTextEditor,
};

/// Width of every character laid out by the test factory.
pub(crate) const CHAR_WIDTH: f64 = 10.0;
/// Height of every row laid out by the test factory.
pub(crate) const LINE_HEIGHT: f64 = 20.0;

pub(crate) type TestEditor<D = PlainDocument> = RichTextEditor<D, FixedPitchFactory>;

/// Builds editors over a fixed pitch factory and a 200×100 viewport.
pub(crate) struct EditorBuilder {
    config: EditorConfig,
    viewport: Size,
}

impl EditorBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: EditorConfig::default(),
            viewport: Size::new(200.0, 100.0),
        }
    }

    pub(crate) fn config(mut self, f: impl FnOnce(&mut EditorConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub(crate) fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub(crate) fn build(self, text: &str) -> TestEditor {
        self.build_document(PlainDocument::from_text(text))
    }

    pub(crate) fn build_document<D: Document>(self, document: D) -> TestEditor<D> {
        let mut editor = RichTextEditor::new(
            document,
            FixedPitchFactory::new(CHAR_WIDTH, LINE_HEIGHT),
            self.config,
        );
        editor.set_viewport_size(self.viewport);
        editor
    }
}

/// An editor over `text` with the default configuration.
pub(crate) fn editor(text: &str) -> TestEditor {
    EditorBuilder::new().build(text)
}

/// `count` short paragraphs, `line 0` to `line {count - 1}`.
pub(crate) fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs `command` against a scratch clipboard.
pub(crate) fn run<D: Document>(editor: &mut TestEditor<D>, command: Command) -> bool {
    editor.execute(command, &mut MemoryClipboard::new())
}
