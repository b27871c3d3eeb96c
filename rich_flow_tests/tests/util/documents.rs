// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic documents.

use std::borrow::Cow;

use rich_flow::{
    ContentChange, DataFormat, Document, DocumentError, Marker, MarkerRegistry, StyleAttributes,
    TextPos,
};

/// A read-only document of `size` identical paragraphs, without storing them.
pub(crate) struct RepeatedDocument {
    size: usize,
    text: &'static str,
    markers: MarkerRegistry,
}

impl RepeatedDocument {
    pub(crate) fn new(size: usize, text: &'static str) -> Self {
        Self {
            size,
            text,
            markers: MarkerRegistry::new(),
        }
    }
}

impl Document for RepeatedDocument {
    fn size(&self) -> usize {
        self.size
    }

    fn plain_text(&self, index: usize) -> Cow<'_, str> {
        if index < self.size {
            Cow::Borrowed(self.text)
        } else {
            Cow::Borrowed("")
        }
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn replace(
        &mut self,
        _start: TextPos,
        _end: TextPos,
        _text: &str,
    ) -> Result<TextPos, DocumentError> {
        Err(DocumentError::ReadOnly)
    }

    fn apply_style(
        &mut self,
        _start: TextPos,
        _end: TextPos,
        _attrs: &StyleAttributes,
    ) -> Result<(), DocumentError> {
        Err(DocumentError::ReadOnly)
    }

    fn create_marker(&mut self, pos: TextPos) -> Marker {
        let pos = self.clamp(pos);
        self.markers.create(pos)
    }

    fn supported_export_formats(&self) -> &[DataFormat] {
        &[DataFormat::PLAIN_TEXT]
    }

    fn supported_import_formats(&self) -> &[DataFormat] {
        &[]
    }

    fn export(
        &self,
        start: TextPos,
        end: TextPos,
        format: DataFormat,
    ) -> Result<Vec<u8>, DocumentError> {
        if format != DataFormat::PLAIN_TEXT {
            return Err(DocumentError::UnsupportedFormat(format));
        }
        let mut text = String::new();
        for index in start.paragraph()..=end.paragraph() {
            let from = if index == start.paragraph() { start.offset() } else { 0 };
            let to = if index == end.paragraph() { end.offset() } else { self.text.len() };
            if index != start.paragraph() {
                text.push('\n');
            }
            text.push_str(&self.text[from..to]);
        }
        Ok(text.into_bytes())
    }

    fn import(
        &mut self,
        _start: TextPos,
        _end: TextPos,
        format: DataFormat,
        _data: &[u8],
    ) -> Result<TextPos, DocumentError> {
        Err(DocumentError::UnsupportedFormat(format))
    }

    fn take_changes(&mut self) -> Vec<ContentChange> {
        Vec::new()
    }
}
