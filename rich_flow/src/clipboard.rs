// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard access.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::document::DataFormat;

/// Data placed on the clipboard, one payload per format.
///
/// Formats keep the order they were added in, most preferred first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    entries: Vec<(DataFormat, Vec<u8>)>,
}

impl ClipboardContent {
    /// Creates empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the payload for `format`.
    pub fn insert(&mut self, format: DataFormat, data: Vec<u8>) {
        match self.entries.iter_mut().find(|(f, _)| *f == format) {
            Some((_, existing)) => *existing = data,
            None => self.entries.push((format, data)),
        }
    }

    /// The payload for `format`.
    pub fn get(&self, format: DataFormat) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, data)| data.as_slice())
    }

    /// Returns `true` if there is no payload.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The formats present, in insertion order.
    pub fn formats(&self) -> impl Iterator<Item = DataFormat> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }
}

/// A system or application clipboard.
pub trait Clipboard {
    /// Returns `true` if the clipboard holds data in `format`.
    fn has_format(&self, format: DataFormat) -> bool;

    /// Reads the data in `format`, if present.
    fn read(&mut self, format: DataFormat) -> Option<Vec<u8>>;

    /// Replaces the clipboard contents.
    fn write(&mut self, content: ClipboardContent);
}

/// An in-process clipboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    data: HashMap<DataFormat, Vec<u8>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clipboard holding `text` as [`DataFormat::PLAIN_TEXT`].
    pub fn with_text(text: &str) -> Self {
        let mut clipboard = Self::new();
        clipboard
            .data
            .insert(DataFormat::PLAIN_TEXT, text.as_bytes().to_vec());
        clipboard
    }

    /// The clipboard text, if it holds valid UTF-8 plain text.
    pub fn text(&self) -> Option<&str> {
        self.data
            .get(&DataFormat::PLAIN_TEXT)
            .and_then(|data| core::str::from_utf8(data).ok())
    }

    /// Returns `true` if the clipboard is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Clipboard for MemoryClipboard {
    fn has_format(&self, format: DataFormat) -> bool {
        self.data.contains_key(&format)
    }

    fn read(&mut self, format: DataFormat) -> Option<Vec<u8>> {
        self.data.get(&format).cloned()
    }

    fn write(&mut self, content: ClipboardContent) {
        self.data = content.entries.into_iter().collect();
    }
}
