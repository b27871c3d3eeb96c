// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `rich_flow`: a virtualized rich text editing core.
//!
//! The crate keeps the expensive parts of a rich text editor away from the
//! document size: only the paragraphs around the viewport are laid out, and
//! positions survive edits without any rescanning.
//!
//! - [`Document`]: the paragraph-structured content model. [`PlainDocument`]
//!   is an in-memory implementation with styles, undo, and clipboard formats.
//! - [`Marker`]: a shared, live [`TextPos`] that the owning document updates
//!   on every edit.
//! - [`SlidingWindowLayout`]: laid-out paragraphs ([`RealizedCell`]s) covering
//!   the viewport plus a margin, anchored at an [`Origin`].
//! - [`LineBox`] and [`LineBoxFactory`]: the seam to the host's text shaper.
//!   [`FixedPitchFactory`] is a monospace implementation for tests and tools.
//! - [`caret_geometry`] and [`selection_geometry`]: caret and selection shapes
//!   in viewport coordinates.
//! - [`RichTextEditor`]: ties it all together and turns [`Command`]s, pointer
//!   input and autoscroll ticks into selection changes, edits and scrolling.
//!
//! ## Coordinates
//!
//! Text offsets are UTF-8 byte offsets within a paragraph. Layout coordinates
//! are relative to the top of the viewport: the origin paragraph is placed at
//! `-origin.offset`, and everything else follows downwards.
//!
//! ## Example
//!
//! ```
//! use peniko::kurbo::Size;
//! use rich_flow::{
//!     Command, EditorConfig, FixedPitchFactory, MemoryClipboard, PlainDocument, RichTextEditor,
//!     TextPos,
//! };
//!
//! let mut editor = RichTextEditor::new(
//!     PlainDocument::from_text("hello\nworld"),
//!     FixedPitchFactory::new(8.0, 16.0),
//!     EditorConfig::default(),
//! );
//! editor.set_viewport_size(Size::new(320.0, 200.0));
//!
//! let mut clipboard = MemoryClipboard::new();
//! editor.execute(Command::MoveToDocumentEnd, &mut clipboard);
//! editor.insert_text("!");
//! assert_eq!(editor.document().text(), "hello\nworld!");
//! assert_eq!(editor.caret(), Some(TextPos::new(1, 6)));
//! ```

extern crate alloc;

mod marker;
mod position;

pub mod behavior;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod line_box;
pub mod segment;
pub mod selection;

pub use behavior::{
    Autoscroll, AutoscrollDirection, AutoscrollSpeed, Command, Key, KeyBinding, KeyMap,
    Modifiers, RichTextEditor,
};
pub use clipboard::{Clipboard, ClipboardContent, MemoryClipboard};
pub use config::EditorConfig;
pub use document::{ChangeKind, ContentChange, DataFormat, Document, PlainDocument, StyleAttributes};
pub use error::{ConfigError, DocumentError, SelectionError};
pub use geometry::{FlowShape, PixelSnap, caret_geometry, selection_geometry};
pub use layout::{Insets, LayoutParams, Origin, RealizedCell, SlidingWindowLayout};
pub use line_box::{FixedPitchFactory, FixedPitchLineBox, LineBox, LineBoxFactory};
pub use marker::{Marker, MarkerRegistry, TextEdit};
pub use position::TextPos;
pub use segment::{IcuSegmenter, TextSegmenter};
pub use selection::{SelectionModel, SelectionSegment};
