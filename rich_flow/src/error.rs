// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Editing commands never fail: a command whose preconditions are not met is a
//! no-op. The errors here come from constructing values that would break an
//! invariant, from the document layer rejecting a request, and from loading
//! configuration.

use alloc::string::String;

use crate::TextPos;
use crate::document::DataFormat;

/// A selection segment could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The lower end of an ordered segment is after its upper end.
    #[error("selection start {min} is after selection end {max}")]
    Unordered {
        /// The requested lower end.
        min: TextPos,
        /// The requested upper end.
        max: TextPos,
    },
}

/// A document rejected a read or an edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// The position does not exist in the document.
    #[error("position {pos} is outside the document ({size} paragraphs)")]
    OutOfRange {
        /// The rejected position.
        pos: TextPos,
        /// The number of paragraphs at the time of the request.
        size: usize,
    },
    /// The range end precedes its start.
    #[error("range {start}..{end} is reversed")]
    InvalidRange {
        /// Start of the rejected range.
        start: TextPos,
        /// End of the rejected range.
        end: TextPos,
    },
    /// The offset splits a UTF-8 sequence.
    #[error("position {pos} is not on a character boundary")]
    NotOnCharBoundary {
        /// The rejected position.
        pos: TextPos,
    },
    /// The document does not accept edits.
    #[error("document is read-only")]
    ReadOnly,
    /// The document cannot import or export the format.
    #[error("data format {0:?} is not supported")]
    UnsupportedFormat(DataFormat),
    /// An import payload could not be decoded.
    #[error("failed to decode {format:?} payload: {reason}")]
    Decode {
        /// The format being imported.
        format: DataFormat,
        /// Decoder message.
        reason: String,
    },
}

/// Configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration source is not valid JSON for [`EditorConfig`](crate::EditorConfig).
    #[error("invalid editor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
