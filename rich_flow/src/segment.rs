// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grapheme and word segmentation.
//!
//! Navigation never inspects characters itself: grapheme steps and word
//! boundaries come from a [`TextSegmenter`]. The word methods work on a single
//! paragraph and never cross its ends.

use core::fmt;

use icu_segmenter::options::WordBreakInvariantOptions;
use icu_segmenter::{
    GraphemeClusterSegmenter, GraphemeClusterSegmenterBorrowed, WordSegmenter,
    WordSegmenterBorrowed,
};
use smallvec::SmallVec;

/// One segment between two consecutive word boundaries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WordSegment {
    /// Byte offset of the segment start.
    pub start: usize,
    /// Byte offset of the segment end.
    pub end: usize,
    /// Whether the segment is a word (letters, numbers, ideographs), as
    /// opposed to whitespace or punctuation.
    pub is_word: bool,
}

/// Word segments of one paragraph.
pub type WordSegments = SmallVec<[WordSegment; 16]>;

/// Locale-aware text segmentation.
pub trait TextSegmenter {
    /// The grapheme boundary after `offset`, or `None` at the end of `text`.
    fn next_grapheme(&self, text: &str, offset: usize) -> Option<usize>;

    /// The grapheme boundary before `offset`, or `None` at the start of `text`.
    fn previous_grapheme(&self, text: &str, offset: usize) -> Option<usize>;

    /// Splits `text` at every word boundary.
    fn word_segments(&self, text: &str) -> WordSegments;

    /// Start of the closest word starting before `offset`, or `0`.
    fn previous_word_start(&self, text: &str, offset: usize) -> usize {
        self.word_segments(text)
            .iter()
            .rev()
            .find(|s| s.is_word && s.start < offset)
            .map_or(0, |s| s.start)
    }

    /// Start of the closest word starting after `offset`, or the end of `text`.
    fn next_word_start(&self, text: &str, offset: usize) -> usize {
        self.word_segments(text)
            .iter()
            .find(|s| s.is_word && s.start > offset)
            .map_or(text.len(), |s| s.start)
    }

    /// End of the closest word ending after `offset`, or the end of `text`.
    fn next_word_end(&self, text: &str, offset: usize) -> usize {
        self.word_segments(text)
            .iter()
            .find(|s| s.is_word && s.end > offset)
            .map_or(text.len(), |s| s.end)
    }

    /// The boundaries of the segment containing `offset`.
    ///
    /// At the end of the text this is the last segment. Returns `None` for
    /// empty text.
    fn segment_around(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let segments = self.word_segments(text);
        segments
            .iter()
            .find(|s| s.start <= offset && offset < s.end)
            .or_else(|| segments.last().filter(|s| s.end == offset))
            .map(|s| (s.start, s.end))
    }
}

/// A [`TextSegmenter`] backed by ICU4X with compiled Unicode data.
///
/// Word segmentation uses the automatic model selection of `icu_segmenter`,
/// so text in scripts without spaces still breaks into words.
pub struct IcuSegmenter {
    graphemes: GraphemeClusterSegmenterBorrowed<'static>,
    words: WordSegmenterBorrowed<'static>,
}

impl fmt::Debug for IcuSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuSegmenter").finish_non_exhaustive()
    }
}

impl Default for IcuSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl IcuSegmenter {
    /// Creates a segmenter.
    pub fn new() -> Self {
        Self {
            graphemes: GraphemeClusterSegmenter::new(),
            words: WordSegmenter::new_auto(WordBreakInvariantOptions::default()),
        }
    }
}

impl TextSegmenter for IcuSegmenter {
    fn next_grapheme(&self, text: &str, offset: usize) -> Option<usize> {
        self.graphemes.segment_str(text).find(|b| *b > offset)
    }

    fn previous_grapheme(&self, text: &str, offset: usize) -> Option<usize> {
        self.graphemes
            .segment_str(text)
            .take_while(|b| *b < offset)
            .last()
    }

    fn word_segments(&self, text: &str) -> WordSegments {
        let mut segments = WordSegments::new();
        let mut boundaries = self.words.segment_str(text);
        let mut start = 0;
        while let Some(boundary) = boundaries.next() {
            if boundary == 0 {
                continue;
            }
            segments.push(WordSegment {
                start,
                end: boundary,
                is_word: boundaries.is_word_like(),
            });
            start = boundary;
        }
        segments
    }
}
