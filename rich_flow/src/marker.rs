// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-owned markers that track a logical location across edits.
//!
//! A [`Marker`] is a shared handle to a position cell registered with a
//! [`MarkerRegistry`]. The document owns the registry and runs
//! [`MarkerRegistry::apply_edit`] exactly once per [`TextEdit`], updating
//! every live marker before the edit is reported to anyone else.
//!
//! Holders keep the marker alive by keeping a clone of the handle. Once the
//! last handle is dropped the registry forgets the marker on its next pass;
//! there is no explicit release call.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp::Ordering;
use core::fmt;

use crate::TextPos;

/// The shape of a single `replace(start, end, content)` operation.
///
/// `inserted_end` is the position just past the inserted content once the edit
/// has been applied. For a pure deletion it equals `start`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    start: TextPos,
    end: TextPos,
    inserted_end: TextPos,
}

impl TextEdit {
    /// Creates an edit replacing `start..end` with content ending at `inserted_end`.
    pub fn new(start: TextPos, end: TextPos, inserted_end: TextPos) -> Self {
        debug_assert!(start <= end, "edit range {start}..{end} is reversed");
        debug_assert!(
            start <= inserted_end,
            "inserted content ends at {inserted_end}, before the edit start {start}"
        );
        Self {
            start,
            end,
            inserted_end,
        }
    }

    /// Creates an edit replacing `start..end` with `text`, where `\n` separates paragraphs.
    pub fn from_text(start: TextPos, end: TextPos, text: &str) -> Self {
        Self::new(start, end, inserted_end(start, text))
    }

    /// Start of the replaced range.
    pub fn start(&self) -> TextPos {
        self.start
    }

    /// End (exclusive) of the replaced range, in pre-edit coordinates.
    pub fn end(&self) -> TextPos {
        self.end
    }

    /// End of the inserted content, in post-edit coordinates.
    pub fn inserted_end(&self) -> TextPos {
        self.inserted_end
    }

    /// Net number of paragraphs added (negative when paragraphs were removed).
    pub fn paragraph_delta(&self) -> isize {
        (self.inserted_end.paragraph() - self.start.paragraph()) as isize
            - (self.end.paragraph() - self.start.paragraph()) as isize
    }

    /// Maps a pre-edit position to its post-edit location.
    ///
    /// - before `start`: unchanged;
    /// - inside `start..end`: collapses to `start`;
    /// - at or after `end`: shifted so that it keeps its distance from the end of
    ///   the replaced range, measured from `inserted_end`.
    pub fn map(&self, pos: TextPos) -> TextPos {
        if pos < self.start {
            pos
        } else if pos < self.end {
            self.start
        } else if pos.paragraph() == self.end.paragraph() {
            TextPos::new(
                self.inserted_end.paragraph(),
                self.inserted_end.offset() + (pos.offset() - self.end.offset()),
            )
        } else {
            TextPos::new(
                pos.paragraph() - self.end.paragraph() + self.inserted_end.paragraph(),
                pos.offset(),
            )
        }
    }
}

/// Returns the position just past `text` when inserted at `start`.
pub(crate) fn inserted_end(start: TextPos, text: &str) -> TextPos {
    match text.rfind('\n') {
        None => TextPos::new(start.paragraph(), start.offset() + text.len()),
        Some(last_break) => {
            let breaks = text.bytes().filter(|b| *b == b'\n').count();
            TextPos::new(start.paragraph() + breaks, text.len() - last_break - 1)
        }
    }
}

/// A handle to a document location that moves with edits.
///
/// Cloning a marker shares the underlying location: all clones observe the same
/// updates. Markers compare by their current position.
#[derive(Clone)]
pub struct Marker {
    pos: Rc<Cell<TextPos>>,
}

impl Marker {
    /// The marker's current position.
    pub fn position(&self) -> TextPos {
        self.pos.get()
    }

    /// Returns `true` if both handles refer to the same marker.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pos, &other.pos)
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Marker").field(&self.position()).finish()
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for Marker {}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Marker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

/// The set of live markers belonging to one document.
///
/// Markers are kept in creation order. Dropped markers are pruned lazily during
/// [`apply_edit`](Self::apply_edit) and when the list grows past a threshold.
#[derive(Default)]
pub struct MarkerRegistry {
    markers: Vec<Weak<Cell<TextPos>>>,
    prune_at: usize,
}

impl fmt::Debug for MarkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerRegistry")
            .field("live", &self.live_count())
            .field("tracked", &self.markers.len())
            .finish_non_exhaustive()
    }
}

impl MarkerRegistry {
    const MIN_PRUNE_THRESHOLD: usize = 32;

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a marker at `pos` and starts tracking it.
    pub fn create(&mut self, pos: TextPos) -> Marker {
        if self.markers.len() >= self.prune_at.max(Self::MIN_PRUNE_THRESHOLD) {
            self.prune();
            self.prune_at = self.markers.len() * 2;
        }
        let cell = Rc::new(Cell::new(pos));
        self.markers.push(Rc::downgrade(&cell));
        Marker { pos: cell }
    }

    /// Number of markers that still have at least one holder.
    pub fn live_count(&self) -> usize {
        self.markers.iter().filter(|m| m.strong_count() > 0).count()
    }

    /// Moves every live marker according to `edit`.
    ///
    /// `limit` maps a position to the nearest valid position in the post-edit
    /// document. A marker that would land out of range is a logic error: it
    /// trips a debug assertion, and is clamped in release builds.
    pub fn apply_edit(&mut self, edit: &TextEdit, limit: impl Fn(TextPos) -> TextPos) {
        self.markers.retain(|weak| {
            let Some(cell) = weak.upgrade() else {
                return false;
            };
            let moved = edit.map(cell.get());
            let clamped = limit(moved);
            if clamped != moved {
                debug_assert_eq!(
                    clamped, moved,
                    "marker update for {edit:?} left the document"
                );
                tracing::warn!(%moved, %clamped, "clamped out-of-range marker");
            }
            cell.set(clamped);
            true
        });
    }

    fn prune(&mut self) {
        self.markers.retain(|m| m.strong_count() > 0);
    }
}
