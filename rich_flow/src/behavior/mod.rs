// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing behavior: commands, pointer gestures and scrolling on top of a
//! [`Document`] and a [`SlidingWindowLayout`].
//!
//! [`RichTextEditor`] owns the document, the selection and the layout. Every
//! operation runs to completion before it returns: an edit updates the
//! markers, drains the document's change queue, moves the origin and rebuilds
//! the layout, so geometry queried right after a command is always current.
//!
//! Commands never fail. One whose preconditions are not met (nothing selected,
//! a read-only document, no position at the target) does nothing, and
//! [`RichTextEditor::execute`] returns `false`.

use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use peniko::kurbo::{Point, Rect, Size};

use crate::TextPos;
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::geometry::{self, FlowShape, PixelSnap};
use crate::layout::{LayoutParams, Origin, SlidingWindowLayout, origin_after_change};
use crate::line_box::{LineBox, LineBoxFactory};
use crate::segment::{IcuSegmenter, TextSegmenter};
use crate::selection::{SelectionModel, SelectionSegment};

mod autoscroll;
mod command;
mod editing;
mod keymap;
mod navigation;

pub use autoscroll::{Autoscroll, AutoscrollDirection, AutoscrollSpeed};
pub use command::Command;
pub use keymap::{Key, KeyBinding, KeyMap, Modifiers};

/// A rich text editor over a document of type `D`, laid out by line boxes from `F`.
///
/// Viewport coordinates have their origin at the top left corner of the
/// viewport, content padding included.
pub struct RichTextEditor<D, F, S = IcuSegmenter>
where
    F: LineBoxFactory,
{
    document: D,
    factory: F,
    segmenter: S,
    config: EditorConfig,
    keymap: KeyMap,
    layout: SlidingWindowLayout<F::LineBox>,
    origin: Origin,
    viewport: Size,
    /// Horizontal scroll of the text, always zero when wrapping.
    scroll_x: f64,
    selection: SelectionModel,
    /// Remembered caret x for vertical moves, in viewport coordinates.
    phantom_x: Option<f64>,
    autoscroll: Autoscroll,
    editable: bool,
}

impl<D, F: LineBoxFactory, S> fmt::Debug for RichTextEditor<D, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("origin", &self.origin)
            .field("viewport", &self.viewport)
            .field("scroll_x", &self.scroll_x)
            .field("selection", &self.selection)
            .field("phantom_x", &self.phantom_x)
            .field("autoscroll", &self.autoscroll)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

impl<D: Document, F: LineBoxFactory> RichTextEditor<D, F, IcuSegmenter> {
    /// Creates an editor using ICU4X segmentation.
    pub fn new(document: D, factory: F, config: EditorConfig) -> Self {
        Self::with_segmenter(document, factory, IcuSegmenter::new(), config)
    }
}

impl<D, F, S> RichTextEditor<D, F, S>
where
    D: Document,
    F: LineBoxFactory,
    S: TextSegmenter,
{
    /// Creates an editor with a custom segmenter.
    ///
    /// The caret starts at the beginning of the document and the viewport is
    /// empty until [`set_viewport_size`](Self::set_viewport_size) is called.
    pub fn with_segmenter(
        mut document: D,
        mut factory: F,
        segmenter: S,
        config: EditorConfig,
    ) -> Self {
        // Anything queued before the editor existed is already reflected in the layout.
        document.take_changes();
        let viewport = Size::ZERO;
        let origin = Origin::new(0, -config.content_padding.top);
        let params = layout_params(&config, viewport);
        let layout = SlidingWindowLayout::build(&document, &mut factory, params, origin);
        let mut selection = SelectionModel::new();
        if document.size() > 0 {
            let caret = document.create_marker(TextPos::ZERO);
            selection.set(SelectionSegment::collapsed(caret));
        }
        Self {
            autoscroll: Autoscroll::new(config.auto_scroll_period()),
            origin: layout.origin(),
            document,
            factory,
            segmenter,
            config,
            keymap: KeyMap::default(),
            layout,
            viewport,
            scroll_x: 0.0,
            selection,
            phantom_x: None,
            editable: true,
        }
    }

    // --- MARK: Accessors ---

    /// The document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Runs `f` on the document, then brings the selection and the layout up to date.
    ///
    /// Use this for programmatic edits; the editor's own commands already do it.
    pub fn edit_document<R>(&mut self, f: impl FnOnce(&mut D) -> R) -> R {
        let result = f(&mut self.document);
        self.sync_document();
        result
    }

    /// The line box factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The segmenter.
    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// The configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the configuration and rebuilds the layout.
    pub fn set_config(&mut self, config: EditorConfig) {
        let old_top = self.config.content_padding.top;
        self.autoscroll.set_period(config.auto_scroll_period());
        if config.wrap_text {
            self.scroll_x = 0.0;
        }
        self.config = config;
        if self.origin.index == 0 && self.origin.offset <= -old_top {
            self.origin = self.top_origin();
        }
        self.rebuild_layout();
        self.check_for_excess_whitespace();
    }

    /// The key bindings used by [`handle_key`](Self::handle_key).
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Mutable access to the key bindings.
    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    /// The current layout.
    pub fn layout(&self) -> &SlidingWindowLayout<F::LineBox> {
        &self.layout
    }

    /// The scroll position.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The viewport size.
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Horizontal scroll offset of the text.
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// The selection.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The caret position, if there is a selection.
    pub fn caret(&self) -> Option<TextPos> {
        self.selection.caret()
    }

    /// The anchor position, if there is a selection.
    pub fn anchor(&self) -> Option<TextPos> {
        self.selection.anchor()
    }

    /// The remembered horizontal position for vertical caret moves.
    pub fn phantom_x(&self) -> Option<f64> {
        self.phantom_x
    }

    /// The autoscroll state.
    pub fn autoscroll(&self) -> &Autoscroll {
        &self.autoscroll
    }

    /// Whether editing commands are enabled.
    ///
    /// Edits also require [`Document::is_writable`].
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Enables or disables editing commands.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    // --- MARK: Layout ---

    /// The parameters the layout is built with.
    pub fn layout_params(&self) -> LayoutParams {
        layout_params(&self.config, self.viewport)
    }

    /// Resizes the viewport, rebuilding the layout if it no longer matches.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
        if !self.layout.is_valid(&self.layout_params(), self.origin.index) {
            self.rebuild_layout();
            self.check_for_excess_whitespace();
        }
    }

    fn rebuild_layout(&mut self) {
        let params = self.layout_params();
        self.layout = SlidingWindowLayout::build(
            &self.document,
            &mut self.factory,
            params,
            self.origin,
        );
        self.origin = self.layout.origin();
    }

    fn top_origin(&self) -> Origin {
        Origin::new(0, -self.config.content_padding.top)
    }

    /// Moves the viewport to `origin`.
    pub fn set_origin(&mut self, origin: Origin) {
        if origin != self.origin {
            tracing::debug!(from = ?self.origin, to = ?origin, "origin changed");
            self.origin = origin;
            self.rebuild_layout();
        }
    }

    /// Scrolls by `delta` pixels, positive down, within the realized window.
    ///
    /// Returns `false` if the viewport did not move.
    fn scroll_vertical(&mut self, delta: f64) -> bool {
        match self.layout.compute_origin(delta) {
            Some(origin) => {
                self.set_origin(origin);
                true
            }
            None => false,
        }
    }

    /// Scrolls the viewport by `dy` pixels, positive down.
    ///
    /// Distances beyond the realized window stop at its edge. Returns `false`
    /// if the viewport did not move.
    pub fn scroll_by(&mut self, dy: f64) -> bool {
        self.scroll_vertical(dy)
    }

    /// Scrolls by a number of mouse wheel notches, positive down.
    pub fn scroll_wheel(&mut self, notches: f64) -> bool {
        self.scroll_vertical(notches * self.config.scroll_wheel_step)
    }

    /// Scrolls horizontally by `dx` pixels when wrapping is off.
    pub fn scroll_horizontal(&mut self, dx: f64) -> bool {
        if self.config.wrap_text {
            return false;
        }
        let scroll_x = (self.scroll_x + dx).max(0.0);
        let moved = scroll_x != self.scroll_x;
        self.scroll_x = scroll_x;
        moved
    }

    /// Pulls the content down when the end of the document leaves empty space
    /// at the bottom of the viewport.
    fn check_for_excess_whitespace(&mut self) {
        let Some(last) = self.layout.cells().last() else {
            return;
        };
        if last.index() + 1 != self.document.size() {
            return;
        }
        let bottom = last.bottom() + self.config.content_padding.bottom;
        if bottom >= self.viewport.height {
            return;
        }
        if self.layout.estimated_extent() <= self.viewport.height {
            let top = self.top_origin();
            self.set_origin(top);
        } else {
            self.scroll_vertical(bottom - self.viewport.height);
        }
    }

    /// Scrolls so that the caret is inside the viewport.
    pub fn scroll_caret_to_visible(&mut self) {
        let Some(caret) = self.selection.caret() else {
            return;
        };
        match self.caret_bounds(caret) {
            None => {
                let moving_down = caret.paragraph() > self.origin.index;
                let origin = if caret.paragraph() == 0 {
                    self.top_origin()
                } else {
                    Origin::new(caret.paragraph(), 0.0)
                };
                self.set_origin(origin);
                if moving_down {
                    if let Some(bounds) = self.caret_bounds(caret) {
                        self.scroll_vertical(bounds.y1 - self.viewport.height);
                    }
                }
                self.check_for_excess_whitespace();
            }
            Some(bounds) => {
                if bounds.y0 < 0.0 {
                    self.scroll_vertical(bounds.y0);
                } else if bounds.y1 > self.viewport.height {
                    self.scroll_vertical(bounds.y1 - self.viewport.height);
                }
                if !self.config.wrap_text {
                    self.scroll_horizontal_to_visible(bounds);
                }
            }
        }
    }

    fn scroll_horizontal_to_visible(&mut self, bounds: Rect) {
        let padding = self.config.content_padding;
        let width = (self.viewport.width - padding.left - padding.right).max(0.0);
        let guard = self.config.horizontal_guard;
        let left = bounds.x0 - padding.left;
        let right = bounds.x1 - padding.left;
        if left < 0.0 {
            self.scroll_x = (self.scroll_x + left - guard).max(0.0);
        } else if right > width {
            self.scroll_x = self.scroll_x + right - width + guard;
        }
    }

    // --- MARK: Geometry ---

    /// Horizontal offset passed to the geometry functions: the text scroll
    /// minus the left padding.
    fn text_scroll(&self) -> f64 {
        self.scroll_x - self.config.content_padding.left
    }

    /// Unsnapped caret bounds in viewport coordinates.
    fn caret_bounds(&self, pos: TextPos) -> Option<Rect> {
        geometry::caret_geometry(&self.layout, pos, true, self.text_scroll(), PixelSnap::None)
            .map(|shape| shape.bounds)
    }

    /// The caret outline for rendering, or `None` if the caret is outside the realized window.
    pub fn caret_geometry(&self) -> Option<FlowShape> {
        let caret = self.selection.caret()?;
        geometry::caret_geometry(
            &self.layout,
            caret,
            true,
            self.text_scroll(),
            self.config.caret_snap,
        )
    }

    /// Calls `f` with the highlight outline of every realized paragraph in the selection.
    pub fn selection_geometry_with(&self, f: impl FnMut(usize, FlowShape)) {
        let Some((start, end)) = self.selection.range() else {
            return;
        };
        geometry::selection_geometry(
            &self.layout,
            start,
            end,
            self.text_scroll(),
            self.config.caret_snap,
            f,
        );
    }

    /// The highlight outlines of the selection, one per realized paragraph.
    pub fn selection_geometry(&self) -> Vec<(usize, FlowShape)> {
        let mut shapes = Vec::new();
        self.selection_geometry_with(|index, shape| shapes.push((index, shape)));
        shapes
    }

    /// The position at `point` in viewport coordinates, if it is inside the realized window.
    fn text_pos_at_exact(&self, point: Point) -> Option<TextPos> {
        self.layout.text_pos_at(Point::new(point.x + self.text_scroll(), point.y))
    }

    /// The position nearest to `point`, in viewport coordinates.
    ///
    /// Points above or below the realized window resolve to its first or last
    /// paragraph. Returns `None` only for an empty layout.
    pub fn text_pos_at_viewport(&self, point: Point) -> Option<TextPos> {
        if let Some(pos) = self.text_pos_at_exact(point) {
            return Some(pos);
        }
        let first = self.layout.cells().first()?;
        let cell = if point.y < first.y() {
            first
        } else {
            self.layout.cells().last()?
        };
        let local = Point::new(
            point.x + self.text_scroll(),
            (point.y - cell.y()).clamp(0.0, cell.height()),
        );
        let offset = cell.line_box().offset_at_point(local);
        Some(TextPos::new(cell.index(), offset))
    }

    // --- MARK: Selection ---

    /// Selects `anchor..caret`, in either order.
    pub fn select(&mut self, anchor: TextPos, caret: TextPos) {
        let anchor = self.document.create_marker(anchor);
        let caret = if anchor.position() == self.document.clamp(caret) {
            anchor.clone()
        } else {
            self.document.create_marker(caret)
        };
        self.selection.set(SelectionSegment::from_anchor_caret(anchor, caret));
    }

    /// Places the caret at `pos` with nothing selected.
    pub fn set_caret(&mut self, pos: TextPos) {
        self.select(pos, pos);
    }

    /// Moves the caret to `pos`, keeping the anchor.
    pub fn extend_selection(&mut self, pos: TextPos) {
        let caret = self.document.create_marker(pos);
        let next = match self.selection.segment() {
            Some(segment) => segment.extend(caret),
            None => SelectionSegment::collapsed(caret),
        };
        self.selection.set(next);
    }

    /// Selects or extends to `pos`, then scrolls the caret into view.
    fn move_caret(&mut self, pos: TextPos, extend: bool) {
        if extend {
            self.extend_selection(pos);
        } else {
            self.set_caret(pos);
        }
        self.scroll_caret_to_visible();
    }

    // --- MARK: Commands ---

    /// Runs `command`. Returns `false` if it had no effect.
    pub fn execute(&mut self, command: Command, clipboard: &mut dyn Clipboard) -> bool {
        use Command as C;

        tracing::trace!(?command, "executing command");
        let done = match command {
            C::MoveLeft => self.move_character(false, false),
            C::MoveRight => self.move_character(true, false),
            C::MoveUp => self.move_vertically(-1.0, false),
            C::MoveDown => self.move_vertically(1.0, false),
            C::PageUp => self.move_vertically(-self.viewport.height, false),
            C::PageDown => self.move_vertically(self.viewport.height, false),
            C::MoveWordPrevious => self.move_word(navigation::WordTarget::PreviousStart, false),
            C::MoveWordNext => self.move_word(navigation::WordTarget::NextStart, false),
            C::MoveWordNextEnd => self.move_word(navigation::WordTarget::NextEnd, false),
            C::MoveToLineStart => self.move_to_line_edge(true, false),
            C::MoveToLineEnd => self.move_to_line_edge(false, false),
            C::MoveToParagraphStart => self.move_to_paragraph_edge(true, false),
            C::MoveToParagraphEnd => self.move_to_paragraph_edge(false, false),
            C::MoveParagraphUp => self.move_paragraph(false, false),
            C::MoveParagraphDown => self.move_paragraph(true, false),
            C::MoveToDocumentStart => self.move_to_document_edge(true, false),
            C::MoveToDocumentEnd => self.move_to_document_edge(false, false),

            C::SelectLeft => self.move_character(false, true),
            C::SelectRight => self.move_character(true, true),
            C::SelectUp => self.move_vertically(-1.0, true),
            C::SelectDown => self.move_vertically(1.0, true),
            C::SelectPageUp => self.move_vertically(-self.viewport.height, true),
            C::SelectPageDown => self.move_vertically(self.viewport.height, true),
            C::SelectWordPrevious => self.move_word(navigation::WordTarget::PreviousStart, true),
            C::SelectWordNext => self.move_word(navigation::WordTarget::NextStart, true),
            C::SelectWordNextEnd => self.move_word(navigation::WordTarget::NextEnd, true),
            C::SelectToLineStart => self.move_to_line_edge(true, true),
            C::SelectToLineEnd => self.move_to_line_edge(false, true),
            C::SelectToParagraphStart => self.move_to_paragraph_edge(true, true),
            C::SelectToParagraphEnd => self.move_to_paragraph_edge(false, true),
            C::SelectParagraphUp => self.move_paragraph(false, true),
            C::SelectParagraphDown => self.move_paragraph(true, true),
            C::SelectToDocumentStart => self.move_to_document_edge(true, true),
            C::SelectToDocumentEnd => self.move_to_document_edge(false, true),

            C::SelectAll => self.select_all(),
            C::SelectLine | C::SelectParagraph => self.select_paragraph(),
            C::SelectWord => self.select_word(),
            C::Deselect => self.deselect(),

            C::Backspace => self.backspace(),
            C::Delete => self.delete(),
            C::DeleteWordPrevious => self.delete_word(navigation::WordTarget::PreviousStart),
            C::DeleteWordNextStart => self.delete_word(navigation::WordTarget::NextStart),
            C::DeleteWordNextEnd => self.delete_word(navigation::WordTarget::NextEnd),
            C::DeleteParagraph => self.delete_paragraph(),
            C::DeleteParagraphStart => self.delete_paragraph_start(),
            C::InsertLineBreak => self.replace_selection("\n"),
            C::InsertTab => {
                let tab = self.config.tab_text.clone();
                self.replace_selection(&tab)
            }

            C::Copy => self.copy(clipboard),
            C::Cut => self.cut(clipboard),
            C::Paste => self.paste(clipboard),
            C::PastePlainText => self.paste_plain_text(clipboard),
            C::Undo => self.undo(),
            C::Redo => self.redo(),
        };
        if !done {
            tracing::trace!(?command, "command had no effect");
        }
        done
    }

    /// Runs the command bound to `binding`, if any.
    pub fn handle_key(&mut self, binding: KeyBinding, clipboard: &mut dyn Clipboard) -> bool {
        match self.keymap.get(binding) {
            Some(command) => self.execute(command, clipboard),
            None => false,
        }
    }

    // --- MARK: Pointer ---

    /// Places the caret at `point`, or extends the selection to it.
    pub fn pointer_pressed(&mut self, point: Point, extend: bool) -> bool {
        self.autoscroll.cancel();
        self.phantom_x = None;
        let Some(pos) = self.text_pos_at_viewport(point) else {
            return false;
        };
        if extend {
            self.extend_selection(pos);
        } else {
            self.set_caret(pos);
        }
        true
    }

    /// Extends the selection to `point`.
    ///
    /// Dragging above or below the viewport arms autoscroll instead; the
    /// selection then follows the viewport edge on every [`tick`](Self::tick).
    pub fn pointer_dragged(&mut self, point: Point) {
        let height = self.viewport.height;
        let threshold = self.config.auto_scroll_fast_threshold;
        let outside = if point.y < 0.0 {
            Some((AutoscrollDirection::Up, -point.y))
        } else if point.y > height {
            Some((AutoscrollDirection::Down, point.y - height))
        } else {
            None
        };
        match outside {
            Some((direction, distance)) => {
                let speed = if distance > threshold {
                    AutoscrollSpeed::Fast
                } else {
                    AutoscrollSpeed::Slow
                };
                self.autoscroll.arm(direction, speed, point.x);
            }
            None => {
                self.autoscroll.cancel();
                if let Some(pos) = self.text_pos_at_viewport(point) {
                    self.extend_selection(pos);
                }
            }
        }
    }

    /// Ends a drag. No autoscroll tick runs after this.
    pub fn pointer_released(&mut self) {
        self.autoscroll.cancel();
        self.phantom_x = None;
    }

    /// Selects the word at `point`.
    pub fn double_click(&mut self, point: Point) -> bool {
        self.pointer_pressed(point, false) && self.select_word()
    }

    /// Selects the paragraph at `point`.
    pub fn triple_click(&mut self, point: Point) -> bool {
        self.pointer_pressed(point, false) && self.select_paragraph()
    }

    /// Advances autoscroll by `dt`. Returns `true` if any tick ran.
    ///
    /// Each tick scrolls by one step and then extends the selection to the
    /// viewport edge the pointer left through.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let ticks = self.autoscroll.advance(dt);
        for _ in 0..ticks {
            self.autoscroll_step();
        }
        ticks > 0
    }

    fn autoscroll_step(&mut self) {
        let step = match self.autoscroll.speed() {
            AutoscrollSpeed::Slow => self.config.auto_scroll_step_slow,
            AutoscrollSpeed::Fast => self.config.auto_scroll_step_fast,
        };
        let (delta, edge) = match self.autoscroll.direction() {
            AutoscrollDirection::Idle => return,
            AutoscrollDirection::Up => (-step, 0.0),
            AutoscrollDirection::Down => (step, self.viewport.height),
        };
        self.scroll_vertical(delta);
        let x = self.autoscroll.pointer_x().max(0.0);
        if let Some(pos) = self.text_pos_at_viewport(Point::new(x, edge)) {
            self.extend_selection(pos);
        }
    }

    /// Applies queued document changes to the origin, the selection and the layout.
    fn sync_document(&mut self) {
        let changes = self.document.take_changes();
        if changes.is_empty() {
            return;
        }
        let origin = changes.iter().fold(self.origin, origin_after_change);
        if origin != self.origin {
            tracing::debug!(from = ?self.origin, to = ?origin, "origin moved by edit");
        }
        self.origin = origin;
        self.selection.revalidate();
        self.rebuild_layout();
        self.check_for_excess_whitespace();
    }
}

fn layout_params(config: &EditorConfig, viewport: Size) -> LayoutParams {
    LayoutParams {
        viewport_width: viewport.width,
        viewport_height: viewport.height,
        line_spacing: config.line_spacing,
        padding: config.content_padding,
        wrap: config.wrap_text,
        window_extent: config.sliding_window_extent,
    }
}
