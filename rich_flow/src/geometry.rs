// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret and selection outlines in viewport coordinates.
//!
//! Line boxes report shapes in cell-local coordinates. The functions here
//! translate them by the horizontal scroll offset and the cell's vertical
//! offset, and snap the result so that one pixel wide carets stay crisp.

use peniko::kurbo::{BezPath, PathEl, Point, Rect, Shape, Vec2};

use crate::TextPos;
use crate::layout::SlidingWindowLayout;
use crate::line_box::LineBox;

/// Carets shorter than this are treated as a dot and stretched to the line height.
const MIN_CARET_HEIGHT: f64 = 1.0;

/// Pixel snapping policy for outlines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PixelSnap {
    /// Keep coordinates as reported by the line box.
    None,
    /// Move every coordinate to the nearest half pixel (`n + 0.5`).
    #[default]
    HalfPixel,
}

impl PixelSnap {
    /// Snaps one coordinate.
    pub fn snap(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::HalfPixel => (value - 0.5).round() + 0.5,
        }
    }

    fn snap_point(self, point: Point) -> Point {
        Point::new(self.snap(point.x), self.snap(point.y))
    }
}

/// A translated outline and its bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowShape {
    /// The outline in viewport coordinates.
    pub path: BezPath,
    /// Bounding box of `path`.
    pub bounds: Rect,
}

impl FlowShape {
    fn new(path: BezPath) -> Self {
        let bounds = path.bounding_box();
        Self { path, bounds }
    }

    /// Horizontal center of the bounds.
    pub fn center_x(&self) -> f64 {
        self.bounds.center().x
    }
}

/// Applies `f` to every point of `path`.
fn map_points(path: &BezPath, f: impl Fn(Point) -> Point) -> BezPath {
    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(f(p)),
            PathEl::LineTo(p) => PathEl::LineTo(f(p)),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(f(p1), f(p2)),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(f(p1), f(p2), f(p3)),
            PathEl::ClosePath => PathEl::ClosePath,
        })
        .collect()
}

fn place(path: &BezPath, translation: Vec2, snap: PixelSnap) -> BezPath {
    map_points(path, |p| snap.snap_point(p + translation))
}

/// The caret outline at `pos`, in viewport coordinates.
///
/// `scroll_x` is the horizontal distance from the text's left edge to the
/// viewport's left edge. Returns `None` if the paragraph is not realized.
///
/// A caret the line box reports as a single point (typical of empty lines) is
/// replaced by a vertical line spanning the visual row it sits on.
pub fn caret_geometry<L: LineBox>(
    layout: &SlidingWindowLayout<L>,
    pos: TextPos,
    leading: bool,
    scroll_x: f64,
    snap: PixelSnap,
) -> Option<FlowShape> {
    let cell = layout.cell(pos.paragraph())?;
    let local = cell.line_box().caret_shape(pos.offset(), leading);
    let shape = FlowShape::new(place(&local, Vec2::new(-scroll_x, cell.y()), snap));
    if shape.bounds.height() >= MIN_CARET_HEIGHT {
        return Some(shape);
    }

    let (top, bottom) = cell.line_box().line_extent(pos.offset(), leading);
    let (top, bottom) = if bottom > top {
        (top, bottom)
    } else {
        (0.0, cell.height())
    };
    let x = shape.bounds.x0;
    let mut path = BezPath::new();
    path.move_to((x, snap.snap(cell.y() + top)));
    path.line_to((x, snap.snap(cell.y() + bottom)));
    Some(FlowShape::new(path))
}

/// Highlight outlines for `start..end`, one per realized paragraph in the range.
///
/// Calls `f` with the paragraph index and its outline. Paragraphs outside the
/// realized window and empty paragraphs produce nothing.
pub fn selection_geometry<L, F>(
    layout: &SlidingWindowLayout<L>,
    start: TextPos,
    end: TextPos,
    scroll_x: f64,
    snap: PixelSnap,
    mut f: F,
) where
    L: LineBox,
    F: FnMut(usize, FlowShape),
{
    for cell in layout.cells() {
        let index = cell.index();
        if index < start.paragraph() || index > end.paragraph() {
            continue;
        }
        let from = if index == start.paragraph() {
            start.offset()
        } else {
            0
        };
        let to = if index == end.paragraph() {
            end.offset()
        } else {
            cell.line_box().text_len()
        };
        let local = cell.line_box().range_shape(from, to);
        if local.elements().is_empty() {
            continue;
        }
        f(
            index,
            FlowShape::new(place(&local, Vec2::new(-scroll_x, cell.y()), snap)),
        );
    }
}
