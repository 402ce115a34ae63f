//! Hit-testing and rectangle geometry.
//!
//! Pure functions over canvas-space coordinates: normalizing two drag
//! corners into a rectangle, classifying a pointer position against a box
//! into a [`Zone`], and applying per-zone resize/move deltas.

use serde::{Deserialize, Serialize};

use crate::constants::{HIT_MARGIN, MIN_BOX_SIZE};

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge X coordinate
    pub left: f32,
    /// Top edge Y coordinate
    pub top: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

/// The part of a box a pointer position falls on.
///
/// Corners and edges select resize behavior, [`Zone::Inside`] selects move.
/// A point matching no box at all has no zone (see [`classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Inside,
}

/// Cursor family a view layer should show for a hovered zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// Nothing hovered
    #[default]
    Default,
    /// Interior: translate the box
    Move,
    /// Top-left / bottom-right diagonal resize
    ResizeNwSe,
    /// Top-right / bottom-left diagonal resize
    ResizeNeSw,
    /// Horizontal resize (left/right edges)
    ResizeEw,
    /// Vertical resize (top/bottom edges)
    ResizeNs,
}

impl Zone {
    /// Map this zone to the cursor a view layer should display.
    pub fn cursor_hint(self) -> CursorHint {
        match self {
            Zone::Inside => CursorHint::Move,
            Zone::TopLeft | Zone::BottomRight => CursorHint::ResizeNwSe,
            Zone::TopRight | Zone::BottomLeft => CursorHint::ResizeNeSw,
            Zone::Left | Zone::Right => CursorHint::ResizeEw,
            Zone::Top | Zone::Bottom => CursorHint::ResizeNs,
        }
    }
}

/// A successful hit: which box (registry index) and which zone of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index of the box in registry order.
    pub index: usize,
    /// The zone of that box the point landed on.
    pub zone: Zone,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalize two arbitrary drag corners into a canonical rectangle.
    ///
    /// Width and height get `+1` so a zero-drag click still yields a 1x1
    /// box instead of a degenerate, invisible one.
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        Self {
            left: anchor.x.min(current.x),
            top: anchor.y.min(current.y),
            width: (anchor.x - current.x).abs() + 1.0,
            height: (anchor.y - current.y).abs() + 1.0,
        }
    }

    /// Right edge X coordinate.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge Y coordinate.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Classify a point against this rectangle.
    ///
    /// Checks the four corner bands first, then the four edge-midpoint
    /// bands, then the padded interior, so on a very small box corners win
    /// over edges and edges win over the interior. All bands extend
    /// [`HIT_MARGIN`] from their reference point. Returns `None` when the
    /// point is outside the padded bounds entirely.
    pub fn zone_at(&self, p: Point) -> Option<Zone> {
        let near = |a: f32, b: f32| (a - b).abs() < HIT_MARGIN;
        let center_x = self.left + self.width / 2.0;
        let center_y = self.top + self.height / 2.0;

        if near(p.x, self.left) && near(p.y, self.top) {
            return Some(Zone::TopLeft);
        }
        if near(p.x, self.right()) && near(p.y, self.top) {
            return Some(Zone::TopRight);
        }
        if near(p.x, self.right()) && near(p.y, self.bottom()) {
            return Some(Zone::BottomRight);
        }
        if near(p.x, self.left) && near(p.y, self.bottom()) {
            return Some(Zone::BottomLeft);
        }

        if near(p.x, self.left) && near(p.y, center_y) {
            return Some(Zone::Left);
        }
        if near(p.x, self.right()) && near(p.y, center_y) {
            return Some(Zone::Right);
        }
        if near(p.y, self.top) && near(p.x, center_x) {
            return Some(Zone::Top);
        }
        if near(p.y, self.bottom()) && near(p.x, center_x) {
            return Some(Zone::Bottom);
        }

        let inside = p.x > self.left - HIT_MARGIN
            && p.x < self.right() + HIT_MARGIN
            && p.y > self.top - HIT_MARGIN
            && p.y < self.bottom() + HIT_MARGIN;
        inside.then_some(Zone::Inside)
    }

    /// Apply a per-sample pointer delta to this rectangle for the zone that
    /// was grabbed.
    ///
    /// Corners move two edges, edge midpoints move one, the interior
    /// translates the whole box. Deltas that would shrink a dimension below
    /// [`MIN_BOX_SIZE`] are truncated so the dragged edge never crosses the
    /// opposite one.
    pub fn adjusted(&self, zone: Zone, dx: f32, dy: f32) -> Rect {
        let mut r = *self;
        match zone {
            Zone::TopLeft => {
                r.shift_left_edge(dx);
                r.shift_top_edge(dy);
            }
            Zone::Top => r.shift_top_edge(dy),
            Zone::TopRight => {
                r.grow_width(dx);
                r.shift_top_edge(dy);
            }
            Zone::Right => r.grow_width(dx),
            Zone::BottomRight => {
                r.grow_width(dx);
                r.grow_height(dy);
            }
            Zone::Bottom => r.grow_height(dy),
            Zone::BottomLeft => {
                r.shift_left_edge(dx);
                r.grow_height(dy);
            }
            Zone::Left => r.shift_left_edge(dx),
            Zone::Inside => {
                r.left += dx;
                r.top += dy;
            }
        }
        r
    }

    /// Drag the left edge by `dx`, keeping the right edge fixed.
    fn shift_left_edge(&mut self, dx: f32) {
        let dx = dx.min(self.width - MIN_BOX_SIZE);
        self.left += dx;
        self.width -= dx;
    }

    /// Drag the top edge by `dy`, keeping the bottom edge fixed.
    fn shift_top_edge(&mut self, dy: f32) {
        let dy = dy.min(self.height - MIN_BOX_SIZE);
        self.top += dy;
        self.height -= dy;
    }

    /// Drag the right edge by `dx`, keeping the left edge fixed.
    fn grow_width(&mut self, dx: f32) {
        self.width = (self.width + dx).max(MIN_BOX_SIZE);
    }

    /// Drag the bottom edge by `dy`, keeping the top edge fixed.
    fn grow_height(&mut self, dy: f32) {
        self.height = (self.height + dy).max(MIN_BOX_SIZE);
    }
}

/// Find the first box (in registry order) whose padded region contains the
/// point, and which zone of it was hit.
///
/// Earliest-created boxes win: when two boxes overlap, the one added first
/// claims the point regardless of visual stacking. Returns `None` when no
/// box matches.
pub fn classify<'a>(rects: impl IntoIterator<Item = &'a Rect>, p: Point) -> Option<Hit> {
    rects
        .into_iter()
        .enumerate()
        .find_map(|(index, rect)| rect.zone_at(p).map(|zone| Hit { index, zone }))
}
