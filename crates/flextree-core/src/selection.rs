//! Resize handles and the raw resize math behind them.

use crate::constraints::SizeLimits;
use crate::geometry::{ContainerBounds, ElementPosition, clamp_f64};
use crate::snap::ActiveEdges;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Handle size in canvas pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in canvas pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles around a selected element.
///
/// Serialized with compass names: `nw`, `ne`, `sw`, `se`, `n`, `e`, `s`, `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HandleKind {
    /// Corner handle, resizes both axes.
    Corner(Corner),
    /// Edge midpoint handle, resizes one axis.
    Edge(Edge),
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Edge(Edge::Top),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Edge(Edge::Right),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Edge(Edge::Left),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::Corner(Corner::TopLeft) => "nw",
            HandleKind::Corner(Corner::TopRight) => "ne",
            HandleKind::Corner(Corner::BottomLeft) => "sw",
            HandleKind::Corner(Corner::BottomRight) => "se",
            HandleKind::Edge(Edge::Top) => "n",
            HandleKind::Edge(Edge::Right) => "e",
            HandleKind::Edge(Edge::Bottom) => "s",
            HandleKind::Edge(Edge::Left) => "w",
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left)
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight)
                | HandleKind::Edge(Edge::Right)
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight)
                | HandleKind::Edge(Edge::Bottom)
        )
    }

    /// Whether this handle changes the width at all.
    pub fn resizes_width(self) -> bool {
        self.moves_left() || self.moves_right()
    }

    /// Whether this handle changes the height at all.
    pub fn resizes_height(self) -> bool {
        self.moves_top() || self.moves_bottom()
    }

    /// The edges this handle drags, for edge-restricted snapping.
    pub fn active_edges(self) -> ActiveEdges {
        ActiveEdges {
            left: self.moves_left(),
            right: self.moves_right(),
            top: self.moves_top(),
            bottom: self.moves_bottom(),
        }
    }

    /// Where this handle sits on a rectangle.
    pub fn anchor_on(self, rect: Rect) -> Point {
        let center = rect.center();
        let x = if self.moves_left() {
            rect.x0
        } else if self.moves_right() {
            rect.x1
        } else {
            center.x
        };
        let y = if self.moves_top() {
            rect.y0
        } else if self.moves_bottom() {
            rect.y1
        } else {
            center.y
        };
        Point::new(x, y)
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown handle name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resize handle: {0:?}")]
pub struct ParseHandleError(pub String);

impl FromStr for HandleKind {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandleKind::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| ParseHandleError(s.to_string()))
    }
}

impl TryFrom<String> for HandleKind {
    type Error = ParseHandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HandleKind> for String {
    fn from(kind: HandleKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The eight resize handles of a placed element.
pub fn get_handles(position: &ElementPosition) -> Vec<Handle> {
    let rect = position.to_rect();
    HandleKind::ALL
        .into_iter()
        .map(|kind| Handle::new(kind.anchor_on(rect), kind))
        .collect()
}

/// Find the handle under a canvas point, corners before edges.
pub fn hit_test_handles(
    position: &ElementPosition,
    point: Point,
    tolerance: f64,
) -> Option<HandleKind> {
    let handles = get_handles(position);
    handles
        .iter()
        .filter(|h| matches!(h.kind, HandleKind::Corner(_)))
        .chain(handles.iter().filter(|h| matches!(h.kind, HandleKind::Edge(_))))
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Axis-independent resize.
///
/// Each dragged edge follows the pointer delta but stops `floor` pixels short
/// of the opposite edge and at the canvas border. Edges the handle does not
/// drag are left exactly where they started.
pub fn resize_independent(
    start: Rect,
    handle: HandleKind,
    delta: Vec2,
    container: &ContainerBounds,
    floor: f64,
) -> Rect {
    let mut rect = start;
    if handle.moves_left() {
        rect.x0 = clamp_f64(start.x0 + delta.x, 0.0, start.x1 - floor);
    } else if handle.moves_right() {
        rect.x1 = clamp_f64(start.x1 + delta.x, start.x0 + floor, container.width);
    }
    if handle.moves_top() {
        rect.y0 = clamp_f64(start.y0 + delta.y, 0.0, start.y1 - floor);
    } else if handle.moves_bottom() {
        rect.y1 = clamp_f64(start.y1 + delta.y, start.y0 + floor, container.height);
    }
    rect
}

/// Aspect-ratio-locked resize.
///
/// Corners keep the opposite corner fixed, `w`/`e` handles keep the vertical
/// center, `n`/`s` handles keep the horizontal center. The resulting width is
/// bounded so both dimensions stay inside `limits`, above `floor`, and on the
/// canvas, which keeps `width / height == aspect` whenever those bounds allow it.
pub fn resize_proportional(
    start: Rect,
    handle: HandleKind,
    delta: Vec2,
    aspect: f64,
    limits: &SizeLimits,
    container: &ContainerBounds,
    floor: f64,
) -> Rect {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let center = start.center();

    let proposed_width = if handle.resizes_width() {
        let dx = if handle.moves_left() {
            -delta.x
        } else {
            delta.x
        };
        start.width() + dx
    } else {
        let dy = if handle.moves_top() {
            -delta.y
        } else {
            delta.y
        };
        (start.height() + dy) * aspect
    };

    let space_width = if handle.moves_left() {
        start.x1
    } else if handle.moves_right() {
        container.width - start.x0
    } else {
        2.0 * center.x.min(container.width - center.x)
    };
    let space_height = if handle.moves_top() {
        start.y1
    } else if handle.moves_bottom() {
        container.height - start.y0
    } else {
        2.0 * center.y.min(container.height - center.y)
    };

    let lo = (limits.min_width as f64)
        .max(limits.min_height as f64 * aspect)
        .max(floor)
        .max(floor * aspect);
    let hi = (limits.max_width as f64)
        .min(limits.max_height as f64 * aspect)
        .min(space_width)
        .min(space_height * aspect);

    let width = clamp_f64(proposed_width, lo, hi);
    let height = width / aspect;

    let x0 = if handle.moves_left() {
        start.x1 - width
    } else if handle.moves_right() {
        start.x0
    } else {
        center.x - width / 2.0
    };
    let y0 = if handle.moves_top() {
        start.y1 - height
    } else if handle.moves_bottom() {
        start.y0
    } else {
        center.y - height / 2.0
    };

    Rect::new(x0, y0, x0 + width, y0 + height)
}
