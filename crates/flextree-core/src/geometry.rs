//! Geometry primitives for placeable elements and the canvas they live on.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A rendering target with its own canvas size and element placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Phone mockup, content area below the notch.
    #[default]
    Mobile,
    /// Browser mockup, content area below the title bar.
    Desktop,
}

impl Viewport {
    /// Both viewports, mobile first.
    pub const ALL: [Viewport; 2] = [Viewport::Mobile, Viewport::Desktop];

    /// Canvas content size in whole pixels.
    pub const fn container_size(self) -> (i32, i32) {
        match self {
            Viewport::Mobile => (280, 568),
            Viewport::Desktop => (900, 568),
        }
    }

    /// Canvas bounds used as an implicit alignment target.
    pub const fn container(self) -> ContainerBounds {
        let (width, height) = self.container_size();
        ContainerBounds::new(width as f64, height as f64)
    }

    /// Lowercase name, as used in the exported document.
    pub fn as_str(self) -> &'static str {
        match self {
            Viewport::Mobile => "mobile",
            Viewport::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a viewport name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown viewport: {0} (expected \"mobile\" or \"desktop\")")]
pub struct ParseViewportError(pub String);

impl FromStr for Viewport {
    type Err = ParseViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Viewport::Mobile),
            "desktop" => Ok(Viewport::Desktop),
            _ => Err(ParseViewportError(s.to_string())),
        }
    }
}

/// Size and center of a viewport's canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ContainerBounds {
    /// Create bounds for a canvas of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center_x: width / 2.0,
            center_y: height / 2.0,
        }
    }

    /// The canvas as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Canvas bounds for a viewport.
pub fn container_bounds(viewport: Viewport) -> ContainerBounds {
    viewport.container()
}

/// Placement of an element on the canvas, in whole pixels.
///
/// `x`/`y` are relative to the top-left corner of the canvas content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ElementPosition {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ElementPosition {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round a floating-point rectangle to whole pixels without constraining it.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            x: rect.x0.round() as i32,
            y: rect.y0.round() as i32,
            width: rect.width().round() as i32,
            height: rect.height().round() as i32,
        }
    }

    /// The placement as a floating-point rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            (self.x + self.width) as f64,
            (self.y + self.height) as f64,
        )
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Edges and centers of this placement.
    pub fn bounds(&self) -> Bounds {
        Bounds::of(self.to_rect())
    }

    /// Width divided by height (1.0 for a degenerate height).
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Check if a canvas point lies inside this placement.
    pub fn contains(&self, point: Point) -> bool {
        self.to_rect().contains(point)
    }
}

/// Edges and centers of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Bounds {
    /// Compute bounds of a rectangle.
    pub fn of(rect: Rect) -> Self {
        let center = rect.center();
        Self {
            left: rect.x0,
            right: rect.x1,
            top: rect.y0,
            bottom: rect.y1,
            center_x: center.x,
            center_y: center.y,
        }
    }

    /// Shortest distance between the two rectangles; zero when they touch or overlap.
    pub fn gap_distance(&self, other: &Bounds) -> f64 {
        let dx = (self.left - other.right).max(other.left - self.right).max(0.0);
        let dy = (self.top - other.bottom).max(other.top - self.bottom).max(0.0);
        dx.hypot(dy)
    }
}

/// Edges and centers of an element placement.
pub fn bounds(position: &ElementPosition) -> Bounds {
    position.bounds()
}

/// Clamp `value` into `[min, max]`; `min` wins when the range is empty.
pub(crate) fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let b = bounds(&ElementPosition::new(10, 20, 100, 40));
        assert_eq!(b.left, 10.0);
        assert_eq!(b.right, 110.0);
        assert_eq!(b.top, 20.0);
        assert_eq!(b.bottom, 60.0);
        assert_eq!(b.center_x, 60.0);
        assert_eq!(b.center_y, 40.0);
    }

    #[test]
    fn test_container_bounds() {
        let mobile = container_bounds(Viewport::Mobile);
        assert_eq!(mobile.width, 280.0);
        assert_eq!(mobile.height, 568.0);
        assert_eq!(mobile.center_x, 140.0);
        assert_eq!(mobile.center_y, 284.0);

        let desktop = container_bounds(Viewport::Desktop);
        assert_eq!(desktop.width, 900.0);
        assert_eq!(desktop.center_x, 450.0);
    }

    #[test]
    fn test_rect_round_trip() {
        let pos = ElementPosition::new(5, 7, 30, 12);
        assert_eq!(ElementPosition::from_rect(pos.to_rect()), pos);
    }

    #[test]
    fn test_gap_distance() {
        let a = ElementPosition::new(0, 0, 100, 100).bounds();
        let touching = ElementPosition::new(100, 20, 150, 40).bounds();
        let overlapping = ElementPosition::new(50, 50, 150, 40).bounds();
        let diagonal = ElementPosition::new(130, 140, 10, 10).bounds();
        assert_eq!(a.gap_distance(&touching), 0.0);
        assert_eq!(a.gap_distance(&overlapping), 0.0);
        assert!((a.gap_distance(&diagonal) - 50.0).abs() < 1e-9);
        assert_eq!(touching.gap_distance(&a), 0.0);
    }

    #[test]
    fn test_viewport_parse() {
        assert_eq!("mobile".parse::<Viewport>().unwrap(), Viewport::Mobile);
        assert_eq!("Desktop".parse::<Viewport>().unwrap(), Viewport::Desktop);
        assert!("tablet".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_clamp_empty_range_prefers_min() {
        assert_eq!(clamp_f64(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_f64(-3.0, 0.0, 8.0), 0.0);
        assert_eq!(clamp_f64(12.0, 0.0, 8.0), 8.0);
    }
}
