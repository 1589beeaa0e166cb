//! Size and position limits per element category and viewport.
//!
//! Every candidate geometry passes through [`clamp`] before it is committed,
//! whether it comes from a drag, a resize or a numeric field in the
//! properties panel.

use crate::element::ElementKind;
use crate::geometry::{ElementPosition, Viewport, clamp_f64};
use kurbo::Rect;

/// Allowed width and height range for one category in one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl SizeLimits {
    pub const fn new(min_width: i32, max_width: i32, min_height: i32, max_height: i32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Whether the ranges are non-empty and fit inside a canvas of the given size.
    pub const fn fits(&self, container_width: i32, container_height: i32) -> bool {
        self.min_width > 0
            && self.min_height > 0
            && self.min_width <= self.max_width
            && self.min_height <= self.max_height
            && self.max_width <= container_width
            && self.max_height <= container_height
    }
}

/// Size limits for an element category in a viewport.
pub const fn size_limits(kind: ElementKind, viewport: Viewport) -> SizeLimits {
    match (viewport, kind) {
        (Viewport::Mobile, ElementKind::Avatar) => SizeLimits::new(40, 160, 40, 160),
        (Viewport::Mobile, ElementKind::Bio) => SizeLimits::new(100, 280, 20, 120),
        (Viewport::Mobile, ElementKind::Link) => SizeLimits::new(80, 280, 30, 80),
        (Viewport::Desktop, ElementKind::Avatar) => SizeLimits::new(60, 240, 60, 240),
        (Viewport::Desktop, ElementKind::Bio) => SizeLimits::new(200, 600, 30, 150),
        (Viewport::Desktop, ElementKind::Link) => SizeLimits::new(150, 600, 35, 100),
    }
}

/// Smallest minimum dimension across every table entry.
///
/// The universal resize floor must not exceed this value.
pub const fn smallest_minimum() -> i32 {
    let viewports = Viewport::ALL;
    let kinds = ElementKind::ALL;
    let mut smallest = i32::MAX;
    let mut v = 0;
    while v < viewports.len() {
        let mut k = 0;
        while k < kinds.len() {
            let limits = size_limits(kinds[k], viewports[v]);
            if limits.min_width < smallest {
                smallest = limits.min_width;
            }
            if limits.min_height < smallest {
                smallest = limits.min_height;
            }
            k += 1;
        }
        v += 1;
    }
    smallest
}

// Table sanity is checked when the crate is compiled, never at call time.
const _: () = {
    let viewports = Viewport::ALL;
    let kinds = ElementKind::ALL;
    let mut v = 0;
    while v < viewports.len() {
        let (width, height) = viewports[v].container_size();
        let mut k = 0;
        while k < kinds.len() {
            assert!(
                size_limits(kinds[k], viewports[v]).fits(width, height),
                "size limits must be non-empty and fit inside the canvas"
            );
            k += 1;
        }
        v += 1;
    }
};

/// Clamp a candidate rectangle into the legal range for `kind` in `viewport`.
///
/// Width and height are clamped to the category limits first, then the origin
/// is clamped so the whole element stays on the canvas. All four fields are
/// rounded to whole pixels. Total: every input maps to a valid placement.
pub fn clamp(kind: ElementKind, viewport: Viewport, candidate: Rect) -> ElementPosition {
    let limits = size_limits(kind, viewport);
    let (container_width, container_height) = viewport.container_size();

    let width = clamp_f64(
        candidate.width(),
        limits.min_width as f64,
        limits.max_width as f64,
    )
    .round();
    let height = clamp_f64(
        candidate.height(),
        limits.min_height as f64,
        limits.max_height as f64,
    )
    .round();
    let x = clamp_f64(candidate.x0, 0.0, container_width as f64 - width).round();
    let y = clamp_f64(candidate.y0, 0.0, container_height as f64 - height).round();

    ElementPosition::new(x as i32, y as i32, width as i32, height as i32)
}

/// Clamp an existing placement.
pub fn clamp_position(
    kind: ElementKind,
    viewport: Viewport,
    position: &ElementPosition,
) -> ElementPosition {
    clamp(kind, viewport, position.to_rect())
}

/// Check a placement against the limits without changing it.
pub fn is_valid(kind: ElementKind, viewport: Viewport, position: &ElementPosition) -> bool {
    clamp_position(kind, viewport, position) == *position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candidates() -> Vec<Rect> {
        let mut out = Vec::new();
        for &x in &[-500.0, -3.4, 0.0, 12.5, 140.0, 279.0, 900.0, 2000.0] {
            for &y in &[-20.0, 0.0, 33.3, 284.0, 567.0, 5000.0] {
                for &w in &[-10.0, 0.0, 15.0, 64.4, 96.0, 250.0, 700.0] {
                    for &h in &[0.0, 19.6, 45.0, 130.0, 1000.0] {
                        out.push(Rect::new(x, y, x + w, y + h));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_clamp_respects_bounds() {
        for viewport in Viewport::ALL {
            let (cw, ch) = viewport.container_size();
            for kind in ElementKind::ALL {
                let limits = size_limits(kind, viewport);
                for candidate in sample_candidates() {
                    let p = clamp(kind, viewport, candidate);
                    assert!(p.x >= 0 && p.x + p.width <= cw, "{p:?} escapes {viewport}");
                    assert!(p.y >= 0 && p.y + p.height <= ch, "{p:?} escapes {viewport}");
                    assert!(p.width >= limits.min_width && p.width <= limits.max_width);
                    assert!(p.height >= limits.min_height && p.height <= limits.max_height);
                }
            }
        }
    }

    #[test]
    fn test_clamp_idempotent() {
        for viewport in Viewport::ALL {
            for kind in ElementKind::ALL {
                for candidate in sample_candidates() {
                    let once = clamp(kind, viewport, candidate);
                    let twice = clamp_position(kind, viewport, &once);
                    assert_eq!(once, twice);
                    assert!(is_valid(kind, viewport, &once));
                }
            }
        }
    }

    #[test]
    fn test_resize_before_position() {
        // A link pushed past the right edge while oversized keeps its clamped
        // width and is shifted back inside the canvas.
        let p = clamp(
            ElementKind::Link,
            Viewport::Mobile,
            Rect::new(200.0, 10.0, 600.0, 50.0),
        );
        assert_eq!(p, ElementPosition::new(0, 10, 280, 40));
    }

    #[test]
    fn test_rounding() {
        let p = clamp(
            ElementKind::Avatar,
            Viewport::Mobile,
            Rect::new(10.25, 20.75, 105.75, 117.0),
        );
        assert_eq!(p, ElementPosition::new(10, 21, 96, 96));
    }

    #[test]
    fn test_desktop_larger_than_mobile() {
        for kind in ElementKind::ALL {
            let mobile = size_limits(kind, Viewport::Mobile);
            let desktop = size_limits(kind, Viewport::Desktop);
            assert!(desktop.min_width >= mobile.min_width);
            assert!(desktop.max_width >= mobile.max_width);
            assert!(desktop.min_height >= mobile.min_height);
            assert!(desktop.max_height >= mobile.max_height);
        }
    }

    #[test]
    fn test_smallest_minimum() {
        assert_eq!(smallest_minimum(), 20);
    }
}
