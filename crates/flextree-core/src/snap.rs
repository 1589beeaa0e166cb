//! Alignment guides and snapping against sibling elements and the canvas.
//!
//! Guide discovery collects every candidate line within the threshold.
//! Resolution then picks a single winner per axis and moves the target so
//! the matching edge or center lands exactly on it.

use crate::element::ElementId;
use crate::geometry::{Bounds, ContainerBounds, ElementPosition};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Distance threshold for snapping (in canvas pixels).
pub const SNAP_THRESHOLD: f64 = 15.0;

/// Siblings whose centers are further away than this are ignored.
pub const NEARBY_RADIUS: f64 = 100.0;

/// Element id reported for guides that come from the canvas itself.
pub const CONTAINER_GUIDE_ID: &str = "container";

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// A vertical line at some x; aligns left/right edges and horizontal centers.
    Vertical,
    /// A horizontal line at some y; aligns top/bottom edges and vertical centers.
    Horizontal,
}

/// What a guide aligns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapType {
    Edge,
    Center,
}

/// A transient alignment line shown while an element is manipulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentGuide {
    #[serde(rename = "type")]
    pub orientation: GuideOrientation,
    /// Canvas x for vertical guides, canvas y for horizontal ones.
    pub position: f64,
    /// Element that produced the guide, or `"container"` for the canvas.
    pub element_id: String,
    pub snap_type: SnapType,
}

impl AlignmentGuide {
    pub fn vertical(position: f64, element_id: impl Into<String>, snap_type: SnapType) -> Self {
        Self {
            orientation: GuideOrientation::Vertical,
            position,
            element_id: element_id.into(),
            snap_type,
        }
    }

    pub fn horizontal(position: f64, element_id: impl Into<String>, snap_type: SnapType) -> Self {
        Self {
            orientation: GuideOrientation::Horizontal,
            position,
            element_id: element_id.into(),
            snap_type,
        }
    }

    /// How far the target is from engaging this guide.
    ///
    /// Center guides measure from the target's center, edge guides from the
    /// nearer of the two target edges on the guide's axis.
    pub fn engagement(&self, bounds: &Bounds) -> f64 {
        let span = AxisSpan::of(bounds, self.orientation);
        match self.snap_type {
            SnapType::Center => (span.center - self.position).abs(),
            SnapType::Edge => (span.start - self.position)
                .abs()
                .min((span.end - self.position).abs()),
        }
    }

    /// Offset along the guide's axis that puts the engaged edge or center on it.
    fn offset(&self, bounds: &Bounds) -> f64 {
        let span = AxisSpan::of(bounds, self.orientation);
        match self.snap_type {
            SnapType::Center => self.position - span.center,
            SnapType::Edge => {
                if (span.start - self.position).abs() <= (span.end - self.position).abs() {
                    self.position - span.start
                } else {
                    self.position - span.end
                }
            }
        }
    }
}

/// Extent of a rectangle along the axis a guide acts on.
#[derive(Debug, Clone, Copy)]
struct AxisSpan {
    start: f64,
    end: f64,
    center: f64,
}

impl AxisSpan {
    fn of(bounds: &Bounds, orientation: GuideOrientation) -> Self {
        match orientation {
            GuideOrientation::Vertical => Self {
                start: bounds.left,
                end: bounds.right,
                center: bounds.center_x,
            },
            GuideOrientation::Horizontal => Self {
                start: bounds.top,
                end: bounds.bottom,
                center: bounds.center_y,
            },
        }
    }
}

/// A placed element that the target may align with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sibling {
    pub id: ElementId,
    pub position: ElementPosition,
}

impl Sibling {
    pub fn new(id: ElementId, position: ElementPosition) -> Self {
        Self { id, position }
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped rectangle.
    pub rect: Rect,
    /// Whether the X axis was snapped.
    pub snapped_x: bool,
    /// Whether the Y axis was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(rect: Rect) -> Self {
        Self {
            rect,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Keep only siblings whose rectangles lie within `radius` of the target.
///
/// Distance is the gap between the two rectangles, so touching or overlapping
/// siblings are always kept. `None` disables the filter.
pub fn nearby_siblings(target: Rect, siblings: &[Sibling], radius: Option<f64>) -> Vec<Sibling> {
    let Some(radius) = radius else {
        return siblings.to_vec();
    };
    let target = Bounds::of(target);
    siblings
        .iter()
        .filter(|s| target.gap_distance(&s.position.bounds()) <= radius)
        .copied()
        .collect()
}

/// Collect every guide the target is within `threshold` of.
///
/// The canvas center is always tested. For each sibling, both target edges
/// are tested against both sibling edges on each axis, plus center to center.
/// Overlapping candidates are allowed; resolution picks one per axis.
pub fn find_alignment_guides(
    target: Rect,
    siblings: &[Sibling],
    threshold: f64,
    container: &ContainerBounds,
) -> Vec<AlignmentGuide> {
    let t = Bounds::of(target);
    let mut guides = Vec::new();

    if (t.center_x - container.center_x).abs() <= threshold {
        guides.push(AlignmentGuide::vertical(
            container.center_x,
            CONTAINER_GUIDE_ID,
            SnapType::Center,
        ));
    }
    if (t.center_y - container.center_y).abs() <= threshold {
        guides.push(AlignmentGuide::horizontal(
            container.center_y,
            CONTAINER_GUIDE_ID,
            SnapType::Center,
        ));
    }

    let near = |a: f64, b: f64| (a - b).abs() <= threshold;

    for sibling in siblings {
        let s = sibling.position.bounds();
        let id = sibling.id.to_string();

        for edge in [s.left, s.right] {
            if near(t.left, edge) || near(t.right, edge) {
                guides.push(AlignmentGuide::vertical(edge, id.clone(), SnapType::Edge));
            }
        }
        if near(t.center_x, s.center_x) {
            guides.push(AlignmentGuide::vertical(s.center_x, id.clone(), SnapType::Center));
        }

        for edge in [s.top, s.bottom] {
            if near(t.top, edge) || near(t.bottom, edge) {
                guides.push(AlignmentGuide::horizontal(edge, id.clone(), SnapType::Edge));
            }
        }
        if near(t.center_y, s.center_y) {
            guides.push(AlignmentGuide::horizontal(s.center_y, id, SnapType::Center));
        }
    }

    guides
}

/// The guide with the smallest engagement distance on one axis, if any is in range.
fn closest_guide<'a>(
    guides: &'a [AlignmentGuide],
    orientation: GuideOrientation,
    bounds: &Bounds,
    threshold: f64,
) -> Option<&'a AlignmentGuide> {
    let mut best: Option<(&AlignmentGuide, f64)> = None;
    for guide in guides.iter().filter(|g| g.orientation == orientation) {
        let distance = guide.engagement(bounds);
        if distance > threshold {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((guide, distance)),
        }
    }
    best.map(|(guide, _)| guide)
}

/// Move the target so its closest edge or center lands exactly on the winning
/// guide of each axis. Axes without a guide in range are left untouched.
pub fn snap_to_guides(rect: Rect, guides: &[AlignmentGuide], threshold: f64) -> SnapResult {
    let bounds = Bounds::of(rect);
    let mut result = SnapResult::none(rect);

    if let Some(guide) = closest_guide(guides, GuideOrientation::Vertical, &bounds, threshold) {
        result.rect = result.rect + Vec2::new(guide.offset(&bounds), 0.0);
        result.snapped_x = true;
    }
    if let Some(guide) = closest_guide(guides, GuideOrientation::Horizontal, &bounds, threshold) {
        result.rect = result.rect + Vec2::new(0.0, guide.offset(&bounds));
        result.snapped_y = true;
    }

    result
}

/// Edges that a resize is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// Snap only the edges being dragged, keeping the opposite edges fixed.
///
/// Center guides are ignored. An edge is not snapped if doing so would make
/// the element thinner than `floor`.
pub fn snap_edges(
    rect: Rect,
    guides: &[AlignmentGuide],
    threshold: f64,
    edges: ActiveEdges,
    floor: f64,
) -> SnapResult {
    let mut result = SnapResult::none(rect);

    let best_edge = |orientation: GuideOrientation, edge: f64, fixed: f64, grows_forward: bool| {
        guides
            .iter()
            .filter(|g| g.orientation == orientation && g.snap_type == SnapType::Edge)
            .filter(|g| (g.position - edge).abs() <= threshold)
            .filter(|g| {
                let size = if grows_forward {
                    g.position - fixed
                } else {
                    fixed - g.position
                };
                size >= floor
            })
            .min_by(|a, b| {
                (a.position - edge)
                    .abs()
                    .total_cmp(&(b.position - edge).abs())
            })
            .map(|g| g.position)
    };

    if edges.left {
        if let Some(x) = best_edge(GuideOrientation::Vertical, rect.x0, rect.x1, false) {
            result.rect.x0 = x;
            result.snapped_x = true;
        }
    } else if edges.right {
        if let Some(x) = best_edge(GuideOrientation::Vertical, rect.x1, rect.x0, true) {
            result.rect.x1 = x;
            result.snapped_x = true;
        }
    }

    if edges.top {
        if let Some(y) = best_edge(GuideOrientation::Horizontal, rect.y0, rect.y1, false) {
            result.rect.y0 = y;
            result.snapped_y = true;
        }
    } else if edges.bottom {
        if let Some(y) = best_edge(GuideOrientation::Horizontal, rect.y1, rect.y0, true) {
            result.rect.y1 = y;
            result.snapped_y = true;
        }
    }

    result
}

/// Dimensions a resize may snap to, taken from aligned siblings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSnap {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Find sibling dimensions the target could adopt.
///
/// A sibling's width is offered when it shares a vertical alignment line
/// (left, right or center within `threshold`) and its width is within
/// `tolerance` of the target's. Heights work the same way with horizontal
/// alignment. The closest match wins.
pub fn find_size_snap_targets(
    target: Rect,
    siblings: &[Sibling],
    threshold: f64,
    tolerance: f64,
) -> SizeSnap {
    let t = Bounds::of(target);
    let (width, height) = (target.width(), target.height());
    let near = |a: f64, b: f64| (a - b).abs() <= threshold;

    let mut best_width: Option<(f64, f64)> = None;
    let mut best_height: Option<(f64, f64)> = None;

    for sibling in siblings {
        let s = sibling.position.bounds();
        let sw = sibling.position.width as f64;
        let sh = sibling.position.height as f64;

        let vertically_aligned =
            near(t.left, s.left) || near(t.right, s.right) || near(t.center_x, s.center_x);
        let width_diff = (width - sw).abs();
        if vertically_aligned
            && width_diff <= tolerance
            && best_width.is_none_or(|(_, diff)| width_diff < diff)
        {
            best_width = Some((sw, width_diff));
        }

        let horizontally_aligned =
            near(t.top, s.top) || near(t.bottom, s.bottom) || near(t.center_y, s.center_y);
        let height_diff = (height - sh).abs();
        if horizontally_aligned
            && height_diff <= tolerance
            && best_height.is_none_or(|(_, diff)| height_diff < diff)
        {
            best_height = Some((sh, height_diff));
        }
    }

    SizeSnap {
        width: best_width.map(|(w, _)| w),
        height: best_height.map(|(h, _)| h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;

    fn sibling(id: ElementId, x: i32, y: i32, w: i32, h: i32) -> Sibling {
        Sibling::new(id, ElementPosition::new(x, y, w, h))
    }

    #[test]
    fn test_snap_to_sibling_right_edge() {
        // Sibling right edge at x=100; target left edge at 104.
        let siblings = [sibling(ElementId::Link(1), 40, 300, 60, 40)];
        let target = Rect::new(104.0, 310.0, 154.0, 350.0);
        let guides = find_alignment_guides(
            target,
            &siblings,
            SNAP_THRESHOLD,
            &Viewport::Mobile.container(),
        );
        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert!(result.snapped_x);
        assert_eq!(result.rect.x0, 100.0);
        assert_eq!(result.rect.width(), 50.0);
    }

    #[test]
    fn test_canvas_center_snap() {
        // Width 40 at x=121: center 141, one pixel off the mobile center line.
        let target = Rect::new(121.0, 400.0, 161.0, 440.0);
        let container = Viewport::Mobile.container();
        let guides = find_alignment_guides(target, &[], SNAP_THRESHOLD, &container);
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].element_id, CONTAINER_GUIDE_ID);
        assert_eq!(guides[0].snap_type, SnapType::Center);

        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert_eq!(result.rect.x0, 120.0);
        assert!(!result.snapped_y);
    }

    #[test]
    fn test_no_guides_out_of_range() {
        let siblings = [sibling(ElementId::Avatar, 0, 0, 40, 40)];
        let target = Rect::new(200.0, 500.0, 240.0, 540.0);
        let guides = find_alignment_guides(
            target,
            &siblings,
            SNAP_THRESHOLD,
            &Viewport::Mobile.container(),
        );
        assert!(guides.is_empty());
        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert!(!result.is_snapped());
        assert_eq!(result.rect, target);
    }

    #[test]
    fn test_closest_guide_wins() {
        let guides = vec![
            AlignmentGuide::vertical(90.0, "link-1", SnapType::Edge),
            AlignmentGuide::vertical(98.0, "link-2", SnapType::Edge),
        ];
        let target = Rect::new(100.0, 0.0, 150.0, 40.0);
        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert_eq!(result.rect.x0, 98.0);
    }

    #[test]
    fn test_edge_guide_snaps_right_edge() {
        let guides = vec![AlignmentGuide::vertical(200.0, "bio", SnapType::Edge)];
        let target = Rect::new(100.0, 0.0, 195.0, 40.0);
        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert_eq!(result.rect.x1, 200.0);
        assert_eq!(result.rect.width(), 95.0);
    }

    #[test]
    fn test_horizontal_edges_and_centers() {
        let siblings = [sibling(ElementId::Bio, 10, 100, 260, 50)];
        let target = Rect::new(10.0, 108.0, 270.0, 158.0);
        let guides = find_alignment_guides(
            target,
            &siblings,
            SNAP_THRESHOLD,
            &Viewport::Mobile.container(),
        );
        assert!(guides.iter().any(|g| g.orientation == GuideOrientation::Horizontal
            && g.snap_type == SnapType::Center
            && g.position == 125.0));
        let result = snap_to_guides(target, &guides, SNAP_THRESHOLD);
        assert_eq!(result.rect.y0, 100.0);
        assert_eq!(result.rect.x0, 10.0);
    }

    #[test]
    fn test_nearby_filter() {
        let siblings = [
            sibling(ElementId::Avatar, 0, 0, 40, 40),
            sibling(ElementId::Link(1), 0, 400, 40, 40),
        ];
        let target = Rect::new(0.0, 60.0, 40.0, 100.0);
        let near = nearby_siblings(target, &siblings, Some(NEARBY_RADIUS));
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].id, ElementId::Avatar);
        assert_eq!(nearby_siblings(target, &siblings, None).len(), 2);
    }

    #[test]
    fn test_nearby_filter_keeps_adjacent_wide_siblings() {
        // Centers are 200px apart but the rectangles share an edge.
        let siblings = [sibling(ElementId::Link(1), 100, 100, 300, 40)];
        let target = Rect::new(400.0, 100.0, 500.0, 140.0);
        assert_eq!(nearby_siblings(target, &siblings, Some(NEARBY_RADIUS)).len(), 1);

        let container = Viewport::Desktop.container();
        let guides = find_alignment_guides(target, &siblings, SNAP_THRESHOLD, &container);
        assert!(
            guides
                .iter()
                .any(|g| g.snap_type == SnapType::Edge && g.position == 400.0)
        );
    }

    #[test]
    fn test_snap_edges_only_active_edge() {
        let guides = vec![
            AlignmentGuide::vertical(50.0, "link-1", SnapType::Edge),
            AlignmentGuide::vertical(205.0, "link-1", SnapType::Edge),
        ];
        let rect = Rect::new(55.0, 0.0, 200.0, 40.0);
        let west = ActiveEdges {
            left: true,
            ..Default::default()
        };
        let result = snap_edges(rect, &guides, SNAP_THRESHOLD, west, 20.0);
        assert_eq!(result.rect.x0, 50.0);
        assert_eq!(result.rect.x1, 200.0);

        let east = ActiveEdges {
            right: true,
            ..Default::default()
        };
        let result = snap_edges(rect, &guides, SNAP_THRESHOLD, east, 20.0);
        assert_eq!(result.rect.x0, 55.0);
        assert_eq!(result.rect.x1, 205.0);
    }

    #[test]
    fn test_snap_edges_respects_floor() {
        let guides = vec![AlignmentGuide::vertical(110.0, "avatar", SnapType::Edge)];
        let rect = Rect::new(100.0, 0.0, 125.0, 40.0);
        let east = ActiveEdges {
            right: true,
            ..Default::default()
        };
        let result = snap_edges(rect, &guides, SNAP_THRESHOLD, east, 20.0);
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_size_snap_targets() {
        let siblings = [sibling(ElementId::Link(1), 10, 220, 260, 40)];
        // Left edges aligned; width 250 is within 2x threshold of 260.
        let target = Rect::new(12.0, 300.0, 262.0, 336.0);
        let snap =
            find_size_snap_targets(target, &siblings, SNAP_THRESHOLD, 2.0 * SNAP_THRESHOLD);
        assert_eq!(snap.width, Some(260.0));
        // Not horizontally aligned, so no height suggestion.
        assert_eq!(snap.height, None);
    }

    #[test]
    fn test_size_snap_prefers_closest() {
        let siblings = [
            sibling(ElementId::Link(1), 10, 100, 240, 40),
            sibling(ElementId::Link(2), 10, 200, 255, 40),
        ];
        let target = Rect::new(10.0, 300.0, 260.0, 340.0);
        let snap =
            find_size_snap_targets(target, &siblings, SNAP_THRESHOLD, 2.0 * SNAP_THRESHOLD);
        assert_eq!(snap.width, Some(255.0));
    }

    #[test]
    fn test_guide_serialization() {
        let guide = AlignmentGuide::vertical(140.0, CONTAINER_GUIDE_ID, SnapType::Center);
        let json = serde_json::to_value(&guide).unwrap();
        assert_eq!(json["type"], "vertical");
        assert_eq!(json["elementId"], "container");
        assert_eq!(json["snapType"], "center");
        assert_eq!(json["position"], 140.0);
    }
}
