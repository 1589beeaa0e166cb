//! Drag and resize sessions.
//!
//! A session captures the element's starting rectangle and the pointer
//! origin. Every pointer move recomputes the geometry from those two values,
//! so rounding never accumulates across moves.

use crate::constraints::{self, SizeLimits, size_limits};
use crate::document::PageConfig;
use crate::element::ElementId;
use crate::geometry::{ContainerBounds, ElementPosition, Viewport};
use crate::input::Modifiers;
use crate::selection::{HandleKind, resize_independent, resize_proportional};
use crate::settings::{EngineSettings, SettingsResult};
use crate::snap::{
    AlignmentGuide, Sibling, SizeSnap, find_alignment_guides, find_size_snap_targets,
    nearby_siblings, snap_edges, snap_to_guides,
};
use kurbo::{Point, Rect};

/// Supplies the on-canvas rectangle of an element when a session starts.
pub trait RenderSurface {
    fn element_rect(&self, viewport: Viewport, element: ElementId) -> Option<Rect>;
}

impl RenderSurface for PageConfig {
    fn element_rect(&self, viewport: Viewport, element: ElementId) -> Option<Rect> {
        self.element_position(viewport, element)
            .map(|p| p.to_rect())
    }
}

/// An element being moved by its body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub element: ElementId,
    pub viewport: Viewport,
    /// Pointer position at pointer-down.
    pub origin: Point,
    /// Element rectangle at pointer-down.
    pub start: Rect,
    /// Modifiers seen on the latest move.
    pub modifiers: Modifiers,
}

/// An element being resized by one of its handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub element: ElementId,
    pub viewport: Viewport,
    pub origin: Point,
    pub start: Rect,
    pub handle: HandleKind,
    /// Width over height at pointer-down.
    pub aspect_ratio: f64,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl InteractionState {
    pub fn element(&self) -> Option<ElementId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(s) => Some(s.element),
            InteractionState::Resizing(s) => Some(s.element),
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(s) => Some(s.viewport),
            InteractionState::Resizing(s) => Some(s.viewport),
        }
    }
}

/// Geometry to commit after a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub element: ElementId,
    pub viewport: Viewport,
    pub position: ElementPosition,
}

/// The interaction state machine: `idle -> dragging | resizing -> idle`.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    guides: Vec<AlignmentGuide>,
    settings: EngineSettings,
}

impl Interaction {
    pub fn new(settings: EngineSettings) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(Self {
            state: InteractionState::Idle,
            guides: Vec::new(),
            settings,
        })
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Guides from the latest move; empty while idle.
    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EngineSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Start dragging an element whose current rectangle is `start`.
    ///
    /// Any running session is replaced.
    pub fn begin_drag(
        &mut self,
        element: ElementId,
        viewport: Viewport,
        start: Rect,
        origin: Point,
    ) {
        log::debug!("Begin drag of {element} on {viewport} at {start:?}");
        self.guides.clear();
        self.state = InteractionState::Dragging(DragSession {
            element,
            viewport,
            origin,
            start,
            modifiers: Modifiers::NONE,
        });
    }

    /// Start resizing an element from `handle`.
    pub fn begin_resize(
        &mut self,
        element: ElementId,
        viewport: Viewport,
        start: Rect,
        handle: HandleKind,
        origin: Point,
    ) {
        let aspect_ratio = if start.height() > 0.0 {
            start.width() / start.height()
        } else {
            1.0
        };
        log::debug!("Begin resize of {element} on {viewport} from {handle} at {start:?}");
        self.guides.clear();
        self.state = InteractionState::Resizing(ResizeSession {
            element,
            viewport,
            origin,
            start,
            handle,
            aspect_ratio,
            modifiers: Modifiers::NONE,
        });
    }

    /// Derive the new geometry of the active element.
    ///
    /// `siblings` are the other placed elements of the session's viewport.
    /// Returns `None` while idle.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
        siblings: &[Sibling],
    ) -> Option<MoveOutcome> {
        let (position, element, viewport) = match &mut self.state {
            InteractionState::Idle => return None,
            InteractionState::Dragging(session) => {
                session.modifiers = modifiers;
                let session = *session;
                let (position, guides) = drag_geometry(&session, pointer, siblings, &self.settings);
                self.guides = guides;
                (position, session.element, session.viewport)
            }
            InteractionState::Resizing(session) => {
                session.modifiers = modifiers;
                let session = *session;
                let (position, guides) =
                    resize_geometry(&session, pointer, siblings, &self.settings);
                self.guides = guides;
                (position, session.element, session.viewport)
            }
        };
        log::trace!(
            "Move {element} to {position:?} with {} guide(s)",
            self.guides.len()
        );
        Some(MoveOutcome {
            element,
            viewport,
            position,
        })
    }

    /// End the session on pointer-up and clear all guides.
    pub fn end(&mut self) -> Option<ElementId> {
        let element = self.state.element();
        if let Some(element) = element {
            log::debug!("End interaction with {element}");
        }
        self.state = InteractionState::Idle;
        self.guides.clear();
        element
    }

    /// Drop any running session, e.g. when the canvas loses focus.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("Cancel interaction");
        }
        self.state = InteractionState::Idle;
        self.guides.clear();
    }
}

/// Drag: start + delta, clamp, snap, clamp again.
fn drag_geometry(
    session: &DragSession,
    pointer: Point,
    siblings: &[Sibling],
    settings: &EngineSettings,
) -> (ElementPosition, Vec<AlignmentGuide>) {
    let kind = session.element.kind();
    let delta = pointer - session.origin;
    let clamped = constraints::clamp(kind, session.viewport, session.start + delta);
    if session.modifiers.snap_disabled() {
        return (clamped, Vec::new());
    }

    let candidate = clamped.to_rect();
    let threshold = settings.snap_threshold;
    let near = nearby_siblings(candidate, siblings, settings.nearby_radius);
    let guides = find_alignment_guides(
        candidate,
        &near,
        threshold,
        &session.viewport.container(),
    );
    let snapped = snap_to_guides(candidate, &guides, threshold);
    (
        constraints::clamp(kind, session.viewport, snapped.rect),
        guides,
    )
}

/// Resize: handle math, size snap, edge snap on the dragged edges, clamp.
fn resize_geometry(
    session: &ResizeSession,
    pointer: Point,
    siblings: &[Sibling],
    settings: &EngineSettings,
) -> (ElementPosition, Vec<AlignmentGuide>) {
    let kind = session.element.kind();
    let viewport = session.viewport;
    let container = viewport.container();
    let delta = pointer - session.origin;
    let proportional = session.modifiers.proportional();

    let raw = if proportional {
        resize_proportional(
            session.start,
            session.handle,
            delta,
            session.aspect_ratio,
            &size_limits(kind, viewport),
            &container,
            settings.resize_floor,
        )
    } else {
        resize_independent(
            session.start,
            session.handle,
            delta,
            &container,
            settings.resize_floor,
        )
    };

    if session.modifiers.snap_disabled() {
        return (constraints::clamp(kind, viewport, raw), Vec::new());
    }

    let threshold = settings.snap_threshold;
    let near = nearby_siblings(raw, siblings, settings.nearby_radius);
    let guides = find_alignment_guides(raw, &near, threshold, &container);
    if proportional {
        return (constraints::clamp(kind, viewport, raw), guides);
    }

    let targets =
        find_size_snap_targets(raw, &near, threshold, settings.size_snap_tolerance());
    let sized = apply_size_snap(
        raw,
        session.handle,
        targets,
        &size_limits(kind, viewport),
        &container,
    );
    let snapped = snap_edges(
        sized,
        &guides,
        threshold,
        session.handle.active_edges(),
        settings.resize_floor,
    );
    (constraints::clamp(kind, viewport, snapped.rect), guides)
}

/// Adopt a sibling's width or height, keeping the edge opposite the handle fixed.
///
/// A size is skipped when it falls outside `limits` or would push the dragged
/// edge off the canvas, since the final clamp would then move the fixed edge.
fn apply_size_snap(
    rect: Rect,
    handle: HandleKind,
    snap: SizeSnap,
    limits: &SizeLimits,
    container: &ContainerBounds,
) -> Rect {
    let mut out = rect;
    let width = snap
        .width
        .filter(|_| handle.resizes_width())
        .filter(|&w| (limits.min_width as f64..=limits.max_width as f64).contains(&w));
    if let Some(width) = width {
        if handle.moves_left() {
            if rect.x1 - width >= 0.0 {
                out.x0 = rect.x1 - width;
            }
        } else if rect.x0 + width <= container.width {
            out.x1 = rect.x0 + width;
        }
    }
    let height = snap
        .height
        .filter(|_| handle.resizes_height())
        .filter(|&h| (limits.min_height as f64..=limits.max_height as f64).contains(&h));
    if let Some(height) = height {
        if handle.moves_top() {
            if rect.y1 - height >= 0.0 {
                out.y0 = rect.y1 - height;
            }
        } else if rect.y0 + height <= container.height {
            out.y1 = rect.y0 + height;
        }
    }
    out
}
