//! Editor session: the document, the active viewport, the selection and the
//! interaction state machine.

use crate::document::{PageConfig, ViewportConfig};
use crate::element::ElementId;
use crate::export::{self, ExportResult};
use crate::geometry::{ElementPosition, Viewport};
use crate::input::{Modifiers, PointerEvent, PointerTarget};
use crate::interaction::{Interaction, RenderSurface};
use crate::selection::{HANDLE_HIT_TOLERANCE, hit_test_handles};
use crate::settings::{EngineSettings, SettingsResult};
use crate::snap::AlignmentGuide;
use kurbo::{Point, Rect};
use std::path::{Path, PathBuf};

/// Hands out link ids that are unique within the session.
///
/// Once `u64::MAX` has been handed out (or a document already uses it) the
/// allocator is exhausted and stops producing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkIdAllocator {
    next: Option<u64>,
}

impl LinkIdAllocator {
    /// Start above every id already present in `document`.
    pub fn seeded_from(document: &PageConfig) -> Self {
        Self {
            next: document.max_link_id().checked_add(1),
        }
    }

    pub fn next_id(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

/// An editing session over one configuration document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: PageConfig,
    view_mode: Viewport,
    selected: Option<ElementId>,
    interaction: Interaction,
    link_ids: LinkIdAllocator,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create a session over the initial document.
    pub fn new() -> Self {
        Self::with_document(PageConfig::default())
    }

    pub fn with_document(document: PageConfig) -> Self {
        let link_ids = LinkIdAllocator::seeded_from(&document);
        Self {
            document,
            view_mode: Viewport::Mobile,
            selected: None,
            interaction: Interaction::default(),
            link_ids,
        }
    }

    /// Use `settings` for snapping and resizing. Invalid settings are rejected.
    pub fn with_settings(mut self, settings: EngineSettings) -> SettingsResult<Self> {
        self.interaction.set_settings(settings)?;
        Ok(self)
    }

    pub fn document(&self) -> &PageConfig {
        &self.document
    }

    pub fn settings(&self) -> &EngineSettings {
        self.interaction.settings()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn view_mode(&self) -> Viewport {
        self.view_mode
    }

    /// Switch the edited viewport. A running session is dropped.
    pub fn set_view_mode(&mut self, viewport: Viewport) {
        if viewport != self.view_mode {
            self.interaction.cancel();
            log::debug!("View mode {} -> {}", self.view_mode, viewport);
            self.view_mode = viewport;
        }
    }

    pub fn select(&mut self, element: Option<ElementId>) {
        self.selected = element;
    }

    /// The selected element id as last set, even if it no longer exists.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Placement of the selected element in the active viewport.
    ///
    /// A selection that points at a removed link resolves to `None`.
    pub fn selected_position(&self) -> Option<ElementPosition> {
        let id = self.selected?;
        self.document.element_position(self.view_mode, id)
    }

    /// Start a drag or resize on an element already resolved by the canvas.
    ///
    /// Returns `false` if the element has no rectangle in the active viewport.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> bool {
        let start = self.document.element_rect(self.view_mode, target.element);
        self.begin_session(target, start, pointer)
    }

    /// Like [`Editor::pointer_down`], reading the starting rectangle from `surface`.
    pub fn pointer_down_with_surface(
        &mut self,
        surface: &impl RenderSurface,
        target: PointerTarget,
        pointer: Point,
    ) -> bool {
        let start = surface.element_rect(self.view_mode, target.element);
        self.begin_session(target, start, pointer)
    }

    fn begin_session(
        &mut self,
        target: PointerTarget,
        start: Option<Rect>,
        pointer: Point,
    ) -> bool {
        let Some(start) = start else {
            log::debug!("Ignoring pointer down on missing {}", target.element);
            return false;
        };
        match target.handle {
            Some(handle) => {
                self.interaction
                    .begin_resize(target.element, self.view_mode, start, handle, pointer)
            }
            None => self
                .interaction
                .begin_drag(target.element, self.view_mode, start, pointer),
        }
        self.selected = Some(target.element);
        true
    }

    /// Hit-test the document at `pointer` and start a session on what is there.
    ///
    /// Handles of the selected element win over element bodies. A press on
    /// empty canvas clears the selection.
    pub fn pointer_down_at(&mut self, pointer: Point) -> Option<PointerTarget> {
        let handle_target = self.selected.and_then(|id| {
            let position = self.document.element_position(self.view_mode, id)?;
            hit_test_handles(&position, pointer, HANDLE_HIT_TOLERANCE)
                .map(|handle| PointerTarget::handle(id, handle))
        });
        let target = handle_target.or_else(|| {
            self.document
                .viewport(self.view_mode)
                .element_at(pointer, self.view_mode)
                .map(PointerTarget::body)
        });
        match target {
            Some(target) => self.pointer_down(target, pointer).then_some(target),
            None => {
                self.selected = None;
                None
            }
        }
    }

    /// Feed a pointer move to the active session and commit the result.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
    ) -> Option<ElementPosition> {
        let state = *self.interaction.state();
        let (element, viewport) = (state.element()?, state.viewport()?);
        let siblings = self.document.viewport(viewport).siblings(element);
        let outcome = self.interaction.pointer_move(pointer, modifiers, &siblings)?;
        let committed = self.update_viewport(outcome.viewport, |config| {
            config.set_element_position(outcome.element, outcome.position)
        });
        committed.then_some(outcome.position)
    }

    /// End the session. Guides are cleared.
    pub fn pointer_up(&mut self) -> Option<ElementId> {
        self.interaction.end()
    }

    /// Drop the session without a pointer-up (focus loss, teardown).
    pub fn cancel_interaction(&mut self) {
        self.interaction.cancel();
    }

    /// Dispatch a pointer event. Returns whether the document or session changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                target: Some(target),
            } => self.pointer_down(target, position),
            PointerEvent::Down {
                position,
                target: None,
            } => self.pointer_down_at(position).is_some(),
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(position, modifiers).is_some(),
            PointerEvent::Up { .. } => self.pointer_up().is_some(),
        }
    }

    /// Alignment guides to draw for the current move.
    pub fn guides(&self) -> &[AlignmentGuide] {
        self.interaction.guides()
    }

    /// Append a link to the active viewport below the last one.
    ///
    /// Returns `None` once link ids are exhausted.
    pub fn add_link(&mut self) -> Option<ElementId> {
        let Some(id) = self.link_ids.next_id() else {
            log::warn!("No link ids left; link not added");
            return None;
        };
        let viewport = self.view_mode;
        self.update_viewport(viewport, |config| {
            config.push_link(id, viewport);
            true
        });
        log::debug!("Added link-{id} on {viewport}");
        Some(ElementId::Link(id))
    }

    /// Remove a link from the active viewport.
    pub fn remove_link(&mut self, id: u64) -> bool {
        let removed =
            self.update_viewport(self.view_mode, |config| config.remove_link(id).is_some());
        if removed {
            let element = ElementId::Link(id);
            if self.selected == Some(element) {
                self.selected = None;
            }
            if self.interaction.state().element() == Some(element) {
                self.interaction.cancel();
            }
            log::debug!("Removed link-{id} from {}", self.view_mode);
        }
        removed
    }

    /// Move `dragged` into `target`'s slot in the active viewport's link list.
    pub fn reorder_links(&mut self, dragged: u64, target: u64) -> bool {
        self.update_viewport(self.view_mode, |config| config.reorder_links(dragged, target))
    }

    pub fn export_json(&self) -> ExportResult<String> {
        self.document.to_json()
    }

    pub fn export_to_dir(&self, dir: &Path) -> ExportResult<PathBuf> {
        export::export_to_dir(&self.document, dir)
    }

    /// Edit a copy of one viewport and swap it in if `edit` reports a change.
    pub(crate) fn update_viewport(
        &mut self,
        viewport: Viewport,
        edit: impl FnOnce(&mut ViewportConfig) -> bool,
    ) -> bool {
        let mut next = self.document.viewport(viewport).clone();
        if !edit(&mut next) {
            return false;
        }
        self.document.replace_viewport(viewport, next);
        true
    }

    pub(crate) fn document_mut(&mut self) -> &mut PageConfig {
        &mut self.document
    }
}
