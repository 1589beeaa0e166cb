//! Field-level edits from the properties panel.
//!
//! Numeric geometry goes through the same clamp as pointer interaction, so a
//! typed value can never produce a placement a drag could not.

use crate::constraints;
use crate::document::{BioStyle, Design, LinkStyleOverrides, NameStyle, default_size};
use crate::editor::Editor;
use crate::element::{ElementId, ElementKind};
use crate::geometry::{ElementPosition, Viewport};
use serde::{Deserialize, Serialize};

/// One numeric geometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionField {
    X,
    Y,
    Width,
    Height,
}

/// Replace one field of `current` and clamp the result.
pub fn apply_position_field(
    kind: ElementKind,
    viewport: Viewport,
    current: &ElementPosition,
    field: PositionField,
    value: i32,
) -> ElementPosition {
    let mut next = *current;
    match field {
        PositionField::X => next.x = value,
        PositionField::Y => next.y = value,
        PositionField::Width => next.width = value,
        PositionField::Height => next.height = value,
    }
    constraints::clamp_position(kind, viewport, &next)
}

/// Restore the viewport's default size, keeping the origin where possible.
pub fn reset_size(
    kind: ElementKind,
    viewport: Viewport,
    current: &ElementPosition,
) -> ElementPosition {
    let (width, height) = default_size(kind, viewport);
    constraints::clamp_position(
        kind,
        viewport,
        &ElementPosition::new(current.x, current.y, width, height),
    )
}

impl Editor {
    /// Set x, y, width or height of an element in the active viewport.
    ///
    /// Returns the committed placement, or `None` for an unknown element.
    pub fn set_position_field(
        &mut self,
        element: ElementId,
        field: PositionField,
        value: i32,
    ) -> Option<ElementPosition> {
        let viewport = self.view_mode();
        let current = self.document().element_position(viewport, element)?;
        let next = apply_position_field(element.kind(), viewport, &current, field, value);
        self.update_viewport(viewport, |config| config.set_element_position(element, next))
            .then_some(next)
    }

    /// Reset an element to the default size for the active viewport.
    pub fn reset_size(&mut self, element: ElementId) -> Option<ElementPosition> {
        let viewport = self.view_mode();
        let current = self.document().element_position(viewport, element)?;
        let next = reset_size(element.kind(), viewport, &current);
        self.update_viewport(viewport, |config| config.set_element_position(element, next))
            .then_some(next)
    }

    pub fn set_profile_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.update_viewport(self.view_mode(), |config| {
            config.profile.name = name;
            true
        });
    }

    pub fn set_profile_bio(&mut self, bio: impl Into<String>) {
        let bio = bio.into();
        self.update_viewport(self.view_mode(), |config| {
            config.profile.bio = bio;
            true
        });
    }

    pub fn set_avatar_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.update_viewport(self.view_mode(), |config| {
            config.profile.avatar_url = url;
            true
        });
    }

    pub fn set_name_style(&mut self, style: Option<NameStyle>) {
        self.update_viewport(self.view_mode(), |config| {
            config.profile.name_style = style;
            true
        });
    }

    pub fn set_bio_style(&mut self, style: Option<BioStyle>) {
        self.update_viewport(self.view_mode(), |config| {
            config.profile.bio_style = style;
            true
        });
    }

    pub fn set_link_title(&mut self, id: u64, title: impl Into<String>) -> bool {
        let title = title.into();
        self.update_viewport(self.view_mode(), |config| match config.link_mut(id) {
            Some(link) => {
                link.title = title;
                true
            }
            None => false,
        })
    }

    pub fn set_link_url(&mut self, id: u64, url: impl Into<String>) -> bool {
        let url = url.into();
        self.update_viewport(self.view_mode(), |config| match config.link_mut(id) {
            Some(link) => {
                link.url = url;
                true
            }
            None => false,
        })
    }

    pub fn set_link_style(&mut self, id: u64, overrides: LinkStyleOverrides) -> bool {
        self.update_viewport(self.view_mode(), |config| match config.link_mut(id) {
            Some(link) => {
                link.set_style_overrides(overrides);
                true
            }
            None => false,
        })
    }

    /// Replace the design shared by both viewports.
    pub fn set_design(&mut self, design: Design) {
        self.document_mut().design = design;
    }
}
