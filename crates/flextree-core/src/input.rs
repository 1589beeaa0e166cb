//! Pointer and modifier input for the layout editor.

use crate::element::ElementId;
use crate::selection::HandleKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl bypasses guide discovery and snapping.
    pub fn snap_disabled(&self) -> bool {
        self.ctrl
    }

    /// Shift locks the aspect ratio while resizing.
    pub fn proportional(&self) -> bool {
        self.shift
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTarget {
    pub element: ElementId,
    /// `None` for the element body, which starts a drag.
    pub handle: Option<HandleKind>,
}

impl PointerTarget {
    pub fn body(element: ElementId) -> Self {
        Self {
            element,
            handle: None,
        }
    }

    pub fn handle(element: ElementId, handle: HandleKind) -> Self {
        Self {
            element,
            handle: Some(handle),
        }
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        /// Resolved by the rendering surface; `None` means hit-test the document.
        target: Option<PointerTarget>,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position } => *position,
        }
    }
}
