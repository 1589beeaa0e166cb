//! FlexTree Core Library
//!
//! Layout engine for the link-in-bio page editor: element geometry, size
//! constraints, alignment guides and the drag/resize state machine that keeps
//! the configuration document valid for each viewport.

pub mod command;
pub mod constraints;
pub mod document;
pub mod editor;
pub mod element;
pub mod export;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod properties;
pub mod selection;
pub mod settings;
pub mod snap;

pub use command::EditorCommand;
pub use constraints::{SizeLimits, clamp, size_limits};
pub use document::{Design, Link, PageConfig, Profile, ViewportConfig};
pub use editor::{Editor, LinkIdAllocator};
pub use element::{ElementId, ElementKind};
pub use export::{EXPORT_FILE_NAME, ExportError, ExportResult, export_to_dir};
pub use geometry::{Bounds, ContainerBounds, ElementPosition, Viewport, bounds, container_bounds};
pub use input::{Modifiers, PointerEvent, PointerTarget};
pub use interaction::{Interaction, InteractionState, MoveOutcome, RenderSurface};
pub use properties::PositionField;
pub use selection::{Corner, Edge, HandleKind};
pub use settings::{EngineSettings, SettingsError};
pub use snap::{
    AlignmentGuide, GuideOrientation, SnapResult, SnapType, find_alignment_guides, snap_to_guides,
};
