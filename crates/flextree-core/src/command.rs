//! Serializable editor commands, used to replay a recorded session.

use crate::document::{BioStyle, Design, LinkStyleOverrides, NameStyle};
use crate::editor::Editor;
use crate::element::ElementId;
use crate::geometry::Viewport;
use crate::input::{Modifiers, PointerTarget};
use crate::properties::PositionField;
use crate::selection::HandleKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One user action against the editor.
///
/// JSON form: `{"command": "pointerMove", "x": 120, "y": 300, "modifiers": {"ctrl": true}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorCommand {
    SetViewMode {
        view: Viewport,
    },
    Select {
        element: Option<ElementId>,
    },
    /// Press on the canvas. Without `element` the document is hit-tested.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        element: Option<ElementId>,
        #[serde(default)]
        handle: Option<HandleKind>,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    /// Canvas lost focus; drops any running session.
    Blur,
    AddLink,
    RemoveLink {
        id: u64,
    },
    ReorderLinks {
        dragged: u64,
        target: u64,
    },
    SetPositionField {
        element: ElementId,
        field: PositionField,
        value: i32,
    },
    ResetSize {
        element: ElementId,
    },
    SetProfileName {
        value: String,
    },
    SetProfileBio {
        value: String,
    },
    SetAvatarUrl {
        value: String,
    },
    SetNameStyle {
        style: Option<NameStyle>,
    },
    SetBioStyle {
        style: Option<BioStyle>,
    },
    SetLinkTitle {
        id: u64,
        value: String,
    },
    SetLinkUrl {
        id: u64,
        value: String,
    },
    SetLinkStyle {
        id: u64,
        #[serde(flatten)]
        overrides: LinkStyleOverrides,
    },
    SetDesign {
        design: Design,
    },
}

impl EditorCommand {
    /// Parse a JSON array of commands.
    pub fn parse_script(json: &str) -> Result<Vec<EditorCommand>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Editor {
    /// Apply one command. Returns `false` if it had no effect.
    pub fn apply(&mut self, command: EditorCommand) -> bool {
        log::trace!("Apply {command:?}");
        match command {
            EditorCommand::SetViewMode { view } => {
                self.set_view_mode(view);
                true
            }
            EditorCommand::Select { element } => {
                self.select(element);
                true
            }
            EditorCommand::PointerDown {
                x,
                y,
                element,
                handle,
            } => {
                let pointer = Point::new(x, y);
                match element {
                    Some(element) => self.pointer_down(PointerTarget { element, handle }, pointer),
                    None => self.pointer_down_at(pointer).is_some(),
                }
            }
            EditorCommand::PointerMove { x, y, modifiers } => {
                self.pointer_move(Point::new(x, y), modifiers).is_some()
            }
            EditorCommand::PointerUp { .. } => self.pointer_up().is_some(),
            EditorCommand::Blur => {
                self.cancel_interaction();
                true
            }
            EditorCommand::AddLink => self.add_link().is_some(),
            EditorCommand::RemoveLink { id } => self.remove_link(id),
            EditorCommand::ReorderLinks { dragged, target } => self.reorder_links(dragged, target),
            EditorCommand::SetPositionField {
                element,
                field,
                value,
            } => self.set_position_field(element, field, value).is_some(),
            EditorCommand::ResetSize { element } => self.reset_size(element).is_some(),
            EditorCommand::SetProfileName { value } => {
                self.set_profile_name(value);
                true
            }
            EditorCommand::SetProfileBio { value } => {
                self.set_profile_bio(value);
                true
            }
            EditorCommand::SetAvatarUrl { value } => {
                self.set_avatar_url(value);
                true
            }
            EditorCommand::SetNameStyle { style } => {
                self.set_name_style(style);
                true
            }
            EditorCommand::SetBioStyle { style } => {
                self.set_bio_style(style);
                true
            }
            EditorCommand::SetLinkTitle { id, value } => self.set_link_title(id, value),
            EditorCommand::SetLinkUrl { id, value } => self.set_link_url(id, value),
            EditorCommand::SetLinkStyle { id, overrides } => self.set_link_style(id, overrides),
            EditorCommand::SetDesign { design } => {
                self.set_design(design);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ElementPosition;

    #[test]
    fn test_parse_script() {
        let script = r##"[
            {"command": "setViewMode", "view": "desktop"},
            {"command": "pointerDown", "x": 400, "y": 150, "element": "avatar", "handle": "se"},
            {"command": "pointerMove", "x": 420, "y": 170, "modifiers": {"shift": true}},
            {"command": "pointerUp", "x": 420, "y": 170},
            {"command": "setLinkStyle", "id": 1, "customColor": "#000000"},
            {"command": "addLink"}
        ]"##;
        let commands = EditorCommand::parse_script(script).unwrap();
        assert_eq!(commands.len(), 6);
        assert_eq!(
            commands[1],
            EditorCommand::PointerDown {
                x: 400.0,
                y: 150.0,
                element: Some(ElementId::Avatar),
                handle: Some("se".parse().unwrap()),
            }
        );
    }

    #[test]
    fn test_apply_script() {
        let mut editor = Editor::new();
        let script = r##"[
            {"command": "pointerDown", "x": 140, "y": 240, "element": "link-1"},
            {"command": "pointerMove", "x": 140, "y": 250, "modifiers": {"ctrl": true}},
            {"command": "pointerUp", "x": 140, "y": 250},
            {"command": "reorderLinks", "dragged": 2, "target": 1},
            {"command": "setLinkStyle", "id": 2, "customColor": "#000000", "fontSize": 18}
        ]"##;
        for command in EditorCommand::parse_script(script).unwrap() {
            assert!(editor.apply(command));
        }
        let mobile = &editor.document().mobile;
        assert_eq!(
            mobile.link(1).unwrap().position,
            ElementPosition::new(10, 230, 260, 40)
        );
        assert_eq!(mobile.link(2).unwrap().order, 1);
        assert_eq!(mobile.link(2).unwrap().font_size, Some(18));
        assert!(editor.guides().is_empty());
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(EditorCommand::parse_script(r#"[{"command": "undo"}]"#).is_err());
    }
}
