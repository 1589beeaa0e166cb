//! Identifiers for the placeable elements of a page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix used for link element ids (`link-<id>`).
const LINK_PREFIX: &str = "link-";

/// Category of a placeable element. Each category has its own size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Avatar,
    Bio,
    Link,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [ElementKind::Avatar, ElementKind::Bio, ElementKind::Link];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Avatar => "avatar",
            ElementKind::Bio => "bio",
            ElementKind::Link => "link",
        }
    }
}

/// Identifies one placeable element within a viewport.
///
/// Serialized as `"avatar"`, `"bio"` or `"link-<id>"`, the same strings the
/// properties panel uses for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementId {
    Avatar,
    Bio,
    Link(u64),
}

impl ElementId {
    /// The category that decides this element's size limits.
    pub fn kind(self) -> ElementKind {
        match self {
            ElementId::Avatar => ElementKind::Avatar,
            ElementId::Bio => ElementKind::Bio,
            ElementId::Link(_) => ElementKind::Link,
        }
    }

    /// The numeric link id, if this is a link.
    pub fn link_id(self) -> Option<u64> {
        match self {
            ElementId::Link(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Avatar => f.write_str("avatar"),
            ElementId::Bio => f.write_str("bio"),
            ElementId::Link(id) => write!(f, "{LINK_PREFIX}{id}"),
        }
    }
}

/// Errors from parsing an element id string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementIdError {
    #[error("Empty element id")]
    Empty,
    #[error("Invalid link id in {0:?}")]
    InvalidLinkId(String),
    #[error("Unknown element id: {0:?}")]
    Unknown(String),
}

impl FromStr for ElementId {
    type Err = ElementIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(ElementIdError::Empty),
            "avatar" => Ok(ElementId::Avatar),
            "bio" => Ok(ElementId::Bio),
            _ => match s.strip_prefix(LINK_PREFIX) {
                Some(rest) => rest
                    .parse::<u64>()
                    .map(ElementId::Link)
                    .map_err(|_| ElementIdError::InvalidLinkId(s.to_string())),
                None => Err(ElementIdError::Unknown(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for ElementId {
    type Error = ElementIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.to_string()
    }
}
