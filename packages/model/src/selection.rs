//! # Selection Targets
//!
//! The node focused in the config panel: a whole section, or one child block
//! inside a section.
//!
//! Internally this is a sum type. The flat string form exists for boundaries
//! that need one (URL hash, persisted editor state, command scripts):
//!
//! ```text
//! "<sectionId>"                      → SelectionTarget::Section
//! "<parentId>:<kind>:<childId>"      → SelectionTarget::Child
//! ```
//!
//! [`decode_child_ref`] is the only parser of this format.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Field separator of the child reference format
pub const SEPARATOR: char = ':';

/// Per-parent tag telling the config panel which child editor to route to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildKind {
    /// Generic item arrays (columns, gallery items, blocks)
    Child,
    /// Slideshow slides
    Slide,
    /// Content blocks of text-style sections
    Block,
    /// Any other tag, kept verbatim
    Other(String),
}

impl ChildKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChildKind::Child => "child",
            ChildKind::Slide => "slide",
            ChildKind::Block => "block",
            ChildKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for ChildKind {
    fn from(tag: &str) -> Self {
        match tag {
            "child" => ChildKind::Child,
            "slide" => ChildKind::Slide,
            "block" => ChildKind::Block,
            other => ChildKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChildKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChildKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ChildKind::from(tag.as_str()))
    }
}

/// Decoded `parent:kind:child` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildRef {
    pub parent_id: String,
    pub kind: ChildKind,
    pub child_id: String,
}

/// Encode a child reference as `parent:kind:child`
pub fn encode_child_ref(parent_id: &str, kind: &ChildKind, child_id: &str) -> String {
    debug_assert!(!parent_id.contains(SEPARATOR), "parent id contains separator");
    debug_assert!(!child_id.contains(SEPARATOR), "child id contains separator");
    format!("{parent_id}{SEPARATOR}{kind}{SEPARATOR}{child_id}")
}

/// Decode a child reference
///
/// Returns `None` unless the input is exactly three non-empty fields, which
/// includes every bare section id.
pub fn decode_child_ref(reference: &str) -> Option<ChildRef> {
    let mut parts = reference.split(SEPARATOR);
    let parent_id = parts.next().filter(|p| !p.is_empty())?;
    let kind = parts.next().filter(|p| !p.is_empty())?;
    let child_id = parts.next().filter(|p| !p.is_empty())?;

    if parts.next().is_some() {
        return None;
    }

    Some(ChildRef {
        parent_id: parent_id.to_string(),
        kind: ChildKind::from(kind),
        child_id: child_id.to_string(),
    })
}

/// Currently focused node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionTarget {
    Section {
        id: String,
    },
    Child {
        parent_id: String,
        kind: ChildKind,
        child_id: String,
    },
}

impl SelectionTarget {
    pub fn section(id: impl Into<String>) -> Self {
        SelectionTarget::Section { id: id.into() }
    }

    pub fn child(parent_id: impl Into<String>, kind: ChildKind, child_id: impl Into<String>) -> Self {
        SelectionTarget::Child {
            parent_id: parent_id.into(),
            kind,
            child_id: child_id.into(),
        }
    }

    /// Parse the flat string form; anything that is not a child ref is a bare id
    pub fn parse(raw: &str) -> Self {
        match decode_child_ref(raw) {
            Some(ChildRef { parent_id, kind, child_id }) => SelectionTarget::Child {
                parent_id,
                kind,
                child_id,
            },
            None => SelectionTarget::Section { id: raw.to_string() },
        }
    }

    /// Flat string form
    pub fn encode(&self) -> String {
        match self {
            SelectionTarget::Section { id } => id.clone(),
            SelectionTarget::Child { parent_id, kind, child_id } => {
                encode_child_ref(parent_id, kind, child_id)
            }
        }
    }

    /// Id of the section this target lives in
    pub fn section_id(&self) -> &str {
        match self {
            SelectionTarget::Section { id } => id,
            SelectionTarget::Child { parent_id, .. } => parent_id,
        }
    }

    /// True if the target is the section itself or any child inside it
    pub fn is_within(&self, section_id: &str) -> bool {
        self.section_id() == section_id
    }

    /// True if the target is exactly this child of this section
    pub fn is_child(&self, section_id: &str, child: &str) -> bool {
        matches!(
            self,
            SelectionTarget::Child { parent_id, child_id, .. }
                if parent_id == section_id && child_id == child
        )
    }
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for SelectionTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SelectionTarget::parse(s))
    }
}

impl Serialize for SelectionTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for SelectionTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SelectionTarget::parse(&raw))
    }
}
