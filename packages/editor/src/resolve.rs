//! Selection resolution for the config panel.

use serde::Serialize;
use vitrine_model::{ChildKind, GroupId, SelectionTarget};

use crate::EditorStore;

/// Where the current selection points in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Resolved {
    /// Nothing is selected
    Nothing,
    Section {
        group: GroupId,
        index: usize,
    },
    Child {
        group: GroupId,
        section_index: usize,
        child_index: usize,
        kind: ChildKind,
    },
    /// The selection points at something that does not exist (panel shows a neutral state)
    NotFound,
}

impl EditorStore {
    /// Resolve the current selection against the open page
    ///
    /// The routing kind of a child ref is not checked against the section
    /// type; parent and child ids alone decide.
    pub fn resolve_selection(&self) -> Resolved {
        match self.selected() {
            None => Resolved::Nothing,
            Some(target) => self.resolve(target),
        }
    }

    pub fn resolve(&self, target: &SelectionTarget) -> Resolved {
        let Some((group, section_index)) = self.groups().locate(target.section_id()) else {
            return Resolved::NotFound;
        };

        match target {
            SelectionTarget::Section { .. } => Resolved::Section {
                group,
                index: section_index,
            },
            SelectionTarget::Child { child_id, kind, .. } => {
                let child_index = self.groups().get(group)[section_index]
                    .settings
                    .blocks()
                    .and_then(|children| children.position(child_id));

                match child_index {
                    Some(child_index) => Resolved::Child {
                        group,
                        section_index,
                        child_index,
                        kind: kind.clone(),
                    },
                    None => Resolved::NotFound,
                }
            }
        }
    }
}
