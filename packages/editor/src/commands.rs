//! # Editor Commands
//!
//! Serializable form of every store operation, for scripted edits and
//! replays.
//!
//! ```json
//! [
//!   { "op": "add_child", "group": "template", "sectionId": "s1", "shape": "icon" },
//!   { "op": "toggle_child", "group": "template", "sectionId": "s1", "childId": "c1" }
//! ]
//! ```
//!
//! ## Semantics
//!
//! - Commands have exactly the semantics of the store method they name.
//!   A command whose ids do not resolve is a no-op, so a script can always
//!   be replayed to the end.
//! - `replace_settings` carries raw JSON; it is typed against the target
//!   section's current type and dropped if it does not fit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use vitrine_model::{GroupId, PageType, SectionSettings, SectionType, SelectionTarget};

use crate::EditorStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EditorCommand {
    /// Select a section or child ref; `null` clears
    Select {
        target: Option<SelectionTarget>,
    },

    Hover {
        target: Option<SelectionTarget>,
    },

    ToggleConfigPanel {
        open: bool,
    },

    /// Replace a section's settings wholesale
    ReplaceSettings {
        group: GroupId,
        section_id: String,
        settings: Value,
    },

    ReorderGroup {
        group: GroupId,
        from: usize,
        to: usize,
    },

    MoveSection {
        group: GroupId,
        active_id: String,
        over_id: String,
    },

    AddSection {
        group: GroupId,
        section_type: SectionType,
        #[serde(default)]
        name: Option<String>,
    },

    DeleteSection {
        group: GroupId,
        section_id: String,
    },

    ToggleSection {
        group: GroupId,
        section_id: String,
    },

    RenameSection {
        group: GroupId,
        section_id: String,
        name: String,
    },

    /// Append a child; `shape` is a block shape tag such as `"icon"`
    AddChild {
        group: GroupId,
        section_id: String,
        #[serde(default)]
        shape: Option<String>,
    },

    ReorderChildren {
        group: GroupId,
        section_id: String,
        active_id: String,
        over_id: String,
    },

    ToggleChild {
        group: GroupId,
        section_id: String,
        child_id: String,
    },

    DeleteChild {
        group: GroupId,
        section_id: String,
        child_id: String,
    },

    /// Shallow-merge fields into one child
    PatchChild {
        group: GroupId,
        section_id: String,
        child_id: String,
        patch: Map<String, Value>,
    },

    SetPageType {
        page_type: PageType,
    },

    NormalizeLegacyTypes,
}

impl EditorStore {
    /// Apply one command; returns the id of a section or child it created
    pub fn apply(&mut self, command: &EditorCommand) -> Option<String> {
        match command {
            EditorCommand::Select { target } => self.select(target.clone()),
            EditorCommand::Hover { target } => self.set_hovered(target.clone()),
            EditorCommand::ToggleConfigPanel { open } => self.toggle_config_panel(*open),
            EditorCommand::ReplaceSettings {
                group,
                section_id,
                settings,
            } => self.apply_replace_settings(*group, section_id, settings),
            EditorCommand::ReorderGroup { group, from, to } => self.reorder_within_group(*group, *from, *to),
            EditorCommand::MoveSection {
                group,
                active_id,
                over_id,
            } => self.move_section(*group, active_id, over_id),
            EditorCommand::AddSection {
                group,
                section_type,
                name,
            } => {
                let settings = SectionSettings::defaults_for(*section_type);
                return Some(self.add_section(*group, name.as_deref(), settings));
            }
            EditorCommand::DeleteSection { group, section_id } => self.delete_section(*group, section_id),
            EditorCommand::ToggleSection { group, section_id } => self.toggle_section_visibility(*group, section_id),
            EditorCommand::RenameSection {
                group,
                section_id,
                name,
            } => self.rename_section(*group, section_id, name),
            EditorCommand::AddChild {
                group,
                section_id,
                shape,
            } => return self.add_child_block_dyn(*group, section_id, shape.as_deref()),
            EditorCommand::ReorderChildren {
                group,
                section_id,
                active_id,
                over_id,
            } => self.reorder_child_blocks(*group, section_id, active_id, over_id),
            EditorCommand::ToggleChild {
                group,
                section_id,
                child_id,
            } => self.toggle_child_visibility(*group, section_id, child_id),
            EditorCommand::DeleteChild {
                group,
                section_id,
                child_id,
            } => self.delete_child_block(*group, section_id, child_id),
            EditorCommand::PatchChild {
                group,
                section_id,
                child_id,
                patch,
            } => {
                self.patch_child_block(*group, section_id, child_id, patch);
            }
            EditorCommand::SetPageType { page_type } => self.set_page_type(*page_type),
            EditorCommand::NormalizeLegacyTypes => {
                self.normalize_legacy_types();
            }
        }
        None
    }

    /// Replay a script in order; returns every created id
    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a EditorCommand>) -> Vec<String> {
        commands.into_iter().filter_map(|command| self.apply(command)).collect()
    }

    fn apply_replace_settings(&mut self, group: GroupId, section_id: &str, settings: &Value) {
        let Some(section) = self.section(group, section_id) else {
            return;
        };

        match SectionSettings::from_json(section.type_tag(), settings.clone()) {
            Ok(settings) => self.replace_section_settings(group, section_id, settings),
            Err(e) => warn!(%group, section_id, error = %e, "Settings do not fit section type"),
        }
    }
}

/// Parse a JSON array of commands
pub fn parse_script(json: &str) -> Result<Vec<EditorCommand>, serde_json::Error> {
    serde_json::from_str(json)
}
