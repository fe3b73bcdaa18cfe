//! # Persisted Page Snapshot
//!
//! The wire form handed over by the save/load collaborator. Type tags are
//! kept as raw strings and settings as raw JSON so that legacy pages can be
//! normalized before anything is typed.
//!
//! ## Lifecycle
//!
//! ```text
//! JSON ─→ PageSnapshot ─→ normalize ─→ PageDocument (typed) ─→ PageSnapshot ─→ JSON
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::LoadError;
use crate::normalize::normalize_snapshot_in_place;
use crate::section::{GroupId, PageGroups, PageType, Section};

fn default_visible() -> bool {
    true
}

/// A section as persisted: raw type tag, raw settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSection {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub settings: Value,
}

/// The four groups as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(default)]
    pub page_type: PageType,
    #[serde(default)]
    pub header_group: Vec<RawSection>,
    #[serde(default)]
    pub aside_group: Vec<RawSection>,
    #[serde(default)]
    pub template: Vec<RawSection>,
    #[serde(default)]
    pub footer_group: Vec<RawSection>,
}

impl PageSnapshot {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a snapshot from a JSON file
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(std::io::Error::other)
    }

    pub fn group(&self, group: GroupId) -> &Vec<RawSection> {
        match group {
            GroupId::Header => &self.header_group,
            GroupId::Aside => &self.aside_group,
            GroupId::Template => &self.template,
            GroupId::Footer => &self.footer_group,
        }
    }

    pub fn group_mut(&mut self, group: GroupId) -> &mut Vec<RawSection> {
        match group {
            GroupId::Header => &mut self.header_group,
            GroupId::Aside => &mut self.aside_group,
            GroupId::Template => &mut self.template,
            GroupId::Footer => &mut self.footer_group,
        }
    }

    /// Every section in page order
    pub fn sections(&self) -> impl Iterator<Item = &RawSection> {
        self.header_group
            .iter()
            .chain(&self.aside_group)
            .chain(&self.template)
            .chain(&self.footer_group)
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut RawSection> {
        self.header_group
            .iter_mut()
            .chain(&mut self.aside_group)
            .chain(&mut self.template)
            .chain(&mut self.footer_group)
    }
}

/// A loaded, typed page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDocument {
    pub page_type: PageType,
    pub groups: PageGroups,
}

impl PageDocument {
    /// Normalize legacy type tags, then type every section
    ///
    /// Rejects settings that do not fit their type and duplicate ids.
    pub fn load(mut snapshot: PageSnapshot) -> Result<Self, LoadError> {
        let rewritten = normalize_snapshot_in_place(&mut snapshot);

        let mut groups = PageGroups::new();
        for group in GroupId::ALL {
            let raw_sections = std::mem::take(snapshot.group_mut(group));
            *groups.get_mut(group) = raw_sections
                .into_iter()
                .map(Section::try_from)
                .collect::<Result<Vec<_>, _>>()?;
        }

        check_unique_ids(&groups)?;

        info!(sections = groups.len(), legacy_tags = rewritten, "Loaded page snapshot");

        Ok(Self {
            page_type: snapshot.page_type,
            groups,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::load(PageSnapshot::from_json(json)?)
    }

    pub fn to_snapshot(&self) -> PageSnapshot {
        let raw = |sections: &Vec<Section>| -> Vec<RawSection> { sections.iter().cloned().map(RawSection::from).collect() };

        PageSnapshot {
            page_type: self.page_type,
            header_group: raw(&self.groups.header_group),
            aside_group: raw(&self.groups.aside_group),
            template: raw(&self.groups.template),
            footer_group: raw(&self.groups.footer_group),
        }
    }
}

/// Section ids unique across all groups, child ids unique within their parent
pub fn check_unique_ids(groups: &PageGroups) -> Result<(), LoadError> {
    let mut section_ids = HashSet::new();

    for (_, section) in groups.iter() {
        if !section_ids.insert(section.id.as_str()) {
            return Err(LoadError::DuplicateSectionId(section.id.clone()));
        }

        if let Some(blocks) = section.settings.blocks() {
            let mut child_ids = HashSet::new();
            for child_id in blocks.ids() {
                if !child_ids.insert(child_id) {
                    return Err(LoadError::DuplicateChildId {
                        section_id: section.id.clone(),
                        child_id: child_id.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
