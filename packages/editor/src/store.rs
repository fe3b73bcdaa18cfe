//! # Section Store
//!
//! Single source of truth for the open page: the four ordered groups plus
//! selection, hover and config-panel state.
//!
//! One store is owned by the editor shell and handed to sidebars, forms and
//! the preview. Its lifetime is explicit:
//!
//! ```text
//! new() → init(snapshot) → mutations… → dispose()
//! ```
//!
//! ## Failure semantics
//!
//! Mutations never fail. A section or child id that does not resolve (a
//! stale reference to something already deleted) is a traced no-op.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info, trace};
use vitrine_model::{
    drag_indices, fresh_id, move_item, normalize_groups, GroupId, IdSource, PageDocument, PageGroups, PageSnapshot, PageType,
    Section, SectionKind, SectionSettings, SectionType, SelectionTarget, TimestampIds,
};

use crate::EditorError;

/// Editable page state
pub struct EditorStore {
    groups: PageGroups,
    selected: Option<SelectionTarget>,
    hovered: Option<SelectionTarget>,
    config_panel_open: bool,
    page_type: PageType,
    pub(crate) ids: Box<dyn IdSource>,
}

impl fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorStore")
            .field("groups", &self.groups)
            .field("selected", &self.selected)
            .field("hovered", &self.hovered)
            .field("config_panel_open", &self.config_panel_open)
            .field("page_type", &self.page_type)
            .finish_non_exhaustive()
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// Empty store using wall-clock ids
    pub fn new() -> Self {
        Self::with_id_source(TimestampIds::new())
    }

    /// Empty store with a custom id source
    pub fn with_id_source(ids: impl IdSource + 'static) -> Self {
        Self {
            groups: PageGroups::new(),
            selected: None,
            hovered: None,
            config_panel_open: false,
            page_type: PageType::default(),
            ids: Box::new(ids),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle

    /// Load a persisted page, replacing whatever was open
    ///
    /// Legacy type tags are normalized before any section is typed, so
    /// nothing downstream ever sees them.
    pub fn init(&mut self, snapshot: PageSnapshot) -> Result<(), EditorError> {
        let document = PageDocument::load(snapshot)?;
        self.open_document(document);
        Ok(())
    }

    /// Load a persisted page from JSON text
    pub fn init_from_json(&mut self, json: &str) -> Result<(), EditorError> {
        self.init(PageSnapshot::from_json(json)?)
    }

    /// Replace the open page with an already loaded document
    pub fn open_document(&mut self, document: PageDocument) {
        self.reset_interaction();
        self.page_type = document.page_type;
        self.groups = document.groups;
        info!(page_type = ?self.page_type, sections = self.groups.len(), "Opened page");
    }

    /// Tear down the open page
    pub fn dispose(&mut self) {
        self.reset_interaction();
        self.groups = PageGroups::new();
        self.page_type = PageType::default();
        debug!("Disposed editor store");
    }

    fn reset_interaction(&mut self) {
        self.selected = None;
        self.hovered = None;
        self.config_panel_open = false;
    }

    /// Persisted form of the open page (for the save collaborator)
    pub fn snapshot(&self) -> PageSnapshot {
        PageDocument {
            page_type: self.page_type,
            groups: self.groups.clone(),
        }
        .to_snapshot()
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(self.snapshot().to_json_pretty()?)
    }

    /// Load a page from a JSON file
    pub fn load_file(&mut self, path: &Path) -> Result<(), EditorError> {
        let json = fs::read_to_string(path)?;
        self.init_from_json(&json)
    }

    /// Write the open page to a JSON file
    pub fn save_file(&self, path: &Path) -> Result<(), EditorError> {
        fs::write(path, self.to_json_pretty()?)?;
        debug!(path = %path.display(), "Saved page");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read access

    pub fn groups(&self) -> &PageGroups {
        &self.groups
    }

    pub fn group(&self, group: GroupId) -> &[Section] {
        self.groups.get(group)
    }

    /// Sections the preview renders, in order
    pub fn visible_sections(&self, group: GroupId) -> impl Iterator<Item = &Section> {
        self.groups.get(group).iter().filter(|s| s.visible)
    }

    pub fn section(&self, group: GroupId, section_id: &str) -> Option<&Section> {
        self.groups.section(group, section_id)
    }

    /// Find a section without knowing its group
    pub fn find_section(&self, section_id: &str) -> Option<(GroupId, &Section)> {
        let (group, index) = self.groups.locate(section_id)?;
        Some((group, &self.groups.get(group)[index]))
    }

    /// Typed settings of a section, if it is of kind `S`
    pub fn settings<S: SectionKind>(&self, group: GroupId, section_id: &str) -> Option<&S> {
        self.section(group, section_id)?.settings_as::<S>()
    }

    pub fn selected(&self) -> Option<&SelectionTarget> {
        self.selected.as_ref()
    }

    /// Selection in its flat string form
    pub fn selected_section_id(&self) -> Option<String> {
        self.selected.as_ref().map(SelectionTarget::encode)
    }

    pub fn hovered(&self) -> Option<&SelectionTarget> {
        self.hovered.as_ref()
    }

    pub fn is_config_panel_open(&self) -> bool {
        self.config_panel_open
    }

    pub fn page_type(&self) -> PageType {
        self.page_type
    }

    // ------------------------------------------------------------------
    // Selection and panel

    /// Select a section id or an encoded child ref; `None` clears
    ///
    /// Existence is not checked: an unknown target resolves to "not found".
    pub fn select_section(&mut self, id_or_ref: Option<&str>) {
        self.select(id_or_ref.map(SelectionTarget::parse));
    }

    pub fn select(&mut self, target: Option<SelectionTarget>) {
        trace!(target = ?target, "Select");
        self.selected = target;
    }

    pub fn set_hovered_section(&mut self, id_or_ref: Option<&str>) {
        self.hovered = id_or_ref.map(SelectionTarget::parse);
    }

    pub fn set_hovered(&mut self, target: Option<SelectionTarget>) {
        self.hovered = target;
    }

    /// Open or close the config panel without touching the selection
    pub fn toggle_config_panel(&mut self, open: bool) {
        self.config_panel_open = open;
    }

    pub fn set_page_type(&mut self, page_type: PageType) {
        self.page_type = page_type;
    }

    // ------------------------------------------------------------------
    // Settings

    /// Replace a section's settings wholesale
    ///
    /// This is not a merge: fields absent from `settings` are gone afterwards.
    /// No-op if the section is missing or is not of kind `S`.
    pub fn update_section_settings<S: SectionKind>(&mut self, group: GroupId, section_id: &str, settings: S) {
        let Some(section) = self.groups.section_mut(group, section_id) else {
            trace!(%group, section_id, "update_section_settings: section not found");
            return;
        };

        if section.section_type() != Some(S::TYPE) {
            trace!(%group, section_id, expected = %S::TYPE, actual = section.type_tag(), "update_section_settings: type mismatch");
            return;
        }

        section.settings = settings.into_settings();
        debug!(%group, section_id, section_type = %S::TYPE, "Updated section settings");
    }

    /// Untyped form of [`update_section_settings`](Self::update_section_settings)
    ///
    /// The new settings must be of the same type as the old ones.
    pub fn replace_section_settings(&mut self, group: GroupId, section_id: &str, settings: SectionSettings) {
        let Some(section) = self.groups.section_mut(group, section_id) else {
            trace!(%group, section_id, "replace_section_settings: section not found");
            return;
        };

        if section.type_tag() != settings.type_tag() {
            trace!(%group, section_id, expected = section.type_tag(), actual = settings.type_tag(), "replace_section_settings: type mismatch");
            return;
        }

        section.settings = settings;
        debug!(%group, section_id, "Replaced section settings");
    }

    // ------------------------------------------------------------------
    // Sections

    /// Append a new section to a group; returns its id
    pub fn add_section(&mut self, group: GroupId, name: Option<&str>, settings: impl Into<SectionSettings>) -> String {
        let settings = settings.into();
        let id = fresh_id(self.ids.as_mut(), settings.type_tag(), |id| self.groups.locate(id).is_some());
        let name = name
            .map(str::to_string)
            .or_else(|| settings.section_type().map(|t| SectionType::default_name(t).to_string()))
            .unwrap_or_else(|| settings.type_tag().to_string());

        debug!(%group, section_id = %id, section_type = settings.type_tag(), "Added section");
        self.groups.get_mut(group).push(Section::new(id.clone(), name, settings));
        id
    }

    /// Remove a section; selection and hover inside it are cleared
    pub fn delete_section(&mut self, group: GroupId, section_id: &str) {
        let sections = self.groups.get_mut(group);
        let before = sections.len();
        sections.retain(|s| s.id != section_id);

        if sections.len() == before {
            trace!(%group, section_id, "delete_section: section not found");
            return;
        }

        if self.selected.as_ref().is_some_and(|t| t.is_within(section_id)) {
            self.selected = None;
            self.config_panel_open = false;
        }
        if self.hovered.as_ref().is_some_and(|t| t.is_within(section_id)) {
            self.hovered = None;
        }
        debug!(%group, section_id, "Deleted section");
    }

    pub fn toggle_section_visibility(&mut self, group: GroupId, section_id: &str) {
        match self.groups.section_mut(group, section_id) {
            Some(section) => {
                section.visible = !section.visible;
                debug!(%group, section_id, visible = section.visible, "Toggled section visibility");
            }
            None => trace!(%group, section_id, "toggle_section_visibility: section not found"),
        }
    }

    pub fn rename_section(&mut self, group: GroupId, section_id: &str, name: &str) {
        match self.groups.section_mut(group, section_id) {
            Some(section) => section.name = name.to_string(),
            None => trace!(%group, section_id, "rename_section: section not found"),
        }
    }

    /// Stable move within a group; out-of-range indices are a no-op
    pub fn reorder_within_group(&mut self, group: GroupId, from: usize, to: usize) {
        if move_item(self.groups.get_mut(group), from, to) {
            debug!(%group, from, to, "Reordered group");
        } else {
            trace!(%group, from, to, "reorder_within_group: index out of range");
        }
    }

    /// Drag-end within a group: move `active_id` to where `over_id` is
    pub fn move_section(&mut self, group: GroupId, active_id: &str, over_id: &str) {
        match drag_indices(self.groups.get(group), active_id, over_id, |s| s.id.as_str()) {
            Some((from, to)) => self.reorder_within_group(group, from, to),
            None => trace!(%group, active_id, over_id, "move_section: nothing to move"),
        }
    }

    // ------------------------------------------------------------------
    // Escape hatch

    /// Replace all four groups wholesale
    pub fn set_groups(&mut self, groups: PageGroups) {
        self.groups = groups;
    }

    /// Replace one group wholesale
    pub fn set_group(&mut self, group: GroupId, sections: Vec<Section>) {
        *self.groups.get_mut(group) = sections;
    }

    /// Rewrite legacy type tags still present in the open page
    ///
    /// Commits only if the normalized page differs from the current one and
    /// returns whether it did.
    pub fn normalize_legacy_types(&mut self) -> bool {
        let normalized = normalize_groups(&self.groups);
        if normalized == self.groups {
            return false;
        }
        self.set_groups(normalized);
        info!("Normalized legacy section types");
        true
    }

    pub(crate) fn clear_selection_if(&mut self, predicate: impl Fn(&SelectionTarget) -> bool) {
        if self.selected.as_ref().is_some_and(&predicate) {
            self.selected = None;
            self.config_panel_open = false;
        }
        if self.hovered.as_ref().is_some_and(&predicate) {
            self.hovered = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_model::settings::{FaqSettings, HeaderSettings, ImageBannerSettings, MulticolumnsSettings};
    use vitrine_model::{ChildKind, SequentialIds};

    fn store_with_template(ids: &[&str]) -> EditorStore {
        let mut store = EditorStore::with_id_source(SequentialIds::new());
        let sections = ids
            .iter()
            .map(|id| Section::new(*id, *id, ImageBannerSettings::default()))
            .collect();
        store.set_group(GroupId::Template, sections);
        store
    }

    fn template_ids(store: &EditorStore) -> Vec<&str> {
        store.group(GroupId::Template).iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_within_group() {
        let mut store = store_with_template(&["A", "B", "C", "D"]);

        store.reorder_within_group(GroupId::Template, 0, 2);
        assert_eq!(template_ids(&store), vec!["B", "C", "A", "D"]);

        store.reorder_within_group(GroupId::Template, 0, 9);
        assert_eq!(template_ids(&store), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_move_section_by_id() {
        let mut store = store_with_template(&["A", "B", "C"]);

        store.move_section(GroupId::Template, "C", "A");
        assert_eq!(template_ids(&store), vec!["C", "A", "B"]);

        store.move_section(GroupId::Template, "C", "C");
        store.move_section(GroupId::Template, "C", "gone");
        assert_eq!(template_ids(&store), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_settings_replace_is_not_a_merge() {
        let mut store = store_with_template(&[]);
        let id = store.add_section(
            GroupId::Template,
            None,
            ImageBannerSettings {
                heading: "Welcome".to_string(),
                subheading: "To the coast".to_string(),
                ..Default::default()
            },
        );

        store.update_section_settings(
            GroupId::Template,
            &id,
            ImageBannerSettings {
                heading: "Hello".to_string(),
                ..Default::default()
            },
        );

        let banner = store.settings::<ImageBannerSettings>(GroupId::Template, &id).unwrap();
        assert_eq!(banner.heading, "Hello");
        assert_eq!(banner.subheading, "");
    }

    #[test]
    fn test_update_settings_ignores_wrong_type_and_missing_section() {
        let mut store = store_with_template(&["A"]);
        let before = store.groups().clone();

        store.update_section_settings(GroupId::Template, "A", FaqSettings::default());
        store.update_section_settings(GroupId::Template, "missing", ImageBannerSettings::default());
        store.update_section_settings(GroupId::Header, "A", ImageBannerSettings::default());

        assert_eq!(store.groups(), &before);
    }

    #[test]
    fn test_add_section_uses_type_defaults() {
        let mut store = EditorStore::with_id_source(SequentialIds::new());
        let id = store.add_section(GroupId::Header, None, HeaderSettings::default());

        assert_eq!(id, "header-1");
        let (group, section) = store.find_section(&id).unwrap();
        assert_eq!(group, GroupId::Header);
        assert_eq!(section.name, "Header");
        assert!(section.visible);
    }

    #[test]
    fn test_add_section_skips_ids_already_on_the_page() {
        let mut store = EditorStore::with_id_source(SequentialIds::new());
        store.set_group(GroupId::Header, vec![Section::new("header-1", "Header", HeaderSettings::default())]);
        store.set_group(GroupId::Template, vec![Section::new("header-2", "Old header", HeaderSettings::default())]);

        let id = store.add_section(GroupId::Template, None, HeaderSettings::default());

        assert_eq!(id, "header-3");
        assert!(vitrine_model::snapshot::check_unique_ids(store.groups()).is_ok());
    }

    #[test]
    fn test_delete_section_clears_selection_inside_it() {
        let mut store = store_with_template(&["A", "B"]);

        store.select(Some(SelectionTarget::child("A", ChildKind::Child, "c1")));
        store.set_hovered_section(Some("A"));
        store.toggle_config_panel(true);

        store.delete_section(GroupId::Template, "A");

        assert_eq!(store.selected(), None);
        assert_eq!(store.hovered(), None);
        assert!(!store.is_config_panel_open());
        assert_eq!(template_ids(&store), vec!["B"]);
    }

    #[test]
    fn test_delete_other_section_keeps_selection() {
        let mut store = store_with_template(&["A", "B"]);
        store.select_section(Some("B"));
        store.toggle_config_panel(true);

        store.delete_section(GroupId::Template, "A");

        assert_eq!(store.selected_section_id().as_deref(), Some("B"));
        assert!(store.is_config_panel_open());
    }

    #[test]
    fn test_toggle_visibility_keeps_section_editable() {
        let mut store = store_with_template(&["A", "B"]);
        store.toggle_section_visibility(GroupId::Template, "A");

        let visible: Vec<&str> = store.visible_sections(GroupId::Template).map(|s| s.id.as_str()).collect();
        assert_eq!(visible, vec!["B"]);
        assert_eq!(template_ids(&store), vec!["A", "B"]);

        store.rename_section(GroupId::Template, "A", "Hidden hero");
        assert_eq!(store.section(GroupId::Template, "A").unwrap().name, "Hidden hero");
    }

    #[test]
    fn test_panel_is_independent_of_selection() {
        let mut store = store_with_template(&["A"]);
        store.select_section(Some("A"));
        store.toggle_config_panel(true);
        store.toggle_config_panel(false);

        assert_eq!(store.selected_section_id().as_deref(), Some("A"));
    }

    #[test]
    fn test_dispose_resets_everything() {
        let mut store = store_with_template(&["A"]);
        store.select_section(Some("A"));
        store.toggle_config_panel(true);
        store.set_page_type(PageType::Room);

        store.dispose();

        assert!(store.groups().is_empty());
        assert_eq!(store.selected(), None);
        assert!(!store.is_config_panel_open());
        assert_eq!(store.page_type(), PageType::Home);
    }

    #[test]
    fn test_normalize_legacy_types_commits_only_on_change() {
        let mut store = store_with_template(&["A"]);
        assert!(!store.normalize_legacy_types());

        let mut template = store.group(GroupId::Template).to_vec();
        template.push(Section::new(
            "legacy",
            "Columns",
            SectionSettings::Unknown {
                type_tag: "Multicolumn".to_string(),
                settings: serde_json::json!({ "heading": "Why us" }),
            },
        ));
        store.set_group(GroupId::Template, template);

        assert!(store.normalize_legacy_types());
        let columns = store.settings::<MulticolumnsSettings>(GroupId::Template, "legacy").unwrap();
        assert_eq!(columns.heading, "Why us");
        assert!(!store.normalize_legacy_types());
    }
}
