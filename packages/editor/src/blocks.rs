//! # Child Block Mutations
//!
//! Operations on the nested blocks of a section (columns, slides, FAQ items,
//! ...). Every write works on a copy of the section's settings and commits
//! through the store's settings replace, so a child edit is indistinguishable
//! from a settings edit for anything observing the store.
//!
//! ```text
//! copy settings ─→ edit child array ─→ replace settings
//! ```
//!
//! The typed entry points are generic over the settings struct. The
//! untyped ones go through [`BlockList`] and work for any section that owns
//! children.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use vitrine_model::{
    drag_indices, fresh_id, BlockContainer, BlockList, ChildBlock, GroupId, SectionSettings, SelectionTarget,
};

use crate::EditorStore;

impl EditorStore {
    /// Append a child with defaults and select it; returns the new child id
    ///
    /// `None` if the section is missing or not of kind `S`.
    pub fn add_child_block<S: BlockContainer>(
        &mut self,
        group: GroupId,
        section_id: &str,
        shape: <S::Block as ChildBlock>::Shape,
    ) -> Option<String> {
        let Some(mut settings) = self.settings::<S>(group, section_id).cloned() else {
            trace!(%group, section_id, "add_child_block: no such container");
            return None;
        };

        let child_id = fresh_id(self.ids.as_mut(), <S::Block as ChildBlock>::ID_PREFIX, |id| {
            settings.blocks().iter().any(|b| b.id() == id)
        });
        settings
            .blocks_mut()
            .push(<S::Block as ChildBlock>::with_defaults(child_id.clone(), shape));
        self.update_section_settings(group, section_id, settings);

        self.select(Some(SelectionTarget::child(section_id, S::CHILD_KIND, child_id.as_str())));
        self.toggle_config_panel(true);

        debug!(%group, section_id, child_id = %child_id, "Added child block");
        Some(child_id)
    }

    /// Edit one child in place; its id is restored afterwards
    pub fn edit_child_block<S: BlockContainer>(
        &mut self,
        group: GroupId,
        section_id: &str,
        child_id: &str,
        edit: impl FnOnce(&mut S::Block),
    ) -> bool {
        let Some(mut settings) = self.settings::<S>(group, section_id).cloned() else {
            trace!(%group, section_id, "edit_child_block: no such container");
            return false;
        };

        let Some(block) = settings.blocks_mut().iter_mut().find(|b| b.id() == child_id) else {
            trace!(%group, section_id, child_id, "edit_child_block: child not found");
            return false;
        };

        let original = block.clone();
        edit(block);
        if block.id() != child_id {
            warn!(%group, section_id, child_id, "Child block ids cannot be edited");
            *block = original;
            return false;
        }

        self.update_section_settings(group, section_id, settings);
        true
    }

    /// Drag-end for children: move `active_id` to where `over_id` is
    pub fn reorder_child_blocks(&mut self, group: GroupId, section_id: &str, active_id: &str, over_id: &str) {
        let indices = self
            .child_list(group, section_id)
            .and_then(|list| drag_indices(&list.ids(), active_id, over_id, |id| *id));

        match indices {
            Some((from, to)) => {
                self.move_child_block(group, section_id, from, to);
            }
            None => trace!(%group, section_id, active_id, over_id, "reorder_child_blocks: nothing to move"),
        }
    }

    /// Stable move by index; false if out of range or not a container
    pub fn move_child_block(&mut self, group: GroupId, section_id: &str, from: usize, to: usize) -> bool {
        let moved = self.with_child_list(group, section_id, |list| list.move_block(from, to));
        if moved {
            debug!(%group, section_id, from, to, "Reordered child blocks");
        }
        moved
    }

    /// Flip `visible` on the matching child only
    pub fn toggle_child_visibility(&mut self, group: GroupId, section_id: &str, child_id: &str) {
        if self.with_child_list(group, section_id, |list| list.toggle_visible(child_id)) {
            debug!(%group, section_id, child_id, "Toggled child visibility");
        } else {
            trace!(%group, section_id, child_id, "toggle_child_visibility: child not found");
        }
    }

    /// Remove a child; clears the selection if it pointed at that child
    pub fn delete_child_block(&mut self, group: GroupId, section_id: &str, child_id: &str) {
        if !self.with_child_list(group, section_id, |list| list.remove_block(child_id)) {
            trace!(%group, section_id, child_id, "delete_child_block: child not found");
            return;
        }

        self.clear_selection_if(|target| target.is_child(section_id, child_id));
        debug!(%group, section_id, child_id, "Deleted child block");
    }

    /// Shallow-merge JSON fields into one child
    ///
    /// A patch that does not fit the child's shape is logged and dropped.
    pub fn patch_child_block(
        &mut self,
        group: GroupId,
        section_id: &str,
        child_id: &str,
        patch: &Map<String, Value>,
    ) -> bool {
        self.with_child_list(group, section_id, |list| match list.patch(child_id, patch) {
            Ok(changed) => changed,
            Err(e) => {
                warn!(%group, section_id, child_id, error = %e, "Rejected child block patch");
                false
            }
        })
    }

    /// Append a child with defaults, picking the shape by wire tag
    ///
    /// `None` for the default shape. Selects the new child like
    /// [`add_child_block`](Self::add_child_block).
    pub fn add_child_block_dyn(&mut self, group: GroupId, section_id: &str, shape: Option<&str>) -> Option<String> {
        let section = self.section(group, section_id)?;
        let kind = section.settings.child_kind()?;
        let blocks = section.settings.blocks()?;
        let prefix = blocks.id_prefix();
        let taken: Vec<String> = blocks.ids().into_iter().map(str::to_string).collect();

        let child_id = fresh_id(self.ids.as_mut(), prefix, |id| taken.iter().any(|t| t == id));
        let added = self.with_child_list(group, section_id, |list| list.push_default(child_id.clone(), shape));
        if !added {
            warn!(%group, section_id, ?shape, "Unknown child block shape");
            return None;
        }

        self.select(Some(SelectionTarget::child(section_id, kind, child_id.as_str())));
        self.toggle_config_panel(true);

        debug!(%group, section_id, child_id = %child_id, "Added child block");
        Some(child_id)
    }

    /// Child array of a section, if it has one
    pub fn child_list(&self, group: GroupId, section_id: &str) -> Option<&dyn BlockList> {
        self.section(group, section_id)?.settings.blocks()
    }

    /// Run `edit` on a copy of the child array and commit if it reports a change
    fn with_child_list(&mut self, group: GroupId, section_id: &str, edit: impl FnOnce(&mut dyn BlockList) -> bool) -> bool {
        let Some(section) = self.section(group, section_id) else {
            return false;
        };

        let mut settings: SectionSettings = section.settings.clone();
        let Some(list) = settings.blocks_mut() else {
            return false;
        };

        if !edit(list) {
            return false;
        }

        self.replace_section_settings(group, section_id, settings);
        true
    }
}
