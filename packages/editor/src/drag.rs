//! # Drag Reorder
//!
//! One controller per editor. A drag is scoped to a single list (a group's
//! sections or one section's children) and can only be dropped in that
//! list.
//!
//! ```text
//! Idle ─begin─→ Dragging ─drop_on(over)─→ Idle
//!                  │                     ├─ OnSelf   (no change)
//!                  │                     ├─ Moved    (stable move)
//!                  │                     ├─ Outside  (no change)
//!                  │                     └─ Stale    (ids gone, no change)
//!                  └─cancel─→ Idle
//! ```
//!
//! Indices are looked up in the store at drop time, never cached at
//! `begin`.

use tracing::{debug, trace};
use vitrine_model::{drag_indices, GroupId};

use crate::EditorStore;

/// The list a drag is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragList {
    /// Sections of a group
    Group(GroupId),
    /// Children of one section
    Children { group: GroupId, section_id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { list: DragList, active_id: String },
}

/// What a drop did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress
    NoDrag,
    /// Dropped on the dragged item itself
    OnSelf,
    Moved { from: usize, to: usize },
    /// Dropped with no target; the list snaps back
    Outside,
    /// The dragged item or the target no longer exists in the list
    Stale,
}

impl DropOutcome {
    pub fn changed(self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `active_id`; replaces any drag already in progress
    pub fn begin(&mut self, list: DragList, active_id: impl Into<String>) {
        let active_id = active_id.into();
        trace!(?list, %active_id, "Drag started");
        self.state = DragState::Dragging { list, active_id };
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// End the drag over `over_id` (`None` when released outside any target)
    pub fn drop_on(&mut self, store: &mut EditorStore, over_id: Option<&str>) -> DropOutcome {
        let DragState::Dragging { list, active_id } = std::mem::take(&mut self.state) else {
            return DropOutcome::NoDrag;
        };

        let Some(over_id) = over_id else {
            return DropOutcome::Outside;
        };

        if over_id == active_id {
            return DropOutcome::OnSelf;
        }

        let outcome = match &list {
            DragList::Group(group) => {
                let indices = drag_indices(store.group(*group), &active_id, over_id, |s| s.id.as_str());
                match indices {
                    Some((from, to)) => {
                        store.reorder_within_group(*group, from, to);
                        DropOutcome::Moved { from, to }
                    }
                    None => DropOutcome::Stale,
                }
            }
            DragList::Children { group, section_id } => {
                let indices = store
                    .child_list(*group, section_id)
                    .and_then(|children| drag_indices(&children.ids(), &active_id, over_id, |id| *id));
                match indices {
                    Some((from, to)) if store.move_child_block(*group, section_id, from, to) => {
                        DropOutcome::Moved { from, to }
                    }
                    _ => DropOutcome::Stale,
                }
            }
        };

        debug!(?list, %active_id, over_id, ?outcome, "Drag dropped");
        outcome
    }
}
