//! # Vitrine Editor
//!
//! The mutation layer of the page builder: one store per open page, and
//! the fixed set of operations sidebars, forms and the preview use to read
//! and write it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: sections, settings, selection refs   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorStore                         │
//! │  - init/dispose lifecycle                   │
//! │  - section and child-block mutations        │
//! │  - selection, hover, config panel           │
//! │  - drag reorder, command replay             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ save collaborator: PageSnapshot → storage   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single writer**: every mutation takes `&mut self` and completes
//!    before the next one starts
//! 2. **Misses are no-ops**: stale ids never fail, they do nothing
//! 3. **Replace, not merge**: settings writes replace the whole settings value
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_editor::EditorStore;
//! use vitrine_model::{settings::{ColumnShape, MulticolumnsSettings}, GroupId};
//!
//! let mut store = EditorStore::new();
//! store.init_from_json(&page_json)?;
//!
//! let child = store.add_child_block::<MulticolumnsSettings>(GroupId::Template, "s1", ColumnShape::Icon);
//! store.toggle_child_visibility(GroupId::Template, "s1", child.as_deref().unwrap_or_default());
//!
//! save(store.snapshot());
//! ```

mod blocks;
mod commands;
mod drag;
mod errors;
mod resolve;
mod store;

pub use commands::{parse_script, EditorCommand};
pub use drag::{DragController, DragList, DragState, DropOutcome};
pub use errors::EditorError;
pub use resolve::Resolved;
pub use store::EditorStore;

// Re-export model types for convenience
pub use vitrine_model::{GroupId, PageSnapshot, PageType, SelectionTarget};
