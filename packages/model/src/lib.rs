//! # Vitrine Model
//!
//! The section-tree document model behind the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ids / selection: identifiers + child refs   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ section / settings: typed sections, groups, │
//! │ child blocks                                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ snapshot / normalize: persisted form,       │
//! │ legacy type migration on load               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_model::{PageDocument, PageSnapshot};
//!
//! let snapshot = PageSnapshot::from_json(&json)?;
//! let doc = PageDocument::load(snapshot)?;   // legacy tags rewritten here
//! for (group, section) in doc.groups.iter() {
//!     println!("{group}: {} ({})", section.name, section.type_tag());
//! }
//! ```

pub mod error;
pub mod ids;
pub mod normalize;
pub mod reorder;
pub mod section;
pub mod selection;
pub mod settings;
pub mod snapshot;

pub use error::{LoadError, ModelError};
pub use ids::{fresh_id, sanitize_id, IdSource, SequentialIds, TimestampIds};
pub use normalize::{canonical_type_tag, is_legacy_type_tag, normalize_groups, normalize_snapshot};
pub use reorder::{drag_indices, move_item};
pub use section::{GroupId, PageGroups, PageType, Section, SectionType};
pub use selection::{decode_child_ref, encode_child_ref, ChildKind, ChildRef, SelectionTarget};
pub use settings::{BlockContainer, BlockList, ChildBlock, PatchError, SectionKind, SectionSettings};
pub use snapshot::{PageDocument, PageSnapshot, RawSection};
