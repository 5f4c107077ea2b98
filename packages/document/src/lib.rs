//! # Weddingsite Document
//!
//! Data model for one event microsite: the canonical [`WeddingDocument`],
//! the items of its ordered collections, and [`DocumentPatch`], the unit in
//! which edits are committed and persisted.
//!
//! ## Core Principles
//!
//! 1. **One canonical copy**: editors read snapshots, never shared references
//!    they can mutate
//! 2. **Commit through patches**: the only write path is `apply(&patch)`
//! 3. **Wire names are attribute names**: JSON payloads are keyed by the
//!    snake_case attribute names (`couple_name_1`, `faqs`, ...)

mod document;
mod error;
mod fields;
mod items;
mod patch;

pub use document::{CommitResult, WeddingDocument, DATE_FORMAT};
pub use error::{DocumentError, DocumentResult};
pub use fields::{PartyGroup, ScalarField, Theme};
pub use items::{
    next_item_id, CollectionItem, FaqField, FaqItem, Milestone, MilestoneField, PartyMember,
    PartyMemberField, ScheduleEvent, ScheduleField,
};
pub use patch::DocumentPatch;
