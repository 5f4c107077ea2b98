//! # Weddingsite Editor
//!
//! Draft/commit editing engine for a wedding microsite.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI events                                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: local drafts                        │
//! │  - EditableField (in-place scalar edits)    │
//! │  - CollectionDraftBuffer (list overlays)    │
//! │  - FormSession (modal forms, dirty gating)  │
//! └─────────────────────────────────────────────┘
//!                     ↓ commit (one patch)
//! ┌─────────────────────────────────────────────┐
//! │ document: WeddingDocument::apply            │
//! └─────────────────────────────────────────────┘
//!                     ↓ fire-and-forget
//! ┌─────────────────────────────────────────────┐
//! │ Persister → PersistenceGateway              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The countdown runs beside this pipeline and only reads the wedding date.
//!
//! ## Core Principles
//!
//! 1. **Drafts are local**: keystrokes never reach the document
//! 2. **One commit, one patch**: every save applies exactly one patch and
//!    reports it as a [`DocumentChange`]
//! 3. **Stable item identity**: collection drafts are keyed by [`ItemKey`],
//!    never by position
//! 4. **Saves never block editing**: failures surface as notices, local state
//!    is kept
//!
//! ## Usage
//!
//! ```rust,ignore
//! use weddingsite_editor::{EditableField, Persister, InMemoryGateway};
//! use weddingsite_document::ScalarField;
//!
//! let (persister, mut notices) = Persister::new(gateway, "owner-1");
//!
//! let mut venue = EditableField::new(ScalarField::VenueName);
//! venue.start(&doc);
//! venue.on_draft_change("Lakeside Hall");
//! if let Some(change) = venue.save(&mut doc) {
//!     persister.persist_change(&change);
//! }
//! ```

mod change;
mod countdown;
mod draft_buffer;
mod errors;
mod field;
mod file_gateway;
mod gateway;
mod persister;
mod session;
mod ticker;
mod upload;

pub use change::DocumentChange;
pub use countdown::{
    countdown_between, default_ceremony_time, Clock, Countdown, CountdownReading, FixedClock,
    SystemClock,
};
pub use draft_buffer::{CollectionDraftBuffer, ItemKey};
pub use errors::{EditorError, GatewayError, GatewayResult};
pub use field::{default_placeholder, EditableField, FieldKind, FieldMode};
pub use file_gateway::JsonFileGateway;
pub use gateway::{InMemoryGateway, PersistenceGateway, SavePayload};
pub use persister::{Persister, SaveNotice};
pub use session::{CloseChoice, CloseRequest, FormSession, SectionKind};
pub use ticker::{CountdownTicker, DEFAULT_TICK, MIN_TICK};
pub use upload::UploadTrigger;

// Re-export document types for convenience
pub use weddingsite_document as document;
