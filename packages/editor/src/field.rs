//! # Editable Field
//!
//! Draft/commit state machine for one scalar attribute of the document.
//!
//! ```text
//! Viewing ──start──▶ Editing ──save───▶ Viewing   (draft committed)
//!                       │
//!                       └────cancel──▶ Viewing   (draft discarded)
//! ```
//!
//! Keystrokes only touch the draft. The field never leaves `Editing` because
//! of a draft change, so a host re-rendering on every keystroke keeps the
//! same input mounted and focused. `save`/`cancel` outside `Editing` are
//! no-ops: UI event ordering cannot be fully controlled.

use crate::DocumentChange;
use chrono::NaiveDate;
use tracing::debug;
use weddingsite_document::{DocumentPatch, ScalarField, WeddingDocument, DATE_FORMAT};

/// How the field is rendered and interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Text area
    Multiline,
    /// Calendar date input (`YYYY-MM-DD`)
    Date,
}

impl FieldKind {
    pub fn for_field(field: ScalarField) -> Self {
        match field {
            ScalarField::WeddingDate => FieldKind::Date,
            ScalarField::TheirStory => FieldKind::Multiline,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldState {
    Viewing,
    Editing {
        draft: String,
        /// Value the draft was seeded with
        seed: String,
        /// At least one draft change arrived
        touched: bool,
    },
}

/// Text shown for an empty field, also used to seed its draft
pub fn default_placeholder(field: ScalarField) -> Option<&'static str> {
    match field {
        ScalarField::CoupleName1 => Some("Partner 1"),
        ScalarField::CoupleName2 => Some("Partner 2"),
        ScalarField::VenueLocation => Some("Wedding Venue • Location"),
        ScalarField::TheirStory => Some(
            "Tell your love story here. Share what makes your relationship special \
             and why you're excited to celebrate with your loved ones.",
        ),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct EditableField {
    key: ScalarField,
    kind: FieldKind,
    placeholder: Option<String>,
    state: FieldState,
}

impl EditableField {
    /// Field for `key` with its default kind and placeholder
    pub fn new(key: ScalarField) -> Self {
        Self {
            key,
            kind: FieldKind::for_field(key),
            placeholder: default_placeholder(key).map(str::to_string),
            state: FieldState::Viewing,
        }
    }

    pub fn key(&self) -> ScalarField {
        self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn mode(&self) -> FieldMode {
        match self.state {
            FieldState::Viewing => FieldMode::Viewing,
            FieldState::Editing { .. } => FieldMode::Editing,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == FieldMode::Editing
    }

    /// Current draft (only while editing)
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            FieldState::Editing { draft, .. } => Some(draft),
            FieldState::Viewing => None,
        }
    }

    /// Whether the draft differs from the value it was seeded with
    pub fn is_changed(&self) -> bool {
        matches!(&self.state, FieldState::Editing { draft, seed, .. } if draft != seed)
    }

    pub fn is_touched(&self) -> bool {
        matches!(self.state, FieldState::Editing { touched: true, .. })
    }

    /// Enter editing, seeding the draft from the committed value (or the
    /// placeholder when that is empty). Already editing: the draft is kept.
    pub fn start(&mut self, doc: &WeddingDocument) -> bool {
        if self.is_editing() {
            return false;
        }

        let committed = doc.scalar(self.key);
        let seed = match (&self.placeholder, committed.is_empty()) {
            (Some(placeholder), true) => placeholder.clone(),
            _ => committed.to_string(),
        };

        self.state = FieldState::Editing {
            draft: seed.clone(),
            seed,
            touched: false,
        };
        true
    }

    /// Replace the draft with new input; ignored unless editing
    pub fn on_draft_change(&mut self, value: impl Into<String>) -> bool {
        match &mut self.state {
            FieldState::Editing { draft, touched, .. } => {
                *draft = value.into();
                *touched = true;
                true
            }
            FieldState::Viewing => false,
        }
    }

    /// Commit the draft into the document and return to viewing.
    ///
    /// Returns the change notification for the caller to persist, or `None`
    /// when the field was not being edited.
    pub fn save(&mut self, doc: &mut WeddingDocument) -> Option<DocumentChange> {
        let draft = self.take_draft()?;
        let patch = DocumentPatch::scalar(self.key, draft);
        let result = doc.apply(&patch);

        debug!(field = %self.key, version = result.version, "Committed field draft");
        Some(DocumentChange::new(patch, result))
    }

    /// Drop the draft without touching the document
    pub fn cancel(&mut self) -> bool {
        self.take_draft().is_some()
    }

    /// Leave editing, handing back the draft
    pub(crate) fn take_draft(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, FieldState::Viewing) {
            FieldState::Editing { draft, .. } => Some(draft),
            FieldState::Viewing => None,
        }
    }

    /// Draft parsed as a calendar date, for date inputs
    pub fn draft_date(&self) -> Option<NaiveDate> {
        if self.kind != FieldKind::Date {
            return None;
        }
        self.draft()
            .and_then(|draft| NaiveDate::parse_from_str(draft.trim(), DATE_FORMAT).ok())
    }

    /// Text to render while viewing: the committed value, or the placeholder.
    /// Dates render long-form ("June 15, 2025") when they parse.
    pub fn display_value(&self, doc: &WeddingDocument) -> String {
        let committed = doc.scalar(self.key);

        if self.kind == FieldKind::Date {
            if let Ok(date) = NaiveDate::parse_from_str(committed.trim(), DATE_FORMAT) {
                return date.format("%B %-d, %Y").to_string();
            }
        }

        match (&self.placeholder, committed.is_empty()) {
            (Some(placeholder), true) => placeholder.clone(),
            _ => committed.to_string(),
        }
    }
}
