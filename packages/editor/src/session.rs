//! # Form Session
//!
//! One modal editing session over a section of the document.
//!
//! A session owns the editable fields and draft buffers of its section and
//! one dirty flag. Nothing reaches the document until `submit`, which folds
//! every pending edit into a single patch and applies it once.
//!
//! ## Closing
//!
//! ```text
//! request_close ──clean──▶ Closed
//!       │
//!       └──dirty──▶ ConfirmationRequired ──resolve_close(choice)──▶ ...
//! ```
//!
//! Operations on a closed session are no-ops.

use crate::{CollectionDraftBuffer, DocumentChange, EditableField, ItemKey, UploadTrigger};
use chrono::{Datelike, Local};
use std::collections::BTreeMap;
use tracing::{debug, info};
use weddingsite_document::{
    next_item_id, CollectionItem, DocumentPatch, FaqItem, Milestone, PartyGroup, PartyMember,
    ScalarField, ScheduleEvent, Theme, WeddingDocument,
};

/// Which form the session edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Couple names, date, venue, background image
    Home,
    /// Love story text, timeline, visibility toggle
    Story,
    /// Bridal party, groom party, special roles
    Party,
    Faq,
    Schedule,
    Theme,
}

impl SectionKind {
    /// Scalar fields edited by this section's form
    pub fn fields(self) -> &'static [ScalarField] {
        match self {
            SectionKind::Home => &[
                ScalarField::CoupleName1,
                ScalarField::CoupleName2,
                ScalarField::WeddingDate,
                ScalarField::VenueName,
                ScalarField::VenueLocation,
                ScalarField::BackgroundImage,
            ],
            SectionKind::Story => &[ScalarField::TheirStory],
            _ => &[],
        }
    }
}

/// Outcome of a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Closed,
    /// Unsaved changes exist; the host must ask the owner
    ConfirmationRequired,
}

/// Owner's answer to [`CloseRequest::ConfirmationRequired`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    SaveAndClose,
    DiscardAndClose,
    KeepEditing,
}

/// Pending selection for a non-text setting (theme, toggles)
#[derive(Debug, Clone, Copy)]
struct Choice<T> {
    pending: T,
    touched: bool,
}

impl<T: Copy> Choice<T> {
    fn new(committed: T) -> Self {
        Self {
            pending: committed,
            touched: false,
        }
    }

    fn select(&mut self, value: T) {
        self.pending = value;
        self.touched = true;
    }

    fn take(&mut self) -> Option<T> {
        std::mem::replace(&mut self.touched, false).then_some(self.pending)
    }
}

/// The three party lists, saved together
#[derive(Debug, Clone)]
struct PartyBuffers {
    bridal: CollectionDraftBuffer<PartyMember>,
    groom: CollectionDraftBuffer<PartyMember>,
    special: CollectionDraftBuffer<PartyMember>,
}

impl PartyBuffers {
    fn from_document(doc: &WeddingDocument) -> Self {
        Self {
            bridal: CollectionDraftBuffer::from_snapshot(doc.party(PartyGroup::Bridal)),
            groom: CollectionDraftBuffer::from_snapshot(doc.party(PartyGroup::Groom)),
            special: CollectionDraftBuffer::from_snapshot(doc.party(PartyGroup::Special)),
        }
    }

    fn group(&self, group: PartyGroup) -> &CollectionDraftBuffer<PartyMember> {
        match group {
            PartyGroup::Bridal => &self.bridal,
            PartyGroup::Groom => &self.groom,
            PartyGroup::Special => &self.special,
        }
    }

    fn group_mut(&mut self, group: PartyGroup) -> &mut CollectionDraftBuffer<PartyMember> {
        match group {
            PartyGroup::Bridal => &mut self.bridal,
            PartyGroup::Groom => &mut self.groom,
            PartyGroup::Special => &mut self.special,
        }
    }

    fn is_dirty(&self) -> bool {
        PartyGroup::ALL.iter().any(|group| self.group(*group).is_dirty())
    }

    fn is_complete(&self) -> bool {
        PartyGroup::ALL
            .iter()
            .all(|group| self.group(*group).incomplete_items().is_empty())
    }

    fn discard(&mut self) {
        for group in PartyGroup::ALL {
            self.group_mut(group).discard();
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    section: SectionKind,
    open: bool,
    dirty: bool,
    fields: BTreeMap<ScalarField, EditableField>,
    theme: Option<Choice<Theme>>,
    story_enabled: Option<Choice<bool>>,
    timeline: Option<CollectionDraftBuffer<Milestone>>,
    party: Option<PartyBuffers>,
    faqs: Option<CollectionDraftBuffer<FaqItem>>,
    schedule: Option<CollectionDraftBuffer<ScheduleEvent>>,
}

impl FormSession {
    /// Open a form over `section`, starting every field and snapshotting
    /// every collection it edits
    pub fn open(section: SectionKind, doc: &WeddingDocument) -> Self {
        let fields = section
            .fields()
            .iter()
            .map(|key| {
                let mut field = EditableField::new(*key);
                field.start(doc);
                (*key, field)
            })
            .collect();

        let mut session = Self {
            section,
            open: true,
            dirty: false,
            fields,
            theme: None,
            story_enabled: None,
            timeline: None,
            party: None,
            faqs: None,
            schedule: None,
        };

        match section {
            SectionKind::Home => {}
            SectionKind::Story => {
                session.story_enabled = Some(Choice::new(doc.story_enabled()));
                session.timeline = Some(CollectionDraftBuffer::from_snapshot(doc.story_timeline()));
            }
            SectionKind::Party => session.party = Some(PartyBuffers::from_document(doc)),
            SectionKind::Faq => session.faqs = Some(CollectionDraftBuffer::from_snapshot(doc.faqs())),
            SectionKind::Schedule => {
                session.schedule = Some(CollectionDraftBuffer::from_snapshot(doc.schedule_events()))
            }
            SectionKind::Theme => session.theme = Some(Choice::new(doc.theme())),
        }

        debug!(section = ?section, "Opened form session");
        session
    }

    pub fn section(&self) -> SectionKind {
        self.section
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether closing now would lose changes
    pub fn is_dirty(&self) -> bool {
        if !self.open {
            return false;
        }
        self.dirty || self.buffers_dirty()
    }

    fn buffers_dirty(&self) -> bool {
        self.timeline.as_ref().is_some_and(|b| b.is_dirty())
            || self.party.as_ref().is_some_and(PartyBuffers::is_dirty)
            || self.faqs.as_ref().is_some_and(|b| b.is_dirty())
            || self.schedule.as_ref().is_some_and(|b| b.is_dirty())
    }

    /// Whether the Save affordance should be enabled: something changed and
    /// no item is missing a required field
    pub fn can_submit(&self) -> bool {
        fn complete<T: CollectionItem>(buffer: &Option<CollectionDraftBuffer<T>>) -> bool {
            buffer
                .as_ref()
                .map_or(true, |b| b.incomplete_items().is_empty())
        }

        self.is_dirty()
            && complete(&self.timeline)
            && complete(&self.faqs)
            && complete(&self.schedule)
            && self.party.as_ref().map_or(true, PartyBuffers::is_complete)
    }

    pub fn field(&self, key: ScalarField) -> Option<&EditableField> {
        self.fields.get(&key)
    }

    /// Current draft of a section field
    pub fn field_value(&self, key: ScalarField) -> Option<&str> {
        self.fields.get(&key).and_then(EditableField::draft)
    }

    pub fn set_field(&mut self, key: ScalarField, value: impl Into<String>) -> bool {
        if !self.open {
            return false;
        }
        let changed = self
            .fields
            .get_mut(&key)
            .is_some_and(|field| field.on_draft_change(value));
        self.dirty |= changed;
        changed
    }

    /// Ask the host for a background image and draft its reference
    pub fn upload_background(&mut self, trigger: &dyn UploadTrigger) -> bool {
        if !self.open || !self.fields.contains_key(&ScalarField::BackgroundImage) {
            return false;
        }
        match trigger.request_image() {
            Some(reference) => self.set_field(ScalarField::BackgroundImage, reference),
            None => false,
        }
    }

    pub fn select_theme(&mut self, theme: Theme) -> bool {
        match (self.open, self.theme.as_mut()) {
            (true, Some(choice)) => {
                choice.select(theme);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Theme currently selected in the form
    pub fn selected_theme(&self) -> Option<Theme> {
        self.theme.map(|choice| choice.pending)
    }

    pub fn set_story_enabled(&mut self, enabled: bool) -> bool {
        match (self.open, self.story_enabled.as_mut()) {
            (true, Some(choice)) => {
                choice.select(enabled);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub fn story_enabled(&self) -> Option<bool> {
        self.story_enabled.map(|choice| choice.pending)
    }

    pub fn timeline(&self) -> Option<&CollectionDraftBuffer<Milestone>> {
        self.timeline.as_ref()
    }

    pub fn timeline_mut(&mut self) -> Option<&mut CollectionDraftBuffer<Milestone>> {
        if !self.open {
            return None;
        }
        self.timeline.as_mut()
    }

    pub fn party(&self, group: PartyGroup) -> Option<&CollectionDraftBuffer<PartyMember>> {
        self.party.as_ref().map(|buffers| buffers.group(group))
    }

    pub fn party_mut(&mut self, group: PartyGroup) -> Option<&mut CollectionDraftBuffer<PartyMember>> {
        if !self.open {
            return None;
        }
        self.party.as_mut().map(|buffers| buffers.group_mut(group))
    }

    pub fn faqs(&self) -> Option<&CollectionDraftBuffer<FaqItem>> {
        self.faqs.as_ref()
    }

    pub fn faqs_mut(&mut self) -> Option<&mut CollectionDraftBuffer<FaqItem>> {
        if !self.open {
            return None;
        }
        self.faqs.as_mut()
    }

    pub fn schedule(&self) -> Option<&CollectionDraftBuffer<ScheduleEvent>> {
        self.schedule.as_ref()
    }

    pub fn schedule_mut(&mut self) -> Option<&mut CollectionDraftBuffer<ScheduleEvent>> {
        if !self.open {
            return None;
        }
        self.schedule.as_mut()
    }

    /// Append a starter milestone dated this year
    pub fn add_milestone(&mut self) -> Option<ItemKey> {
        let year = Local::now().year();
        self.timeline_mut()
            .map(|buffer| buffer.add_item(Milestone::starter(year)))
    }

    pub fn add_party_member(&mut self, group: PartyGroup) -> Option<ItemKey> {
        let member = match group {
            PartyGroup::Special => PartyMember::special_starter(next_item_id()),
            _ => PartyMember::starter(next_item_id()),
        };
        self.party_mut(group).map(|buffer| buffer.add_item(member))
    }

    pub fn add_faq(&mut self) -> Option<ItemKey> {
        self.faqs_mut()
            .map(|buffer| buffer.add_item(FaqItem::starter(next_item_id())))
    }

    pub fn add_schedule_event(&mut self) -> Option<ItemKey> {
        self.schedule_mut()
            .map(|buffer| buffer.add_item(ScheduleEvent::default()))
    }

    /// Close if there is nothing to lose, otherwise ask for confirmation
    pub fn request_close(&mut self) -> CloseRequest {
        if self.is_dirty() {
            return CloseRequest::ConfirmationRequired;
        }
        self.close();
        CloseRequest::Closed
    }

    pub fn resolve_close(
        &mut self,
        choice: CloseChoice,
        doc: &mut WeddingDocument,
    ) -> Option<DocumentChange> {
        match choice {
            CloseChoice::SaveAndClose => self.submit(doc),
            CloseChoice::DiscardAndClose => {
                self.discard();
                self.close();
                None
            }
            CloseChoice::KeepEditing => None,
        }
    }

    /// Commit every pending edit as one patch and close.
    ///
    /// Returns `None` (and still closes) when nothing changed.
    pub fn submit(&mut self, doc: &mut WeddingDocument) -> Option<DocumentChange> {
        if !self.is_dirty() {
            self.close();
            return None;
        }

        let patch = self.build_patch();
        self.close();

        if patch.is_empty() {
            return None;
        }

        let result = doc.apply(&patch);
        info!(
            section = ?self.section,
            keys = ?patch.keys(),
            version = result.version,
            "Submitted form"
        );
        Some(DocumentChange::new(patch, result))
    }

    fn build_patch(&mut self) -> DocumentPatch {
        let mut patch = DocumentPatch::new();

        for (key, field) in self.fields.iter_mut() {
            if field.is_touched() {
                if let Some(draft) = field.take_draft() {
                    patch.set_scalar(*key, draft);
                }
            }
        }

        patch.theme = self.theme.as_mut().and_then(Choice::take);
        patch.story_enabled = self.story_enabled.as_mut().and_then(Choice::take);

        if let Some(buffer) = self.timeline.as_mut().filter(|b| b.is_dirty()) {
            patch.story_timeline = Some(buffer.flatten_and_commit());
        }
        if let Some(party) = self.party.as_mut().filter(|p| p.is_dirty()) {
            for group in PartyGroup::ALL {
                patch.set_party(group, party.group_mut(group).flatten_and_commit());
            }
        }
        if let Some(buffer) = self.faqs.as_mut().filter(|b| b.is_dirty()) {
            patch.faqs = Some(buffer.flatten_and_commit());
        }
        if let Some(buffer) = self.schedule.as_mut().filter(|b| b.is_dirty()) {
            patch.schedule_events = Some(buffer.flatten_and_commit());
        }

        patch
    }

    fn discard(&mut self) {
        if let Some(buffer) = self.timeline.as_mut() {
            buffer.discard();
        }
        if let Some(party) = self.party.as_mut() {
            party.discard();
        }
        if let Some(buffer) = self.faqs.as_mut() {
            buffer.discard();
        }
        if let Some(buffer) = self.schedule.as_mut() {
            buffer.discard();
        }
    }

    fn close(&mut self) {
        for field in self.fields.values_mut() {
            field.cancel();
        }
        self.open = false;
        self.dirty = false;
        debug!(section = ?self.section, "Closed form session");
    }
}
