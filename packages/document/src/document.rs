//! # Wedding Document
//!
//! Canonical state for one event microsite.
//!
//! Attributes are private: edit surfaces read through accessors and write
//! back exclusively through [`WeddingDocument::apply`], so no reader ever
//! observes a half-committed edit.
//!
//! ## Lifecycle
//!
//! ```text
//! Load (gateway) → Read snapshots → Apply patches → Save (gateway)
//! ```

use crate::{
    DocumentPatch, DocumentResult, FaqItem, Milestone, PartyGroup, PartyMember, ScalarField,
    ScheduleEvent, Theme,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Calendar format of `wedding_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeddingDocument {
    id: String,
    #[serde(rename = "user_id")]
    owner_id: String,

    #[serde(default)]
    couple_name_1: String,
    #[serde(default)]
    couple_name_2: String,
    #[serde(default)]
    wedding_date: String,
    #[serde(default)]
    venue_name: String,
    #[serde(default)]
    venue_location: String,
    #[serde(default)]
    their_story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
    #[serde(default)]
    theme: Theme,
    #[serde(default = "default_true")]
    story_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shareable_id: Option<String>,

    #[serde(default)]
    story_timeline: Vec<Milestone>,
    #[serde(default)]
    bridal_party: Vec<PartyMember>,
    #[serde(default)]
    groom_party: Vec<PartyMember>,
    #[serde(default)]
    special_roles: Vec<PartyMember>,
    #[serde(default)]
    faqs: Vec<FaqItem>,
    #[serde(default)]
    schedule_events: Vec<ScheduleEvent>,

    /// Increments on every applied patch; never persisted
    #[serde(skip)]
    version: u64,
}

/// Outcome of committing a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    /// New version number
    pub version: u64,
}

impl WeddingDocument {
    /// Blank document owned by `owner_id`
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            couple_name_1: String::new(),
            couple_name_2: String::new(),
            wedding_date: String::new(),
            venue_name: String::new(),
            venue_location: String::new(),
            their_story: String::new(),
            background_image: None,
            theme: Theme::default(),
            story_enabled: true,
            shareable_id: None,
            story_timeline: Vec::new(),
            bridal_party: Vec::new(),
            groom_party: Vec::new(),
            special_roles: Vec::new(),
            faqs: Vec::new(),
            schedule_events: Vec::new(),
            version: 0,
        }
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Commit a patch: every present key replaces the stored attribute
    pub fn apply(&mut self, patch: &DocumentPatch) -> CommitResult {
        for field in ScalarField::ALL {
            if let Some(value) = patch.scalar_value(field) {
                self.set_scalar(field, value.to_string());
            }
        }

        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(enabled) = patch.story_enabled {
            self.story_enabled = enabled;
        }
        if let Some(timeline) = &patch.story_timeline {
            self.story_timeline = timeline.clone();
        }
        if let Some(members) = &patch.bridal_party {
            self.bridal_party = members.clone();
        }
        if let Some(members) = &patch.groom_party {
            self.groom_party = members.clone();
        }
        if let Some(members) = &patch.special_roles {
            self.special_roles = members.clone();
        }
        if let Some(faqs) = &patch.faqs {
            self.faqs = faqs.clone();
        }
        if let Some(events) = &patch.schedule_events {
            self.schedule_events = events.clone();
        }

        self.version += 1;
        CommitResult {
            version: self.version,
        }
    }

    fn set_scalar(&mut self, field: ScalarField, value: String) {
        match field {
            ScalarField::CoupleName1 => self.couple_name_1 = value,
            ScalarField::CoupleName2 => self.couple_name_2 = value,
            ScalarField::WeddingDate => self.wedding_date = value,
            ScalarField::VenueName => self.venue_name = value,
            ScalarField::VenueLocation => self.venue_location = value,
            ScalarField::TheirStory => self.their_story = value,
            ScalarField::BackgroundImage => self.background_image = Some(value),
        }
    }

    /// Committed value of a scalar attribute (empty when unset)
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::CoupleName1 => &self.couple_name_1,
            ScalarField::CoupleName2 => &self.couple_name_2,
            ScalarField::WeddingDate => &self.wedding_date,
            ScalarField::VenueName => &self.venue_name,
            ScalarField::VenueLocation => &self.venue_location,
            ScalarField::TheirStory => &self.their_story,
            ScalarField::BackgroundImage => self.background_image.as_deref().unwrap_or(""),
        }
    }

    /// `wedding_date` as a calendar date, if it is well formed
    pub fn wedding_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.wedding_date.trim(), DATE_FORMAT).ok()
    }

    /// Instant the countdown runs toward: the wedding day at `ceremony_time`
    pub fn ceremony_instant(&self, ceremony_time: NaiveTime) -> Option<NaiveDateTime> {
        self.wedding_day().map(|day| day.and_time(ceremony_time))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn story_enabled(&self) -> bool {
        self.story_enabled
    }

    pub fn shareable_id(&self) -> Option<&str> {
        self.shareable_id.as_deref()
    }

    /// Assign the public share id (generated once by the store)
    pub fn with_shareable_id(mut self, shareable_id: impl Into<String>) -> Self {
        self.shareable_id = Some(shareable_id.into());
        self
    }

    pub fn story_timeline(&self) -> &[Milestone] {
        &self.story_timeline
    }

    pub fn party(&self, group: PartyGroup) -> &[PartyMember] {
        match group {
            PartyGroup::Bridal => &self.bridal_party,
            PartyGroup::Groom => &self.groom_party,
            PartyGroup::Special => &self.special_roles,
        }
    }

    pub fn faqs(&self) -> &[FaqItem] {
        &self.faqs
    }

    pub fn schedule_events(&self) -> &[ScheduleEvent] {
        &self.schedule_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeddingDocument {
        let mut doc = WeddingDocument::new("w-1", "owner-1");
        let mut patch = DocumentPatch::new();
        patch.set_scalar(ScalarField::CoupleName1, "Ana");
        patch.set_scalar(ScalarField::CoupleName2, "Ben");
        patch.set_scalar(ScalarField::WeddingDate, "2025-06-15");
        doc.apply(&patch);
        doc
    }

    #[test]
    fn test_new_document_is_blank() {
        let doc = WeddingDocument::new("w-1", "owner-1");
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.scalar(ScalarField::VenueName), "");
        assert_eq!(doc.theme(), Theme::Classic);
        assert!(doc.story_enabled());
    }

    #[test]
    fn test_apply_increments_version_and_replaces_values() {
        let mut doc = sample();
        assert_eq!(doc.version(), 1);

        let result = doc.apply(&DocumentPatch::scalar(ScalarField::CoupleName1, "Anna"));
        assert_eq!(result.version, 2);
        assert_eq!(doc.scalar(ScalarField::CoupleName1), "Anna");
        assert_eq!(doc.scalar(ScalarField::CoupleName2), "Ben");
    }

    #[test]
    fn test_applying_same_patch_twice_is_idempotent_on_content() {
        let mut doc = sample();
        let mut patch = DocumentPatch::new();
        patch.faqs = Some(vec![FaqItem::starter("f-1")]);

        doc.apply(&patch);
        let once = doc.clone();
        doc.apply(&patch);

        assert_eq!(doc.faqs(), once.faqs());
        assert_eq!(doc.version(), once.version() + 1);
    }

    #[test]
    fn test_ceremony_instant_uses_date_and_time() {
        let doc = sample();
        let time = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        let instant = doc.ceremony_instant(time).unwrap();
        assert_eq!(instant.to_string(), "2025-06-15 15:00:00");
    }

    #[test]
    fn test_malformed_date_has_no_ceremony_instant() {
        let mut doc = sample();
        doc.apply(&DocumentPatch::scalar(ScalarField::WeddingDate, "next june"));
        assert_eq!(doc.scalar(ScalarField::WeddingDate), "next june");
        assert!(doc.wedding_day().is_none());
    }

    #[test]
    fn test_document_json_uses_wire_names() {
        let doc = sample().with_shareable_id("ab12cd34");
        let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["user_id"], "owner-1");
        assert_eq!(json["couple_name_1"], "Ana");
        assert_eq!(json["theme"], "classic");
        assert_eq!(json["shareable_id"], "ab12cd34");
        assert!(json.get("version").is_none());
    }

    #[test]
    fn test_loading_sparse_json_fills_defaults() {
        let doc = WeddingDocument::from_json(
            r#"{"id": "w-9", "user_id": "o-9", "couple_name_1": "Kai", "theme": "modern"}"#,
        )
        .unwrap();

        assert_eq!(doc.theme(), Theme::Modern);
        assert!(doc.story_enabled());
        assert!(doc.story_timeline().is_empty());
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_loading_unknown_theme_fails() {
        let result = WeddingDocument::from_json(r#"{"id": "w", "user_id": "o", "theme": "neon"}"#);
        assert!(result.is_err());
    }
}
