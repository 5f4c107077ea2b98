//! # Document Patches
//!
//! A patch is the unit of commit: a sparse set of attribute replacements.
//! Absent keys are left untouched, present keys replace the stored value
//! wholesale (collections included). Applying the same patch twice yields
//! the same document, which is what makes gateway retries safe.

use crate::{FaqItem, Milestone, PartyGroup, PartyMember, ScalarField, ScheduleEvent, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_name_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_name_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedding_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_timeline: Option<Vec<Milestone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridal_party: Option<Vec<PartyMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groom_party: Option<Vec<PartyMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_roles: Option<Vec<PartyMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<FaqItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_events: Option<Vec<ScheduleEvent>>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-attribute patch for an in-place edit
    pub fn scalar(field: ScalarField, value: impl Into<String>) -> Self {
        let mut patch = Self::new();
        patch.set_scalar(field, value);
        patch
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: impl Into<String>) {
        *self.scalar_slot(field) = Some(value.into());
    }

    /// Pending value of a scalar attribute, if this patch carries one
    pub fn scalar_value(&self, field: ScalarField) -> Option<&str> {
        match field {
            ScalarField::CoupleName1 => self.couple_name_1.as_deref(),
            ScalarField::CoupleName2 => self.couple_name_2.as_deref(),
            ScalarField::WeddingDate => self.wedding_date.as_deref(),
            ScalarField::VenueName => self.venue_name.as_deref(),
            ScalarField::VenueLocation => self.venue_location.as_deref(),
            ScalarField::TheirStory => self.their_story.as_deref(),
            ScalarField::BackgroundImage => self.background_image.as_deref(),
        }
    }

    fn scalar_slot(&mut self, field: ScalarField) -> &mut Option<String> {
        match field {
            ScalarField::CoupleName1 => &mut self.couple_name_1,
            ScalarField::CoupleName2 => &mut self.couple_name_2,
            ScalarField::WeddingDate => &mut self.wedding_date,
            ScalarField::VenueName => &mut self.venue_name,
            ScalarField::VenueLocation => &mut self.venue_location,
            ScalarField::TheirStory => &mut self.their_story,
            ScalarField::BackgroundImage => &mut self.background_image,
        }
    }

    pub fn set_party(&mut self, group: PartyGroup, members: Vec<PartyMember>) {
        match group {
            PartyGroup::Bridal => self.bridal_party = Some(members),
            PartyGroup::Groom => self.groom_party = Some(members),
            PartyGroup::Special => self.special_roles = Some(members),
        }
    }

    /// Whether applying this patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Wire names of the attributes this patch replaces
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = ScalarField::ALL
            .into_iter()
            .filter(|field| self.scalar_value(*field).is_some())
            .map(ScalarField::key)
            .collect();

        let flags = [
            ("theme", self.theme.is_some()),
            ("story_enabled", self.story_enabled.is_some()),
            ("story_timeline", self.story_timeline.is_some()),
            ("bridal_party", self.bridal_party.is_some()),
            ("groom_party", self.groom_party.is_some()),
            ("special_roles", self.special_roles.is_some()),
            ("faqs", self.faqs.is_some()),
            ("schedule_events", self.schedule_events.is_some()),
        ];
        keys.extend(flags.into_iter().filter(|(_, present)| *present).map(|(key, _)| key));
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_serializes_to_empty_object() {
        let json = serde_json::to_string(&DocumentPatch::new()).unwrap();
        assert_eq!(json, "{}");
        assert!(DocumentPatch::new().is_empty());
    }

    #[test]
    fn test_narrow_patch_only_carries_its_keys() {
        let mut patch = DocumentPatch::new();
        patch.faqs = Some(vec![FaqItem::starter("f-1")]);

        let json = serde_json::to_value(&patch).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("faqs"));
        assert_eq!(patch.keys(), vec!["faqs"]);
    }

    #[test]
    fn test_patch_round_trips_through_json() {
        let mut patch = DocumentPatch::scalar(ScalarField::WeddingDate, "2025-06-15");
        patch.set_party(PartyGroup::Groom, vec![PartyMember::starter("g-1")]);

        let json = serde_json::to_string(&patch).unwrap();
        let back: DocumentPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }
}
