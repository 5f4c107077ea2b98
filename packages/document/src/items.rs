//! # Collection Items
//!
//! Structured entries stored in the document's ordered lists:
//! timeline milestones, wedding-party members, FAQs and schedule events.
//!
//! Every item type exposes its editable scalar attributes through a typed
//! field enum and the [`CollectionItem`] trait, so editors can address
//! `(item, field)` pairs without string-concatenated keys.

use crate::DocumentError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_MILESTONE_IMAGE: &str =
    "https://images.unsplash.com/photo-1518568814500-bf0f8d125f46?w=600&h=400&fit=crop";
const DEFAULT_PORTRAIT_IMAGE: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b734?w=400&h=400&fit=crop&crop=face";

/// An entry of an ordered document collection whose scalar fields can be
/// read and written by key.
pub trait CollectionItem: Clone + fmt::Debug {
    type Field: Copy + Ord + fmt::Debug + fmt::Display + 'static;

    /// Current value of a field (empty when unset)
    fn field(&self, field: Self::Field) -> Cow<'_, str>;

    /// Overwrite a field with a raw input value
    fn set_field(&mut self, field: Self::Field, value: String);

    /// Fields that must be non-blank before the owner may save
    fn required_fields() -> &'static [Self::Field] {
        &[]
    }

    /// Required fields that are currently blank
    fn missing_required(&self) -> Vec<Self::Field> {
        Self::required_fields()
            .iter()
            .copied()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }
}

macro_rules! item_fields {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = DocumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|field| field.key() == s)
                    .ok_or_else(|| DocumentError::UnknownField(s.to_string()))
            }
        }
    };
}

item_fields! {
    /// Editable attributes of a timeline milestone
    MilestoneField {
        Year => "year",
        Title => "title",
        Description => "description",
        Image => "image",
    }
}

item_fields! {
    /// Editable attributes of a wedding-party member
    PartyMemberField {
        Name => "name",
        Role => "role",
        Relationship => "relationship",
        Description => "description",
        Image => "image",
        Age => "age",
    }
}

item_fields! {
    /// Editable attributes of an FAQ entry
    FaqField {
        Question => "question",
        Answer => "answer",
    }
}

item_fields! {
    /// Editable attributes of a schedule event
    ScheduleField {
        Title => "title",
        Time => "time",
        Date => "date",
        Duration => "duration",
        Location => "location",
        Description => "description",
        Highlight => "highlight",
    }
}

/// Story timeline entry. Identity is positional in the stored list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub year: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Milestone {
    /// Placeholder milestone offered by the "add" affordance
    pub fn starter(year: i32) -> Self {
        Self {
            year: year.to_string(),
            title: "New Milestone".to_string(),
            description: "Tell your story here...".to_string(),
            image: DEFAULT_MILESTONE_IMAGE.to_string(),
        }
    }
}

impl CollectionItem for Milestone {
    type Field = MilestoneField;

    fn field(&self, field: MilestoneField) -> Cow<'_, str> {
        Cow::Borrowed(match field {
            MilestoneField::Year => self.year.as_str(),
            MilestoneField::Title => self.title.as_str(),
            MilestoneField::Description => self.description.as_str(),
            MilestoneField::Image => self.image.as_str(),
        })
    }

    fn set_field(&mut self, field: MilestoneField, value: String) {
        match field {
            MilestoneField::Year => self.year = value,
            MilestoneField::Title => self.title = value,
            MilestoneField::Description => self.description = value,
            MilestoneField::Image => self.image = value,
        }
    }

    fn required_fields() -> &'static [MilestoneField] {
        &[MilestoneField::Year, MilestoneField::Title]
    }
}

/// Member of the bridal party, groom party or special roles list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub relationship: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl PartyMember {
    /// Blank member with a portrait placeholder
    pub fn starter(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: DEFAULT_PORTRAIT_IMAGE.to_string(),
            ..Self::default()
        }
    }

    /// Blank special-role member (flower girl, ring bearer...) which also
    /// carries an age
    pub fn special_starter(id: impl Into<String>) -> Self {
        Self {
            age: Some(String::new()),
            ..Self::starter(id)
        }
    }
}

impl CollectionItem for PartyMember {
    type Field = PartyMemberField;

    fn field(&self, field: PartyMemberField) -> Cow<'_, str> {
        Cow::Borrowed(match field {
            PartyMemberField::Name => self.name.as_str(),
            PartyMemberField::Role => self.role.as_str(),
            PartyMemberField::Relationship => self.relationship.as_str(),
            PartyMemberField::Description => self.description.as_str(),
            PartyMemberField::Image => self.image.as_str(),
            PartyMemberField::Age => self.age.as_deref().unwrap_or(""),
        })
    }

    fn set_field(&mut self, field: PartyMemberField, value: String) {
        match field {
            PartyMemberField::Name => self.name = value,
            PartyMemberField::Role => self.role = value,
            PartyMemberField::Relationship => self.relationship = value,
            PartyMemberField::Description => self.description = value,
            PartyMemberField::Image => self.image = value,
            PartyMemberField::Age => self.age = Some(value),
        }
    }

    fn required_fields() -> &'static [PartyMemberField] {
        &[PartyMemberField::Name, PartyMemberField::Role]
    }
}

/// Question and answer shown on the FAQ page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn starter(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: "New Question".to_string(),
            answer: "Your answer here...".to_string(),
        }
    }
}

impl CollectionItem for FaqItem {
    type Field = FaqField;

    fn field(&self, field: FaqField) -> Cow<'_, str> {
        Cow::Borrowed(match field {
            FaqField::Question => self.question.as_str(),
            FaqField::Answer => self.answer.as_str(),
        })
    }

    fn set_field(&mut self, field: FaqField, value: String) {
        match field {
            FaqField::Question => self.question = value,
            FaqField::Answer => self.answer = value,
        }
    }

    fn required_fields() -> &'static [FaqField] {
        &[FaqField::Question]
    }
}

/// Entry of the wedding-day schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEvent {
    pub title: String,
    pub time: String,
    pub date: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub highlight: bool,
}

impl CollectionItem for ScheduleEvent {
    type Field = ScheduleField;

    fn field(&self, field: ScheduleField) -> Cow<'_, str> {
        Cow::Borrowed(match field {
            ScheduleField::Title => self.title.as_str(),
            ScheduleField::Time => self.time.as_str(),
            ScheduleField::Date => self.date.as_str(),
            ScheduleField::Duration => self.duration.as_str(),
            ScheduleField::Location => self.location.as_str(),
            ScheduleField::Description => self.description.as_str(),
            ScheduleField::Highlight => {
                if self.highlight {
                    "true"
                } else {
                    "false"
                }
            }
        })
    }

    fn set_field(&mut self, field: ScheduleField, value: String) {
        match field {
            ScheduleField::Title => self.title = value,
            ScheduleField::Time => self.time = value,
            ScheduleField::Date => self.date = value,
            ScheduleField::Duration => self.duration = value,
            ScheduleField::Location => self.location = value,
            ScheduleField::Description => self.description = value,
            ScheduleField::Highlight => self.highlight = value == "true",
        }
    }

    fn required_fields() -> &'static [ScheduleField] {
        &[ScheduleField::Title, ScheduleField::Time]
    }
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mint an id for a new party member or FAQ entry (`<unix-millis>-<seq>`)
pub fn next_item_id() -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}
