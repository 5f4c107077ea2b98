//! # Scalar Field Keys
//!
//! Typed keys for the single-valued attributes of a wedding document, plus
//! the theme identifier and party group selectors.
//!
//! Every key maps to the snake_case attribute name used on the wire, so a
//! patch built from `ScalarField::VenueName` serializes as `venue_name`.

use crate::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Single-valued text attributes that can be edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarField {
    CoupleName1,
    CoupleName2,
    WeddingDate,
    VenueName,
    VenueLocation,
    TheirStory,
    BackgroundImage,
}

impl ScalarField {
    pub const ALL: [ScalarField; 7] = [
        ScalarField::CoupleName1,
        ScalarField::CoupleName2,
        ScalarField::WeddingDate,
        ScalarField::VenueName,
        ScalarField::VenueLocation,
        ScalarField::TheirStory,
        ScalarField::BackgroundImage,
    ];

    /// Wire name of the attribute
    pub fn key(self) -> &'static str {
        match self {
            ScalarField::CoupleName1 => "couple_name_1",
            ScalarField::CoupleName2 => "couple_name_2",
            ScalarField::WeddingDate => "wedding_date",
            ScalarField::VenueName => "venue_name",
            ScalarField::VenueLocation => "venue_location",
            ScalarField::TheirStory => "their_story",
            ScalarField::BackgroundImage => "background_image",
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScalarField {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| DocumentError::UnknownField(s.to_string()))
    }
}

/// Visual theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Modern,
    Boho,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Modern => "modern",
            Theme::Boho => "boho",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Theme::Classic),
            "modern" => Ok(Theme::Modern),
            "boho" => Ok(Theme::Boho),
            other => Err(DocumentError::InvalidTheme(other.to_string())),
        }
    }
}

/// Which of the three wedding-party lists a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyGroup {
    Bridal,
    Groom,
    Special,
}

impl PartyGroup {
    pub const ALL: [PartyGroup; 3] = [PartyGroup::Bridal, PartyGroup::Groom, PartyGroup::Special];

    pub fn key(self) -> &'static str {
        match self {
            PartyGroup::Bridal => "bridal_party",
            PartyGroup::Groom => "groom_party",
            PartyGroup::Special => "special_roles",
        }
    }
}

impl FromStr for PartyGroup {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bridal" | "bridal_party" => Ok(PartyGroup::Bridal),
            "groom" | "groom_party" => Ok(PartyGroup::Groom),
            "special" | "special_roles" => Ok(PartyGroup::Special),
            other => Err(DocumentError::UnknownPartyGroup(other.to_string())),
        }
    }
}
