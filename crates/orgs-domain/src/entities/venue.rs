//! Venue aggregate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Hotel,
}

impl VenueType {
    pub const ALL: &'static [VenueType] = &[VenueType::Hotel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown venue type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line_1: String,
    pub line_2: Option<String>,
    pub municipality: String,
    pub postcode: String,
    pub coordinates: Coordinates,
}

/// A venue; `slug` is unique within its organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Store-assigned identifier, `None` until first saved
    pub id: Option<String>,
    pub organisation_id: String,
    pub name: String,
    pub slug: String,
    pub venue_type: VenueType,
    pub address: Address,
}

impl Venue {
    /// Whether `other` is a different persisted entity than this one
    pub fn is_other(&self, other: &Venue) -> bool {
        self.id.is_none() || self.id != other.id
    }
}
