//! Domain types shared by every Happy crate.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// A required field of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    About,
    Instructions,
    OpeningHours,
    Images,
    Position,
}

impl Field {
    /// Every required field, in form order.
    pub const ALL: [Field; 6] = [
        Field::Position,
        Field::Name,
        Field::About,
        Field::Images,
        Field::Instructions,
        Field::OpeningHours,
    ];

    /// Field name as used by the API.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::About => "about",
            Field::Instructions => "instructions",
            Field::OpeningHours => "opening_hours",
            Field::Images => "images",
            Field::Position => "position",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Visual style of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Success,
    Error,
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appearance::Success => write!(f, "success"),
            Appearance::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// API records
// ---------------------------------------------------------------------------

/// An image stored by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanageImage {
    pub id: u64,
    pub url: String,
}

/// A registered orphanage as returned by `GET /orphanages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orphanage {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub opening_hours: String,
    #[serde(default)]
    pub open_on_weekends: bool,
    #[serde(default)]
    pub images: Vec<OrphanageImage>,
}

impl Orphanage {
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
