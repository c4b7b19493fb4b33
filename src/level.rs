//! CEFR levels and filename classification

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Delimiter that must surround a level token inside a filename
pub const LEVEL_DELIMITER: char = '_';

/// Key name used for documents without a level when they are bucketed
pub const UNKNOWN_KEY: &str = "UNKNOWN";

/// CEFR proficiency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B1Plus,
    B2,
    C1,
    C2,
}

impl Level {
    /// All levels in classification (and output) order
    pub const ALL: [Level; 7] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B1Plus,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B1Plus => "B1Plus",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Unknown CEFR level '{}'", s))
    }
}

/// Classify a document by the first level token found between underscores.
///
/// Tokens are tried in `Level::ALL` order. Because the token must be
/// delimited on both sides, `exam_B1Plus_x` never matches `B1`.
pub fn classify(filename: &str) -> Option<Level> {
    Level::ALL.iter().copied().find(|level| {
        let needle = format!("{d}{}{d}", level.as_str(), d = LEVEL_DELIMITER);
        filename.contains(&needle)
    })
}

/// Key of a bucket in the level aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKey {
    Level(Level),
    /// Documents whose filename carries no level (bucket policy only)
    Unknown,
}

impl LevelKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKey::Level(level) => level.as_str(),
            LevelKey::Unknown => UNKNOWN_KEY,
        }
    }
}

impl From<Level> for LevelKey {
    fn from(level: Level) -> Self {
        LevelKey::Level(level)
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNKNOWN_KEY {
            return Ok(LevelKey::Unknown);
        }
        s.parse().map(LevelKey::Level)
    }
}

// Serialized as a bare string so it can be used as a JSON object key.
impl Serialize for LevelKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LevelKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
