//! Craft identifiers.
//!
//! A `CraftId` is the routing key handed from the classifier to the result
//! page. "No match" is expressed as `Option::None`, never as a sentinel variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier for a recognised craft.
///
/// Serialized form is the route token (`"blue-pottery"`, `"warli"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftId {
    #[serde(rename = "channapatna")]
    Channapatna,

    #[serde(rename = "blue-pottery")]
    BluePottery,

    #[serde(rename = "warli")]
    Warli,

    #[serde(rename = "kolam")]
    Kolam,

    #[serde(rename = "madhubani")]
    Madhubani,
}

impl CraftId {
    /// Every known craft, in catalogue order.
    pub const ALL: [CraftId; 5] = [
        CraftId::Channapatna,
        CraftId::BluePottery,
        CraftId::Warli,
        CraftId::Kolam,
        CraftId::Madhubani,
    ];

    /// Route token used in `/result/{id}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channapatna => "channapatna",
            Self::BluePottery => "blue-pottery",
            Self::Warli => "warli",
            Self::Kolam => "kolam",
            Self::Madhubani => "madhubani",
        }
    }

    /// Parse a route token. Matching is exact (tokens are lowercase).
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == token)
    }
}

impl fmt::Display for CraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known craft token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown craft identifier: {0}")]
pub struct UnknownCraft(pub String);

impl FromStr for CraftId {
    type Err = UnknownCraft;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownCraft(s.to_string()))
    }
}
