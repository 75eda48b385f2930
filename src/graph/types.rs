//! Core type definitions for the recommendation graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest rating a user can give a product.
pub const MIN_RATING: u8 = 1;

/// Highest rating a user can give a product.
pub const MAX_RATING: u8 = 5;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Qualitative label attached to a rating.
///
/// Carried alongside the numeric score on every RATES edge; the string
/// forms are the ones external form glue submits and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingType {
    Recommends,
    Discourages,
    Rates,
}

impl RatingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingType::Recommends => "recommends",
            RatingType::Discourages => "discourages",
            RatingType::Rates => "rates",
        }
    }
}

impl fmt::Display for RatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown rating type string.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown rating type: {0:?}")]
pub struct ParseRatingTypeError(pub String);

impl FromStr for RatingType {
    type Err = ParseRatingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommends" => Ok(RatingType::Recommends),
            "discourages" => Ok(RatingType::Discourages),
            "rates" => Ok(RatingType::Rates),
            other => Err(ParseRatingTypeError(other.to_string())),
        }
    }
}
