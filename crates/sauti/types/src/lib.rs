//! Sauti domain types.
//!
//! Shared vocabulary for the feedback pipeline: the closed set of entity
//! kinds feedback can target, canonical entity keys, feedback events, and
//! sentiment classification.

pub mod ids;

pub use ids::normalize_entity_id;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of things feedback can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Driver,
    Trip,
    App,
    Marshal,
}

impl EntityType {
    /// All entity types, in canonical order.
    pub const ALL: [EntityType; 4] = [
        EntityType::Driver,
        EntityType::Trip,
        EntityType::App,
        EntityType::Marshal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Driver => "driver",
            EntityType::Trip => "trip",
            EntityType::App => "app",
            EntityType::Marshal => "marshal",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown entity type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(EntityType::Driver),
            "trip" => Ok(EntityType::Trip),
            "app" => Ok(EntityType::App),
            "marshal" => Ok(EntityType::Marshal),
            other => Err(UnknownEntityType(other.to_string())),
        }
    }
}

/// Canonical identity of one entity: type plus normalized id.
///
/// Two raw ids that normalize to the same string refer to the same entity,
/// permanently. Construct through [`EntityKey::new`] so the id is always in
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub entity_type: EntityType,
    pub entity_id: String,
}

impl EntityKey {
    /// Build a key from a raw, caller-supplied id, normalizing it.
    pub fn new(entity_type: EntityType, raw_id: &str) -> Self {
        Self {
            entity_type,
            entity_id: normalize_entity_id(raw_id),
        }
    }

    /// Build a key from an id that is already normalized (e.g. read back
    /// from the store, where only canonical ids are ever written).
    pub fn from_normalized(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.entity_id)
    }
}

/// One submitted comment plus its routing and dedup metadata.
///
/// Immutable once enqueued. `entity_id` holds the raw caller-supplied id;
/// the pipeline normalizes it at processing time. `feedback_id` is the
/// dedup key, scoped per entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub feedback_id: String,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

/// Running statistics for one entity.
///
/// `avg` is the arithmetic mean of every score ever applied for this key,
/// maintained incrementally. Absence of stats means "no feedback yet",
/// which is distinct from an average of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    #[serde(flatten)]
    pub key: EntityKey,
    pub count: u64,
    pub avg: f64,
}

/// Sentiment classification of a score in the normalized [1, 5] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a normalized score with the fixed cutoffs:
    /// `>= 3.5` positive, `<= 2.5` negative, neutral in between.
    pub fn from_score(score: f64) -> Self {
        if score >= 3.5 {
            SentimentLabel::Positive
        } else if score <= 2.5 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        };
        f.write_str(s)
    }
}
