//! Value objects shared by incremental units and dialogue managers

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub mod json;

/// Concepts attached to a dialogue act, as key-value pairs
pub type Concepts = BTreeMap<String, serde_json::Value>;

/// Identity of the component that produced a unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a module identity backed by a fresh UUID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creation time of a unit in seconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedAt(f64);

impl CreatedAt {
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Convert back to a calendar timestamp, if the value is representable
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let secs = self.0.floor();
        let nanos = ((self.0 - secs) * 1e9).round() as u32;
        Utc.timestamp_opt(secs as i64, nanos.min(999_999_999)).single()
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(timestamp: DateTime<Utc>) -> Self {
        let secs = timestamp.timestamp() as f64;
        let fraction = f64::from(timestamp.timestamp_subsec_nanos()) / 1e9;
        Self(secs + fraction)
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning link from a derived unit to the unit it was computed from.
///
/// Only the identity of the upstream unit and its creator are kept; holding a
/// grounding reference never extends the upstream unit's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundingRef {
    /// Identifier of the upstream unit
    pub iu_id: Uuid,
    /// Producer of the upstream unit
    pub creator: ModuleId,
}

impl GroundingRef {
    pub fn new(iu_id: Uuid, creator: ModuleId) -> Self {
        Self { iu_id, creator }
    }

    /// Ground on an existing unit
    pub fn of(unit: &crate::units::IncrementalUnit) -> Self {
        let base = unit.base();
        Self {
            iu_id: base.iu_id(),
            creator: base.creator().clone(),
        }
    }
}

/// A dialogue act: an act label paired with its concepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueAct {
    pub act: String,
    #[serde(default)]
    pub concepts: Concepts,
}

impl DialogueAct {
    /// Create a dialogue act with no concepts
    pub fn new(act: impl Into<String>) -> Self {
        Self {
            act: act.into(),
            concepts: Concepts::new(),
        }
    }

    /// Create a dialogue act carrying the given concepts
    pub fn with_concepts(act: impl Into<String>, concepts: Concepts) -> Self {
        Self {
            act: act.into(),
            concepts,
        }
    }

    /// Add a single concept
    pub fn with_concept(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.concepts.insert(key.into(), value);
        self
    }

    pub fn concept(&self, key: &str) -> Option<&serde_json::Value> {
        self.concepts.get(key)
    }
}

impl fmt::Display for DialogueAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match json::concepts_json(&self.concepts) {
            Ok(concepts) => write!(f, "{} - {}", self.act, concepts),
            Err(_) => write!(f, "{} - {:?}", self.act, self.concepts),
        }
    }
}
