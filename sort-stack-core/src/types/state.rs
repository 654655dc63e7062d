//! Live state snapshot types

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::read_path;

/// Current value and metadata of one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Entity ID (e.g. `sensor.kitchen_temperature`)
    #[serde(default)]
    pub entity_id: String,
    /// Raw state value
    #[serde(default)]
    pub state: String,
    /// Free-form attributes reported by the integration
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// When the state value last changed
    #[serde(
        default,
        deserialize_with = "crate::utils::datetime::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_changed: Option<String>,
    /// When the record (state or attributes) was last written
    #[serde(
        default,
        deserialize_with = "crate::utils::datetime::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
}

impl StateRecord {
    #[must_use]
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_last_changed(mut self, at: impl Into<String>) -> Self {
        self.last_changed = Some(at.into());
        self
    }

    #[must_use]
    pub fn with_last_updated(mut self, at: impl Into<String>) -> Self {
        self.last_updated = Some(at.into());
        self
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    /// Reads a dotted path against the record as a whole.
    ///
    /// The first segment selects a field (`entity_id`, `state`, `attributes`,
    /// `last_changed`, `last_updated`); the rest walks into the attribute tree.
    pub fn read_path(&self, path: &str) -> Option<Cow<'_, Value>> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let head = segments.next()?;
        let rest: Vec<&str> = segments.collect();

        // Top-level fields are plain strings and cannot be descended into.
        let leaf = |value: Option<&String>| {
            value
                .filter(|_| rest.is_empty())
                .map(|v| Cow::<Value>::Owned(Value::String(v.clone())))
        };

        match head {
            "entity_id" => leaf(Some(&self.entity_id)),
            "state" => leaf(Some(&self.state)),
            "last_changed" => leaf(self.last_changed.as_ref()),
            "last_updated" => leaf(self.last_updated.as_ref()),
            "attributes" => {
                let Some((key, tail)) = rest.split_first() else {
                    return Some(Cow::Owned(Value::Object(self.attributes.clone())));
                };
                let value = self.attributes.get(*key).filter(|v| !v.is_null())?;
                if tail.is_empty() {
                    Some(Cow::Borrowed(value))
                } else {
                    read_path(value, &tail.join(".")).map(Cow::Borrowed)
                }
            }
            _ => None,
        }
    }
}

/// Source of state records during a sort pass
pub trait StateLookup {
    fn state(&self, entity_id: &str) -> Option<&StateRecord>;
}

/// Snapshot of every entity's state, keyed by entity ID.
///
/// Deserializes from either an `{entity_id: record}` map or a plain list of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateSnapshot(HashMap<String, StateRecord>);

impl StateSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = StateRecord>) -> Self {
        let mut snapshot = Self::new();
        for record in records {
            snapshot.insert(record);
        }
        snapshot
    }

    pub fn insert(&mut self, record: StateRecord) {
        self.0.insert(record.entity_id.clone(), record);
    }

    pub fn get(&self, entity_id: &str) -> Option<&StateRecord> {
        self.0.get(entity_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl StateLookup for StateSnapshot {
    fn state(&self, entity_id: &str) -> Option<&StateRecord> {
        self.get(entity_id)
    }
}

impl<'de> Deserialize<'de> for StateSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MapOrList {
            Map(HashMap<String, StateRecord>),
            List(Vec<StateRecord>),
        }

        Ok(match MapOrList::deserialize(deserializer)? {
            // The map key is authoritative; a stale `entity_id` field is overwritten.
            MapOrList::Map(map) => Self::from_records(map.into_iter().map(|(key, mut record)| {
                record.entity_id = key;
                record
            })),
            MapOrList::List(list) => Self::from_records(list),
        })
    }
}
