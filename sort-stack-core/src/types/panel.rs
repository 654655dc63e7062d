//! Panel (child card) descriptors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Arena index assigned to a panel when a stack configuration is loaded.
///
/// Element caching is keyed by this id rather than by descriptor contents, so two
/// identical descriptors in one stack still get their own elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PanelId(usize);

impl PanelId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-defined configuration of one child card.
///
/// The record is opaque to the stack apart from the fields used for sorting:
/// `entity`, `entities` and `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelConfig(Map<String, Value>);

impl PanelConfig {
    /// Wraps a JSON value; only objects are valid card configurations.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidConfig(format!(
                "card configuration must be an object, got {other}"
            ))),
        }
    }

    /// Card type as understood by the element factory (`"entities"`, `"custom:foo"`, ...)
    pub fn card_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// Single entity field
    pub fn entity(&self) -> Option<&str> {
        self.str_field("entity")
    }

    /// Display-name override
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// First entry of the `entities` list.
    ///
    /// Entries are either plain ids or row objects carrying an `entity` field.
    pub fn first_listed_entity(&self) -> Option<&str> {
        let id = match self.0.get("entities")?.as_array()?.first()? {
            Value::String(id) => Some(id.as_str()),
            Value::Object(row) => row.get("entity").and_then(Value::as_str),
            _ => None,
        };
        id.filter(|id| !id.is_empty())
    }

    /// Number of rows in the `entities` list, if any
    pub fn listed_entity_count(&self) -> usize {
        self.0
            .get("entities")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// A panel descriptor placed in the stack's arena
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    pub config: PanelConfig,
}

impl Panel {
    #[must_use]
    pub fn new(id: PanelId, config: PanelConfig) -> Self {
        Self { id, config }
    }
}
