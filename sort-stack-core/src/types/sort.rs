//! Sort specification types

use serde::{Deserialize, Serialize};

/// Locale used for string collation when none is configured
pub const DEFAULT_LOCALE: &str = "sv-SE";

/// What a panel is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    EntityId,
    #[default]
    Name,
    State,
    LastChanged,
    LastUpdated,
    Attribute,
    /// Any value this version does not know; sorts every panel as equal
    #[serde(other)]
    Unsupported,
}

impl SortBy {
    /// Timestamp kinds treat a missing record as the epoch
    pub fn is_timestamp(self) -> bool {
        matches!(self, Self::LastChanged | Self::LastUpdated)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

/// Full sort specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub by: SortBy,
    pub order: SortOrder,
    /// Compare keys as numbers instead of strings
    pub numeric: bool,
    /// BCP-47 locale for string collation
    pub locale: String,
    #[serde(alias = "ignore_case")]
    pub case_insensitive: bool,
    /// Dotted attribute path, used when `by` is `attribute`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Sort every panel by this entity instead of its own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            by: SortBy::default(),
            order: SortOrder::default(),
            numeric: false,
            locale: DEFAULT_LOCALE.to_string(),
            case_insensitive: true,
            attribute: None,
            entity: None,
        }
    }
}

impl SortSpec {
    #[must_use]
    pub fn by(by: SortBy) -> Self {
        Self {
            by,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn descending(mut self) -> Self {
        self.order = SortOrder::Desc;
        self
    }

    #[must_use]
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, path: impl Into<String>) -> Self {
        self.attribute = Some(path.into());
        self
    }

    /// Applies a group's override on top of this specification.
    ///
    /// Fields set in the override replace ours; the rest are inherited. An empty
    /// attribute path in the override keeps the inherited one.
    #[must_use]
    pub fn merged(&self, over: &SortOverride) -> Self {
        Self {
            by: over.by.unwrap_or(self.by),
            order: over.order.unwrap_or(self.order),
            numeric: over.numeric.unwrap_or(self.numeric),
            locale: over.locale.clone().unwrap_or_else(|| self.locale.clone()),
            case_insensitive: over.case_insensitive.unwrap_or(self.case_insensitive),
            attribute: over
                .attribute
                .clone()
                .filter(|path| !path.is_empty())
                .or_else(|| self.attribute.clone()),
            entity: over.entity.clone().or_else(|| self.entity.clone()),
        }
    }
}

/// Partial sort specification attached to a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(alias = "ignore_case", skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}
