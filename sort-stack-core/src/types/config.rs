//! Stack configuration as supplied by the dashboard host

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::panel::{Panel, PanelConfig, PanelId};
use super::sort::{SortOverride, SortSpec};
use super::stack::{Group, StackBody, StackPlan};
use crate::error::{CoreError, CoreResult};

/// Stacking direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackLayout {
    #[default]
    Vertical,
    Horizontal,
}

/// One group: a header card plus its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub main: PanelConfig,
    #[serde(default, alias = "members")]
    pub cards: Vec<PanelConfig>,
    /// Member ordering; members keep their configured order when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOverride>,
}

/// Card configuration of a sorted stack.
///
/// Exactly one of `cards` (flat mode) or `groups` (group mode) is used; unknown keys
/// such as the host's `type` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<PanelConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupConfig>>,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub layout: StackLayout,
}

impl StackConfig {
    /// Parses a host configuration object
    pub fn from_value(value: Value) -> CoreResult<Self> {
        serde_json::from_value(value).map_err(|e| CoreError::InvalidConfig(e.to_string()))
    }

    /// Minimal configuration offered to a visual editor for a freshly added stack
    pub fn stub() -> Value {
        json!({
            "cards": [],
            "sort": { "by": "name", "order": "asc" },
        })
    }

    /// Validates the configuration and assigns a [`PanelId`] to every card.
    ///
    /// Ids are handed out in document order: flat cards first-to-last, or for each
    /// group its main card followed by its members.
    pub fn into_plan(self) -> CoreResult<StackPlan> {
        let mut next_id = 0usize;
        let mut place = |config: PanelConfig| {
            let panel = Panel::new(PanelId::new(next_id), config);
            next_id += 1;
            panel
        };

        let body = match (self.cards, self.groups) {
            (None, None) => {
                return Err(CoreError::InvalidConfig(
                    "either `cards` or `groups` must be provided".to_string(),
                ));
            }
            (cards, Some(groups)) => {
                if cards.is_some() {
                    log::warn!("Both `cards` and `groups` configured; using `groups`");
                }
                StackBody::Grouped(
                    groups
                        .into_iter()
                        .map(|group| Group {
                            main: place(group.main),
                            members: group.cards.into_iter().map(&mut place).collect(),
                            sort_override: group.sort,
                        })
                        .collect(),
                )
            }
            (Some(cards), None) => StackBody::Flat(cards.into_iter().map(&mut place).collect()),
        };

        Ok(StackPlan {
            sort: self.sort,
            layout: self.layout,
            body,
        })
    }
}
