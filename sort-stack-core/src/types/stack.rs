//! Loaded stack layout

use super::config::StackLayout;
use super::panel::Panel;
use super::sort::{SortOverride, SortSpec};

/// A header panel with its member panels
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub main: Panel,
    pub members: Vec<Panel>,
    pub sort_override: Option<SortOverride>,
}

/// Panels of a stack, flat or grouped
#[derive(Debug, Clone, PartialEq)]
pub enum StackBody {
    Flat(Vec<Panel>),
    Grouped(Vec<Group>),
}

/// Validated stack configuration with every panel placed in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct StackPlan {
    pub sort: SortSpec,
    pub layout: StackLayout,
    pub body: StackBody,
}

impl StackPlan {
    /// Iterates every panel in id order
    pub fn panels(&self) -> Box<dyn Iterator<Item = &Panel> + '_> {
        match &self.body {
            StackBody::Flat(panels) => Box::new(panels.iter()),
            StackBody::Grouped(groups) => Box::new(
                groups
                    .iter()
                    .flat_map(|group| std::iter::once(&group.main).chain(&group.members)),
            ),
        }
    }

    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }
}
