//! Type definition module

mod config;
mod panel;
mod sort;
mod stack;
mod state;

pub use config::{GroupConfig, StackConfig, StackLayout};
pub use panel::{Panel, PanelConfig, PanelId};
pub use sort::{SortBy, SortOrder, SortOverride, SortSpec, DEFAULT_LOCALE};
pub use stack::{Group, StackBody, StackPlan};
pub use state::{StateLookup, StateRecord, StateSnapshot};
