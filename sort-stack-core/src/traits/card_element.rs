//! Constructed card element Trait

use std::fmt;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::types::StateSnapshot;

/// A visual card built by the host's element factory.
///
/// Elements are cached per panel and receive every new state snapshot, so
/// implementations need interior mutability for whatever they derive from it.
pub trait CardElement: Send + Sync + fmt::Debug {
    /// Pushes the latest state snapshot onto the element
    ///
    /// # Arguments
    /// * `states` - Snapshot shared by every element of the render pass
    fn set_state(&self, states: &Arc<StateSnapshot>) -> CoreResult<()>;

    /// Height (or width, in a horizontal stack) in layout units
    fn card_size(&self) -> u32 {
        1
    }

    /// Short human-readable description, used by text hosts and diagnostics
    fn label(&self) -> String;
}
