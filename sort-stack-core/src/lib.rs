//! Sorted Stack Core Library
//!
//! Orders the child cards of a dashboard stack by a value read from live entity
//! state, including:
//! - Sort-key extraction and locale-aware comparison
//! - Flat and grouped render ordering
//! - Element caching and the render pass (`SortStackService`)
//!
//! The card factory and the state source belong to the host and are injected
//! through traits.

pub mod error;
pub mod services;
pub mod sorting;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ErrorCard, PassOutcome, SortStackService};
pub use traits::{CardElement, CardFactory, CardHelpersLoader, ReadyHelpers};
pub use types::{SortSpec, StackConfig, StateRecord, StateSnapshot};
