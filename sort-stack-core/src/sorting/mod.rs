//! Sort engine: key extraction, comparison and render ordering.
//!
//! Everything here is synchronous and side-effect free; element construction lives in
//! [`crate::services`].

mod compare;
mod key;
mod order;

pub use compare::{compare, Comparator};
pub use key::{extract_sort_key, representative_entity, SortKey};
pub use order::{order_flat, order_groups, order_plan};
