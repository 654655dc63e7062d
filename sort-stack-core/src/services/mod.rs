//! Render services

mod element_resolver;
mod error_card;
mod stack_service;

pub use element_resolver::{ElementResolver, LazyFactory};
pub use error_card::ErrorCard;
pub use stack_service::{PassOutcome, SortStackService};
