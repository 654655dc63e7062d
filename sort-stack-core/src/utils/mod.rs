//! Shared helpers

pub mod attribute_path;
pub mod datetime;

pub use attribute_path::read_path;
