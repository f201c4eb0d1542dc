//! Shared value types, error taxonomy, and fixed-point helpers.

pub mod color;
pub mod core;
pub mod error;
pub(crate) mod math;
