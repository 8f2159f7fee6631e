//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod counts;
pub mod solve;
pub mod version;
