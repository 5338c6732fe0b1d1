//! CLI command implementations

pub mod clean;
pub mod generate;
pub mod list;
pub mod preview;
