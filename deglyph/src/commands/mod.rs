// deglyph/src/commands/mod.rs
//! Command implementations for the deglyph CLI.

pub mod clean;
pub mod scan;
