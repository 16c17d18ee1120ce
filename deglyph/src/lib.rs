// deglyph/src/lib.rs
//! # deglyph CLI
//!
//! This crate provides the command-line front end for `deglyph-core`: it finds
//! the page files of a front-end project, runs them through the emoji engine
//! and rewrites the ones that change.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
