// deglyph-core/src/lib.rs
//! # deglyph Core Library
//!
//! `deglyph-core` provides the platform-independent logic for removing emoji
//! from source text. It defines the removal rule set, compiles it into
//! regular expressions, and implements the `SanitizationEngine` trait that
//! applies it.
//!
//! The library is pure: it transforms text and never touches the file system.
//! Enumerating and rewriting files is the CLI's job.
//!
//! ## Modules
//!
//! * `config`: The rule set (ranges, span glyphs, literal patterns) and its validation.
//! * `sanitizers`: Compiles a rule set into regexes, with a process-wide cache.
//! * `engine`: The `SanitizationEngine` trait and `SanitizeOutcome`.
//! * `engines`: Concrete engines; currently `EmojiEngine`.
//! * `removal_match`: Per-removal records and summaries.
//! * `headless`: One-shot helpers.
//! * `errors`: The `DeglyphError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use deglyph_core::{EmojiEngine, SanitizationEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = EmojiEngine::with_default_rules()?;
//!
//!     let outcome = engine.sanitize("Hello \u{1F525} World");
//!     assert_eq!(outcome.text, "Hello  World");
//!     assert!(outcome.changed);
//!
//!     let outcome = engine.sanitize("<span class=\"icon\">\u{1F525}</span>");
//!     assert_eq!(outcome.text, "");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result`; structured failures are
//! `DeglyphError` values inside it. Sanitizing itself cannot fail.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod removal_match;
pub mod sanitizers;

/// Re-exports the rule-set types.
pub use config::{
    CodePoint,
    CodePointRange,
    LiteralRule,
    RemovalPass,
    RemovalSummaryItem,
    RuleSetConfig,
    SpanGlyph,
};

pub use errors::DeglyphError;

pub use engine::{SanitizationEngine, SanitizeOutcome};

pub use engines::emoji_engine::EmojiEngine;

pub use removal_match::{describe_code_points, summarize_matches, total_removals, RemovalMatch};

pub use headless::{headless_sanitize_string, headless_sanitize_with};

pub use sanitizers::compiler::{compile_rules, CompiledLiteral, CompiledRules};
