//! errors.rs - Custom error types for the deglyph-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `deglyph-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeglyphError {
    #[error("Failed to compile removal pass '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Invalid code point '{0}': expected the form U+XXXX with a valid Unicode scalar value")]
    InvalidCodePoint(String),

    #[error("Rule validation failed:\n{0}")]
    RuleValidation(String),
}
