//! Rule-set management for `deglyph-core`.
//!
//! This module defines the data structures describing what gets removed: the
//! span glyphs of the structural pre-pass, the code-point ranges of the sweep
//! pass, and the literal quote patterns of the final pass. The built-in rule
//! set is a YAML document embedded at build time; this module parses it and
//! validates its integrity.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::DeglyphError;

/// A single Unicode scalar value, written in configuration as `U+XXXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodePoint(char);

impl CodePoint {
    pub fn as_char(self) -> char {
        self.0
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }
}

impl FromStr for CodePoint {
    type Err = DeglyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .ok_or_else(|| DeglyphError::InvalidCodePoint(s.to_string()))?;
        if hex.is_empty() || hex.len() > 6 {
            return Err(DeglyphError::InvalidCodePoint(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(CodePoint)
            .ok_or_else(|| DeglyphError::InvalidCodePoint(s.to_string()))
    }
}

impl TryFrom<String> for CodePoint {
    type Error = DeglyphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CodePoint> for String {
    fn from(cp: CodePoint) -> Self {
        cp.to_string()
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

/// A closed interval of code points deleted by the sweep pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CodePointRange {
    /// Block label, used in reports (e.g., "emoticons").
    pub name: String,
    pub start: CodePoint,
    pub end: CodePoint,
}

impl CodePointRange {
    pub fn contains(&self, c: char) -> bool {
        self.start.as_char() <= c && c <= self.end.as_char()
    }
}

/// A glyph that, as the sole content of a `<span>`, removes the whole span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SpanGlyph {
    /// The proper glyph, without any trailing variation selector.
    pub glyph: String,
    /// The same glyph after a Windows-1254 mis-decode of its UTF-8 bytes.
    #[serde(default)]
    pub mangled: Option<String>,
}

/// An exact substring replacement applied after the sweep pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LiteralRule {
    /// Unique identifier for the rule (e.g., "open_quote_fire").
    pub name: String,
    pub find: String,
    pub replace: String,
}

/// The complete, ordered removal rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSetConfig {
    pub ranges: Vec<CodePointRange>,
    pub span_glyphs: Vec<SpanGlyph>,
    pub literal_patterns: Vec<LiteralRule>,
}

/// Which of the three passes removed something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPass {
    Span,
    Range,
    Literal,
}

impl fmt::Display for RemovalPass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            RemovalPass::Span => "span",
            RemovalPass::Range => "range",
            RemovalPass::Literal => "literal",
        };
        f.write_str(label)
    }
}

/// A single item in the removal summary for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalSummaryItem {
    pub rule_name: String,
    pub pass: RemovalPass,
    pub occurrences: usize,
    /// Up to a handful of distinct removed substrings, in order of appearance.
    pub samples: Vec<String>,
}

impl RuleSetConfig {
    /// Loads the built-in rule set from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config = Self::from_yaml_str(default_yaml).context("Failed to parse default rules")?;
        debug!(
            "Loaded {} ranges, {} span glyphs, {} literal patterns.",
            config.ranges.len(),
            config.span_glyphs.len(),
            config.literal_patterns.len()
        );
        Ok(config)
    }

    /// Parses and validates a rule set from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RuleSetConfig = serde_yml::from_str(text).context("Invalid rule set YAML")?;
        validate_rules(&config)?;
        Ok(config)
    }

    /// Returns `true` if `c` falls inside any configured range.
    pub fn in_ranges(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }
}

/// Validates rule integrity, collecting every problem before failing.
pub(crate) fn validate_rules(config: &RuleSetConfig) -> Result<(), DeglyphError> {
    let mut errors = Vec::new();

    for range in &config.ranges {
        if range.start > range.end {
            errors.push(format!(
                "Range '{}' starts at {} which is after its end {}.",
                range.name, range.start, range.end
            ));
        }
    }

    for (idx, glyph) in config.span_glyphs.iter().enumerate() {
        if glyph.glyph.is_empty() {
            errors.push(format!("Span glyph #{} has an empty `glyph` field.", idx + 1));
        }
        if glyph.mangled.as_deref() == Some("") {
            errors.push(format!("Span glyph #{} has an empty `mangled` field.", idx + 1));
        }
    }

    let mut rule_names = HashSet::new();
    for rule in &config.literal_patterns {
        if rule.name.is_empty() {
            errors.push("A literal pattern has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate literal pattern name found: '{}'.", rule.name));
        }
        if rule.find.is_empty() {
            errors.push(format!("Literal pattern '{}' has an empty `find` field.", rule.name));
        } else if rule.replace.len() >= rule.find.len() {
            errors.push(format!(
                "Literal pattern '{}': replacement must be shorter than the text it replaces.",
                rule.name
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DeglyphError::RuleValidation(errors.join("\n")))
    }
}
