// deglyph-core/src/engine.rs
//! Defines the core SanitizationEngine trait and related data structures.
//!
//! The `SanitizationEngine` trait decouples the driver from the concrete way
//! glyphs are found and removed. Building an engine is fallible (the rule set
//! must compile); running one is not.
//!
//! License: MIT OR APACHE 2.0

use crate::config::{RemovalSummaryItem, RuleSetConfig};
use crate::removal_match::RemovalMatch;
use crate::sanitizers::compiler::CompiledRules;

/// The result of sanitizing one text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOutcome {
    /// The transformed text.
    pub text: String,
    /// `true` if `text` differs from the input.
    pub changed: bool,
    /// What was removed, grouped per pass and rule.
    pub summary: Vec<RemovalSummaryItem>,
}

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Removes every glyph the rule set targets from `content`.
    ///
    /// The returned text is a fixed point: sanitizing it again reports
    /// `changed == false`.
    fn sanitize(&self, content: &str) -> SanitizeOutcome;

    /// Reports what `sanitize` would remove, without handing back the text.
    ///
    /// Used by `scan` and dry runs.
    fn analyze_for_stats(&self, content: &str) -> Vec<RemovalSummaryItem> {
        self.sanitize(content).summary
    }

    /// Every individual removal in the order the passes performed them.
    fn find_matches(&self, content: &str) -> Vec<RemovalMatch>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's rule set.
    fn get_rules(&self) -> &RuleSetConfig;
}
