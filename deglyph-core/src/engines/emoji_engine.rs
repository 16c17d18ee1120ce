// deglyph-core/src/engines/emoji_engine.rs
//! A `SanitizationEngine` that removes emoji in three passes: whole `<span>`
//! wrappers around a lone glyph, every code point in the configured ranges,
//! and the literal quote patterns.
//!
//! The passes repeat until a full round changes nothing. Every change
//! shortens the text, so the loop terminates.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, trace};

use crate::config::{validate_rules, RemovalPass, RuleSetConfig};
use crate::engine::{SanitizationEngine, SanitizeOutcome};
use crate::removal_match::{log_removal_debug, summarize_matches, RemovalMatch};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRules};

/// Rule name reported for span removals.
pub const SPAN_RULE_NAME: &str = "emoji_span";

/// Rule name reported for swept characters outside every named range.
const UNNAMED_RANGE: &str = "emoji_range";

#[derive(Debug)]
pub struct EmojiEngine {
    compiled_rules: Arc<CompiledRules>,
    config: RuleSetConfig,
}

impl EmojiEngine {
    /// Validates `config` before compiling it. Hand-built rule sets get the
    /// same checks as YAML ones; the fixed-point loop needs every literal
    /// replacement to be shorter than its `find`.
    pub fn new(config: RuleSetConfig) -> Result<Self> {
        validate_rules(&config)?;
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile removal rules for EmojiEngine")?;
        Ok(Self { compiled_rules, config })
    }

    /// Builds an engine over the embedded rule set.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RuleSetConfig::load_default_rules()?)
    }

    fn range_name(&self, c: char) -> &str {
        self.config
            .ranges
            .iter()
            .find(|r| r.contains(c))
            .map(|r| r.name.as_str())
            .unwrap_or(UNNAMED_RANGE)
    }

    /// Removing an inner span can leave its parent wrapping a lone glyph, so
    /// this pass repeats until no span matches.
    fn span_pass(&self, mut text: String, matches: &mut Vec<RemovalMatch>) -> String {
        let Some(span) = &self.compiled_rules.span else {
            return text;
        };
        loop {
            let mut out = String::with_capacity(text.len());
            let mut last_end = 0;
            let mut removed_any = false;
            for m in span.find_iter(&text) {
                out.push_str(&text[last_end..m.start()]);
                last_end = m.end();
                removed_any = true;
                matches.push(RemovalMatch {
                    rule_name: SPAN_RULE_NAME.to_string(),
                    pass: RemovalPass::Span,
                    original_string: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                });
            }
            if !removed_any {
                return text;
            }
            out.push_str(&text[last_end..]);
            text = out;
        }
    }

    fn sweep_pass(&self, text: String, matches: &mut Vec<RemovalMatch>) -> String {
        let Some(sweep) = &self.compiled_rules.sweep else {
            return text;
        };
        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        let mut removed_any = false;
        for m in sweep.find_iter(&text) {
            out.push_str(&text[last_end..m.start()]);
            last_end = m.end();
            removed_any = true;
            for (offset, c) in m.as_str().char_indices() {
                let start = m.start() + offset;
                matches.push(RemovalMatch {
                    rule_name: self.range_name(c).to_string(),
                    pass: RemovalPass::Range,
                    original_string: c.to_string(),
                    start,
                    end: start + c.len_utf8(),
                });
            }
        }
        if !removed_any {
            return text;
        }
        out.push_str(&text[last_end..]);
        out
    }

    fn literal_pass(&self, mut text: String, matches: &mut Vec<RemovalMatch>) -> String {
        for literal in &self.compiled_rules.literals {
            let found: Vec<usize> = text.match_indices(literal.find.as_str()).map(|(i, _)| i).collect();
            if found.is_empty() {
                continue;
            }
            for start in found {
                matches.push(RemovalMatch {
                    rule_name: literal.name.clone(),
                    pass: RemovalPass::Literal,
                    original_string: literal.find.clone(),
                    start,
                    end: start + literal.find.len(),
                });
            }
            text = text.replace(literal.find.as_str(), &literal.replace);
        }
        text
    }

    /// Runs the passes to a fixed point, returning the final text and every
    /// removal made on the way.
    fn run_passes(&self, content: &str) -> (String, Vec<RemovalMatch>) {
        let mut text = content.to_string();
        let mut matches = Vec::new();
        let mut round = 0usize;

        loop {
            round += 1;
            let before = text.len();
            text = self.span_pass(text, &mut matches);
            text = self.sweep_pass(text, &mut matches);
            text = self.literal_pass(text, &mut matches);
            trace!("Round {} shrank text from {} to {} bytes.", round, before, text.len());
            if text.len() == before {
                break;
            }
        }

        for m in &matches {
            log_removal_debug("[deglyph_core::emoji_engine]", m);
        }
        (text, matches)
    }
}

impl SanitizationEngine for EmojiEngine {
    fn sanitize(&self, content: &str) -> SanitizeOutcome {
        let (text, matches) = self.run_passes(content);
        let changed = text != content;
        debug!(
            "Sanitized {} bytes into {} bytes with {} removals.",
            content.len(),
            text.len(),
            matches.len()
        );
        SanitizeOutcome { text, changed, summary: summarize_matches(&matches) }
    }

    fn find_matches(&self, content: &str) -> Vec<RemovalMatch> {
        self.run_passes(content).1
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &RuleSetConfig {
        &self.config
    }
}
