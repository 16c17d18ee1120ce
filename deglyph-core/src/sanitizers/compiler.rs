//! compiler.rs - Manages the compilation and caching of removal rules.
//!
//! This module converts a `RuleSetConfig` into `CompiledRules`: one regex for
//! the structural span pass, one unioned character-class regex for the sweep
//! pass, and the ordered literal replacements. A global, shared cache keyed by
//! a hash of the rule set avoids redundant compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{CodePointRange, RuleSetConfig, SpanGlyph};
use crate::errors::DeglyphError;

/// Upper bound for the compiled size of each pass regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// An ordered literal replacement, ready to apply.
#[derive(Debug, Clone)]
pub struct CompiledLiteral {
    pub name: String,
    pub find: String,
    pub replace: String,
}

/// The compiled form of a whole rule set.
///
/// A pass with no configured rules compiles to `None` and is skipped.
#[derive(Debug)]
pub struct CompiledRules {
    /// Matches a `<span ...>` whose only content is one span glyph.
    pub span: Option<Regex>,
    /// Matches one or more consecutive characters from any configured range.
    pub sweep: Option<Regex>,
    pub literals: Vec<CompiledLiteral>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rule sets.
    /// The key is a hash of the `RuleSetConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &RuleSetConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Builds the alternation of every accepted spelling of the span glyphs.
///
/// Proper glyphs accept an optional trailing U+FE0F. Alternatives are
/// deduplicated and ordered longest first.
fn span_alternatives(glyphs: &[SpanGlyph]) -> Vec<String> {
    let mut literal_forms: Vec<(usize, String)> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for g in glyphs {
        let base = g.glyph.trim_end_matches(VARIATION_SELECTOR_16);
        if !base.is_empty() && seen.insert(format!("glyph:{base}")) {
            literal_forms.push((base.len() + VARIATION_SELECTOR_16.len_utf8(), format!("{}\u{FE0F}?", regex::escape(base))));
        }
        if let Some(mangled) = g.mangled.as_deref().filter(|m| !m.is_empty()) {
            if seen.insert(format!("mangled:{mangled}")) {
                literal_forms.push((mangled.len(), regex::escape(mangled)));
            }
        }
    }

    literal_forms.sort_by(|a, b| b.0.cmp(&a.0));
    literal_forms.into_iter().map(|(_, alt)| alt).collect()
}

fn build_span_pattern(glyphs: &[SpanGlyph]) -> Option<String> {
    let alternatives = span_alternatives(glyphs);
    if alternatives.is_empty() {
        return None;
    }
    Some(format!(r"<span[^>]*>\s*(?:{})\s*</span>", alternatives.join("|")))
}

fn build_sweep_pattern(ranges: &[CodePointRange]) -> Option<String> {
    if ranges.is_empty() {
        return None;
    }
    let class: String = ranges
        .iter()
        .map(|r| {
            if r.start == r.end {
                format!(r"\x{{{:X}}}", r.start.value())
            } else {
                format!(r"\x{{{:X}}}-\x{{{:X}}}", r.start.value(), r.end.value())
            }
        })
        .collect();
    Some(format!("[{class}]+"))
}

fn build_regex(pass: &str, pattern: &str) -> Result<Regex, DeglyphError> {
    debug!("Compiling {} pass pattern ({} bytes).", pass, pattern.len());
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| DeglyphError::RuleCompilationError(pass.to_string(), e))
}

/// Compiles a rule set into `CompiledRules`.
/// This is the low-level function that performs the actual regex compilation.
pub fn compile_rules(config: &RuleSetConfig) -> Result<CompiledRules, DeglyphError> {
    debug!(
        "Starting compilation of {} span glyphs, {} ranges, {} literal patterns.",
        config.span_glyphs.len(),
        config.ranges.len(),
        config.literal_patterns.len()
    );

    let span = build_span_pattern(&config.span_glyphs)
        .map(|p| build_regex("span", &p))
        .transpose()?;
    let sweep = build_sweep_pattern(&config.ranges)
        .map(|p| build_regex("range", &p))
        .transpose()?;

    let literals = config
        .literal_patterns
        .iter()
        .map(|rule| CompiledLiteral {
            name: rule.name.clone(),
            find: rule.find.clone(),
            replace: rule.replace.clone(),
        })
        .collect();

    log::debug!(
        target: "deglyph_core::sanitizer",
        "Rule set compiled successfully."
    );
    Ok(CompiledRules { span, sweep, literals })
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &RuleSetConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = Arc::new(compile_rules(config)?);

    COMPILED_RULES_CACHE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached rules for key: {}", cache_key);
    Ok(compiled)
}
