// deglyph-core/src/headless.rs

//! Convenience wrappers for one-shot, non-interactive sanitization.

use anyhow::Result;

use crate::config::RuleSetConfig;
use crate::engine::SanitizationEngine;
use crate::engines::emoji_engine::EmojiEngine;

/// Sanitizes `content` with the built-in rule set.
///
/// Returns the transformed text and whether it differs from the input. The
/// only failure mode is the embedded rule set failing to load, which would be
/// a build defect.
pub fn headless_sanitize_string(content: &str) -> Result<(String, bool)> {
    headless_sanitize_with(RuleSetConfig::load_default_rules()?, content)
}

/// Same as [`headless_sanitize_string`] with a caller-supplied rule set.
pub fn headless_sanitize_with(config: RuleSetConfig, content: &str) -> Result<(String, bool)> {
    let engine = EmojiEngine::new(config)?;
    let outcome = engine.sanitize(content);
    Ok((outcome.text, outcome.changed))
}
