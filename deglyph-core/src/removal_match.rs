//! Data structures and helpers for recording what each pass removed.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{RemovalPass, RemovalSummaryItem};

/// Maximum number of distinct samples kept per summary item.
pub const MAX_SAMPLES_PER_RULE: usize = 5;

/// One removal performed by one pass.
///
/// `start` and `end` are byte offsets into the text as it stood when the pass
/// ran, not into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalMatch {
    pub rule_name: String,
    pub pass: RemovalPass,
    pub original_string: String,
    pub start: usize,
    pub end: usize,
}

/// Renders text as a list of code points, e.g. `U+1F525 U+FE0F`.
///
/// Log lines use this form so that removed glyphs stay legible on terminals
/// without emoji fonts.
pub fn describe_code_points(s: &str) -> String {
    s.chars()
        .map(|c| format!("U+{:04X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn log_removal_debug(module_path: &str, m: &RemovalMatch) {
    debug!(
        "{} Removed via {} rule '{}' at {}..{}: [{}]",
        module_path,
        m.pass,
        m.rule_name,
        m.start,
        m.end,
        describe_code_points(&m.original_string)
    );
}

/// Folds matches into one summary item per (pass, rule), in order of first
/// appearance.
pub fn summarize_matches(matches: &[RemovalMatch]) -> Vec<RemovalSummaryItem> {
    let mut summary: Vec<RemovalSummaryItem> = Vec::new();

    for m in matches {
        let existing = summary
            .iter()
            .position(|item| item.pass == m.pass && item.rule_name == m.rule_name);
        let idx = match existing {
            Some(idx) => idx,
            None => {
                summary.push(RemovalSummaryItem {
                    rule_name: m.rule_name.clone(),
                    pass: m.pass,
                    occurrences: 0,
                    samples: Vec::new(),
                });
                summary.len() - 1
            }
        };
        let item = &mut summary[idx];
        item.occurrences += 1;
        if item.samples.len() < MAX_SAMPLES_PER_RULE && !item.samples.contains(&m.original_string) {
            item.samples.push(m.original_string.clone());
        }
    }

    summary
}

/// Total number of removals across a summary.
pub fn total_removals(summary: &[RemovalSummaryItem]) -> usize {
    summary.iter().map(|item| item.occurrences).sum()
}
