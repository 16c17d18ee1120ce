// deglyph/src/ui/diff_viewer.rs
//! Unified diff output for files that `clean` changes.

use std::io::{self, Write};

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn write_colored<W: Write + ?Sized>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    match color_for(entry, theme_map).filter(|_| supports_color) {
        Some(color) => write!(writer, "{}", text.color(color)),
        None => write!(writer, "{}", text),
    }
}

/// Prints a unified diff between `original` and `sanitized`, labelled with
/// `label` (normally the file name).
pub fn print_diff<W: Write + ?Sized>(
    label: &str,
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);

    write_colored(writer, &format!("--- a/{label}\n+++ b/{label}\n"), ThemeEntry::DiffHeader, theme_map, supports_color)?;

    for hunk in patch.hunks() {
        write_colored(
            writer,
            &format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.old_range().start(),
                hunk.old_range().len(),
                hunk.new_range().start(),
                hunk.new_range().len()
            ),
            ThemeEntry::DiffHeader,
            theme_map,
            supports_color,
        )?;
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => write_colored(writer, &with_newline('-', s), ThemeEntry::DiffRemoved, theme_map, supports_color)?,
                DiffLine::Insert(s) => write_colored(writer, &with_newline('+', s), ThemeEntry::DiffAdded, theme_map, supports_color)?,
                DiffLine::Context(s) => write!(writer, "{}", with_newline(' ', s))?,
            }
        }
    }
    Ok(())
}

fn with_newline(prefix: char, line: &str) -> String {
    if line.ends_with('\n') {
        format!("{prefix}{line}")
    } else {
        format!("{prefix}{line}\n\\ No newline at end of file\n")
    }
}
