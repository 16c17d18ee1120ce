//! The `clean` command: sanitize every page file and rewrite the ones that change.

use anyhow::Result;
use log::{debug, error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use deglyph_core::{total_removals, SanitizationEngine};
use is_terminal::IsTerminal;

use crate::ui::diff_viewer;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;
use crate::utils::page_files::{list_page_files, normalize_extension, read_page, write_page_atomic};

/// Options for a `clean` run.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub dir: PathBuf,
    pub extension: String,
    pub dry_run: bool,
    pub diff: bool,
    pub quiet: bool,
}

/// What happened to a single page file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file changed (or would change, on a dry run).
    Cleaned { removals: usize },
    Unchanged,
    /// Reading, decoding or writing failed; the file was left as it was.
    Failed(String),
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub scanned: usize,
    pub modified: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl CleanReport {
    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Sanitizes one file, writing it back when it changed and `dry_run` is off.
///
/// Errors never escape: they come back as `FileOutcome::Failed`.
pub fn clean_file<W: Write + ?Sized>(
    engine: &dyn SanitizationEngine,
    path: &Path,
    opts: &CleanOptions,
    out: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> FileOutcome {
    let mut attempt = || -> Result<FileOutcome> {
        let original = read_page(path)?;
        let outcome = engine.sanitize(&original);
        if !outcome.changed {
            debug!("{} is already clean.", path.display());
            return Ok(FileOutcome::Unchanged);
        }

        if opts.diff {
            diff_viewer::print_diff(&display_name(path), &original, &outcome.text, out, theme_map, supports_color)?;
        }
        if !opts.dry_run {
            write_page_atomic(path, &outcome.text)?;
        }
        Ok(FileOutcome::Cleaned { removals: total_removals(&outcome.summary) })
    };

    match attempt() {
        Ok(outcome) => outcome,
        Err(e) => FileOutcome::Failed(format!("{e:#}")),
    }
}

/// The main operation runner for `clean`.
///
/// Only a failure to list the page directory is returned as an error; per-file
/// failures are reported and the run carries on.
pub fn run_clean<W: Write + ?Sized>(
    engine: &dyn SanitizationEngine,
    opts: &CleanOptions,
    out: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> Result<CleanReport> {
    let extension = normalize_extension(&opts.extension);
    info!("Starting clean in {} (.{} files, dry run: {}).", opts.dir.display(), extension, opts.dry_run);

    let files = list_page_files(&opts.dir, extension)?;

    if !opts.quiet {
        output_format::print_header(
            out,
            &format!("Removing ALL emojis from .{} files in {}...", extension, opts.dir.display()),
            theme_map,
            supports_color,
        )?;
    }

    if files.is_empty() && !opts.quiet {
        output_format::print_warn_message(
            out,
            &format!("No .{} files found in {}.", extension, opts.dir.display()),
            theme_map,
            supports_color,
        )?;
    }

    let mut report = CleanReport { scanned: files.len(), ..Default::default() };

    for path in files {
        match clean_file(engine, &path, opts, out, theme_map, supports_color) {
            FileOutcome::Cleaned { removals } => {
                debug!("{}: {} removals.", path.display(), removals);
                if !opts.quiet {
                    let verb = if opts.dry_run { "Would clean" } else { "Cleaned" };
                    output_format::print_success_message(
                        out,
                        &format!("{verb}: {}", display_name(&path)),
                        theme_map,
                        supports_color,
                    )?;
                }
                report.modified.push(path);
            }
            FileOutcome::Unchanged => {}
            FileOutcome::Failed(reason) => {
                error!("Error processing {}: {}", path.display(), reason);
                error_msg(format!("Error processing {}: {}", path.display(), reason), theme_map);
                report.failed.push((path, reason));
            }
        }
    }

    let count = report.modified_count();
    if opts.dry_run {
        writeln!(out)?;
        output_format::print_success_message(
            out,
            &format!("Dry run complete. {count} files would be modified."),
            theme_map,
            supports_color,
        )?;
    } else {
        writeln!(out)?;
        output_format::print_success_message(out, &format!("Done! Modified {count} files."), theme_map, supports_color)?;
        if !opts.quiet {
            output_format::print_info_message(
                out,
                "Press Ctrl+Shift+R in your browser to hard refresh and see changes!",
                theme_map,
                supports_color,
            )?;
        }
    }

    info!(
        "Clean finished: {} scanned, {} modified, {} failed.",
        report.scanned,
        count,
        report.failed.len()
    );
    Ok(report)
}
