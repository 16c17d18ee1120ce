//! The `scan` command: report what `clean` would remove, read-only.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use deglyph_core::{total_removals, RemovalSummaryItem, SanitizationEngine};

use crate::commands::clean::error_msg;
use crate::ui::output_format;
use crate::ui::scan_summary;
use crate::ui::theme::ThemeMap;
use crate::utils::page_files::{list_page_files, normalize_extension, read_page};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub dir: PathBuf,
    pub extension: String,
    pub json: bool,
}

/// Findings for one file that has something to remove.
#[derive(Debug, Clone, Serialize)]
pub struct FileScan {
    pub path: PathBuf,
    pub removals: usize,
    pub rules: Vec<RemovalSummaryItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: String,
}

/// The full scan result, also the JSON document printed by `scan --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub directory: PathBuf,
    pub extension: String,
    pub generated_at: String,
    pub files_scanned: usize,
    pub files: Vec<FileScan>,
    pub skipped: Vec<SkippedFile>,
    pub total_removals: usize,
}

/// Analyzes every page file without writing anything.
pub fn scan_directory(engine: &dyn SanitizationEngine, opts: &ScanOptions) -> Result<ScanReport> {
    let extension = normalize_extension(&opts.extension).to_string();
    let paths = list_page_files(&opts.dir, &extension)?;

    let mut report = ScanReport {
        directory: opts.dir.clone(),
        extension,
        generated_at: Utc::now().to_rfc3339(),
        files_scanned: paths.len(),
        files: Vec::new(),
        skipped: Vec::new(),
        total_removals: 0,
    };

    for path in paths {
        match read_page(&path) {
            Ok(content) => {
                let rules = engine.analyze_for_stats(&content);
                if rules.is_empty() {
                    continue;
                }
                let removals = total_removals(&rules);
                report.total_removals += removals;
                report.files.push(FileScan { path, removals, rules });
            }
            Err(e) => {
                error!("Error processing {}: {:#}", path.display(), e);
                report.skipped.push(SkippedFile { path, error: format!("{e:#}") });
            }
        }
    }

    info!(
        "Scan finished: {} scanned, {} with removals, {} skipped.",
        report.files_scanned,
        report.files.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Runs `scan` and prints either the tables or the JSON report to `out`.
pub fn run_scan<W: Write + ?Sized>(
    engine: &dyn SanitizationEngine,
    opts: &ScanOptions,
    out: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> Result<ScanReport> {
    let report = scan_directory(engine, opts)?;

    for skipped in &report.skipped {
        error_msg(format!("Error processing {}: {}", skipped.path.display(), skipped.error), theme_map);
    }

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to serialize scan report")?;
        writeln!(out)?;
        return Ok(report);
    }

    for file in &report.files {
        let label = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        scan_summary::print_file_summary(out, &label, &file.rules, theme_map, supports_color)?;
    }

    output_format::print_success_message(
        out,
        &format!(
            "Scanned {} files: {} would be modified, {} removals in total.",
            report.files_scanned,
            report.files.len(),
            report.total_removals
        ),
        theme_map,
        supports_color,
    )?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use deglyph_core::EmojiEngine;
    use std::fs;
    use tempfile::tempdir;

    #[test_log::test]
    fn scan_reports_without_writing() -> Result<()> {
        let dir = tempdir()?;
        let page = dir.path().join("Jobs.tsx");
        fs::write(&page, "<span>\u{1F4BC}</span> Jobs \u{1F680}\u{1F680}")?;
        fs::write(dir.path().join("Clean.tsx"), "nothing here")?;

        let engine = EmojiEngine::with_default_rules()?;
        let opts = ScanOptions { dir: dir.path().to_path_buf(), extension: "tsx".into(), json: false };
        let report = scan_directory(&engine, &opts)?;

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].removals, 3);
        assert_eq!(report.total_removals, 3);
        assert_eq!(fs::read_to_string(&page)?, "<span>\u{1F4BC}</span> Jobs \u{1F680}\u{1F680}");
        Ok(())
    }

    #[test]
    fn json_report_is_valid() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("A.tsx"), "\u{2728} shiny")?;
        let engine = EmojiEngine::with_default_rules()?;
        let theme = ThemeStyle::default_theme_map();
        let opts = ScanOptions { dir: dir.path().to_path_buf(), extension: "tsx".into(), json: true };
        let mut out = Vec::new();
        run_scan(&engine, &opts, &mut out, &theme, false)?;

        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(value["total_removals"], 1);
        assert_eq!(value["files"][0]["rules"][0]["rule_name"], "dingbats");
        assert_eq!(value["files"][0]["rules"][0]["pass"], "range");
        Ok(())
    }
}
