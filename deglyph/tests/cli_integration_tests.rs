// deglyph/tests/cli_integration_tests.rs
//! Command-line integration tests for the `deglyph` binary.
//!
//! Each test builds a throwaway project in a temporary directory, runs the
//! binary inside it with `assert_cmd` and checks both the console report and
//! the files left on disk. Console output is stripped of ANSI escapes before
//! comparison.

use anyhow::Result;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use assert_cmd::Command;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn strip_ansi(s: &[u8]) -> String {
    let cleaned = strip_ansi_escapes_fn(s);
    String::from_utf8_lossy(&cleaned).to_string()
}

/// Creates a project root with an empty `src/pages` directory.
fn project() -> Result<(TempDir, PathBuf)> {
    let root = tempfile::tempdir()?;
    let pages = root.path().join("src").join("pages");
    fs::create_dir_all(&pages)?;
    Ok((root, pages))
}

fn deglyph(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deglyph").unwrap();
    cmd.current_dir(cwd)
        .env_remove("DEGLYPH_PAGES_DIR")
        .env_remove("DEGLYPH_PAGE_EXT")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn default_command_cleans_src_pages() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Home.tsx"), "<h1>Welcome \u{1F44B}</h1>\n<span className=\"i\">\u{1F525}</span>\n")?;
    fs::write(pages.join("About.tsx"), "<p>About us</p>\n")?;
    let about_mtime = fs::metadata(pages.join("About.tsx"))?.modified()?;

    let output = deglyph(root.path()).assert().success().get_output().stdout.clone();
    let stdout = strip_ansi(&output);

    assert!(stdout.contains("Cleaned: Home.tsx"));
    assert!(!stdout.contains("Cleaned: About.tsx"));
    assert!(stdout.contains("Done! Modified 1 files."));
    assert!(stdout.contains("hard refresh"));
    assert_eq!(fs::read_to_string(pages.join("Home.tsx"))?, "<h1>Welcome </h1>\n\n");
    assert_eq!(fs::read_to_string(pages.join("About.tsx"))?, "<p>About us</p>\n");
    assert_eq!(fs::metadata(pages.join("About.tsx"))?.modified()?, about_mtime);
    Ok(())
}

#[test]
fn invalid_utf8_file_is_skipped_and_run_succeeds() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("A.tsx"), "\u{2705} done")?;
    fs::write(pages.join("B.tsx"), [0x3cu8, 0xff, 0xfe, 0x3e])?;

    deglyph(root.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done! Modified 1 files."))
        .stderr(predicate::str::contains("Error processing"));

    assert_eq!(fs::read_to_string(pages.join("A.tsx"))?, " done");
    assert_eq!(fs::read(pages.join("B.tsx"))?, vec![0x3cu8, 0xff, 0xfe, 0x3e]);
    Ok(())
}

#[test]
fn dry_run_writes_nothing() -> Result<()> {
    let (root, pages) = project()?;
    let original = "<span>\u{1F680}</span> Launch";
    fs::write(pages.join("Launch.tsx"), original)?;

    deglyph(root.path())
        .args(["clean", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would clean: Launch.tsx"))
        .stdout(predicate::str::contains("Dry run complete. 1 files would be modified."));

    assert_eq!(fs::read_to_string(pages.join("Launch.tsx"))?, original);
    Ok(())
}

#[test]
fn diff_flag_prints_unified_diff() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Diff.tsx"), "keep\n<b>Hot \u{1F525}</b>\n")?;

    let output = deglyph(root.path()).args(["clean", "--diff"]).assert().success().get_output().stdout.clone();
    let stdout = strip_ansi(&output);
    assert!(stdout.contains("--- a/Diff.tsx"));
    assert!(stdout.contains("-<b>Hot \u{1F525}</b>"));
    assert!(stdout.contains("+<b>Hot </b>"));
    Ok(())
}

#[test]
fn missing_directory_fails() -> Result<()> {
    let root = tempfile::tempdir()?;
    deglyph(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read page directory"));
    Ok(())
}

#[test]
fn other_extensions_and_subdirectories_are_ignored() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Page.jsx"), "\u{1F600}")?;
    fs::create_dir(pages.join("nested"))?;
    fs::write(pages.join("nested").join("Inner.tsx"), "\u{1F600}")?;

    deglyph(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Done! Modified 0 files."));

    assert_eq!(fs::read_to_string(pages.join("Page.jsx"))?, "\u{1F600}");
    assert_eq!(fs::read_to_string(pages.join("nested").join("Inner.tsx"))?, "\u{1F600}");
    Ok(())
}

#[test]
fn dir_and_ext_come_from_flags_or_environment() -> Result<()> {
    let root = tempfile::tempdir()?;
    let custom = root.path().join("views");
    fs::create_dir(&custom)?;
    fs::write(custom.join("Index.jsx"), "Hi \u{1F44B}")?;

    deglyph(root.path())
        .env("DEGLYPH_PAGES_DIR", "views")
        .args(["clean", "--ext", ".jsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned: Index.jsx"));

    assert_eq!(fs::read_to_string(custom.join("Index.jsx"))?, "Hi ");
    Ok(())
}

#[test]
fn quiet_prints_only_the_final_count() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Q.tsx"), "\u{2B50}")?;

    let output = deglyph(root.path()).arg("--quiet").assert().success().get_output().stdout.clone();
    let stdout = strip_ansi(&output);
    assert!(!stdout.contains("Cleaned: Q.tsx"));
    assert!(!stdout.contains("hard refresh"));
    assert!(stdout.contains("Done! Modified 1 files."));
    Ok(())
}

#[test]
fn second_run_modifies_nothing() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Twice.tsx"), "'\u{011F}\u{0178}\u{201D}\u{00A5} Hot' <span>\u{1F525}</span> \u{1F1FA}\u{1F1F8}")?;

    deglyph(root.path()).assert().success().stdout(predicate::str::contains("Done! Modified 1 files."));
    let first = fs::read_to_string(pages.join("Twice.tsx"))?;
    deglyph(root.path()).assert().success().stdout(predicate::str::contains("Done! Modified 0 files."));
    assert_eq!(fs::read_to_string(pages.join("Twice.tsx"))?, first);
    Ok(())
}

#[test]
fn scan_json_is_valid_and_read_only() -> Result<()> {
    let (root, pages) = project()?;
    let original = "<span>\u{1F4BC}</span> Idea \u{1F600}";
    fs::write(pages.join("Idea.tsx"), original)?;

    let output = deglyph(root.path()).args(["scan", "--json"]).assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(report["extension"], "tsx");
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["total_removals"], 2);
    assert_eq!(report["files"][0]["rules"][0]["pass"], "span");
    assert_eq!(fs::read_to_string(pages.join("Idea.tsx"))?, original);
    Ok(())
}

#[test]
fn scan_table_names_rules() -> Result<()> {
    let (root, pages) = project()?;
    fs::write(pages.join("Table.tsx"), "\u{1F600}\u{1F600}")?;

    let output = deglyph(root.path()).arg("scan").assert().success().get_output().stdout.clone();
    let stdout = strip_ansi(&output);
    assert!(stdout.contains("Table.tsx:"));
    assert!(stdout.contains("emoticons"));
    assert!(stdout.contains("Scanned 1 files: 1 would be modified, 2 removals in total."));
    Ok(())
}
