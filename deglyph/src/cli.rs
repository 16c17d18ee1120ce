// deglyph/src/cli.rs
//! This file defines the command-line interface (CLI) for the deglyph
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Directory scanned when neither `--dir` nor `DEGLYPH_PAGES_DIR` is given.
pub const DEFAULT_PAGES_DIR: &str = "src/pages";

/// Page extension used when neither `--ext` nor `DEGLYPH_PAGE_EXT` is given.
pub const DEFAULT_PAGE_EXT: &str = "tsx";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "deglyph",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip emoji from front-end page sources",
    long_about = "deglyph removes emoji from the page source files of a front-end project. It deletes <span> wrappers whose only content is an emoji, every character in the emoji code-point ranges, and a set of mis-encoded emoji left next to string quotes. Files are rewritten in place only when something changed."
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress informational messages and logging.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the deglyph crates)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run. Defaults to `clean`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// All available commands for the `deglyph` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Removes emoji from every page file, rewriting the files that change.
    #[command(about = "Removes emoji from every page file, rewriting the files that change.")]
    Clean(CleanCommand),

    /// Reports what `clean` would remove, without touching any file.
    #[command(about = "Reports what `clean` would remove, without touching any file.")]
    Scan(ScanCommand),
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CleanCommand {
    /// Directory holding the page files (not searched recursively).
    #[arg(long = "dir", value_name = "DIR", env = "DEGLYPH_PAGES_DIR", default_value = DEFAULT_PAGES_DIR, help = "Directory holding the page files (not searched recursively).")]
    pub dir: PathBuf,

    /// Extension of the page files, without the leading dot.
    #[arg(long = "ext", value_name = "EXT", env = "DEGLYPH_PAGE_EXT", default_value = DEFAULT_PAGE_EXT, help = "Extension of the page files, without the leading dot.")]
    pub ext: String,

    /// Report the files that would change without writing them.
    #[arg(long = "dry-run", short = 'n', help = "Report the files that would change without writing them.")]
    pub dry_run: bool,

    /// Show a unified diff for every file that changes.
    #[arg(long, short = 'D', help = "Show a unified diff for every file that changes.")]
    pub diff: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScanCommand {
    /// Directory holding the page files (not searched recursively).
    #[arg(long = "dir", value_name = "DIR", env = "DEGLYPH_PAGES_DIR", default_value = DEFAULT_PAGES_DIR, help = "Directory holding the page files (not searched recursively).")]
    pub dir: PathBuf,

    /// Extension of the page files, without the leading dot.
    #[arg(long = "ext", value_name = "EXT", env = "DEGLYPH_PAGE_EXT", default_value = DEFAULT_PAGE_EXT, help = "Extension of the page files, without the leading dot.")]
    pub ext: String,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json", help = "Print the scan report as JSON to stdout.")]
    pub json: bool,
}

impl Cli {
    /// Resolves the command to run, falling back to `clean` with its defaults.
    pub fn command_or_default(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Clean(CleanCommand::parse_from(["clean"])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clean_flags_parse() {
        let cli = Cli::parse_from(["deglyph", "clean", "--dir", "pages", "--ext", "jsx", "--dry-run", "--diff"]);
        match cli.command {
            Some(Commands::Clean(cmd)) => {
                assert_eq!(cmd.dir, PathBuf::from("pages"));
                assert_eq!(cmd.ext, "jsx");
                assert!(cmd.dry_run);
                assert!(cmd.diff);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["deglyph", "scan", "--json", "--quiet"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Scan(ScanCommand { json: true, .. }))));
    }
}
