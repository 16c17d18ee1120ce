// deglyph/src/main.rs
//! deglyph entry point.
//!
//! Parses the command line, sets up logging and the theme, builds the emoji
//! engine and dispatches to `clean` or `scan`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::info;

use deglyph::cli::{Cli, Commands};
use deglyph::commands::clean::{run_clean, CleanOptions};
use deglyph::commands::scan::{run_scan, ScanOptions};
use deglyph::logger;
use deglyph::ui::theme::build_theme_map;
use deglyph_core::EmojiEngine;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    info!("deglyph started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme_map = build_theme_map(cli.theme.as_ref()).context("Theme error")?;
    let engine = EmojiEngine::with_default_rules().context("Failed to compile the built-in emoji rules")?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut out = stdout.lock();
    let quiet = cli.quiet;

    match cli.command_or_default() {
        Commands::Clean(cmd) => {
            let opts = CleanOptions {
                dir: cmd.dir,
                extension: cmd.ext,
                dry_run: cmd.dry_run,
                diff: cmd.diff,
                quiet,
            };
            run_clean(&engine, &opts, &mut out, &theme_map, supports_color)?;
        }
        Commands::Scan(cmd) => {
            let opts = ScanOptions { dir: cmd.dir, extension: cmd.ext, json: cmd.json };
            run_scan(&engine, &opts, &mut out, &theme_map, supports_color)?;
        }
    }

    out.flush()?;
    Ok(())
}
