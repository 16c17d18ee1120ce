// deglyph/src/logger.rs
//! Logger setup for the deglyph CLI.
//!
//! Logs go to stderr through `env_logger`, so stdout stays reserved for the
//! per-file report, diffs and JSON.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// The crates whose level `--debug` raises.
const WORKSPACE_CRATES: [&str; 2] = ["deglyph", "deglyph_core"];

/// Initializes the global logger.
///
/// `None` defers to `RUST_LOG` (defaulting to `warn`). `Some(level)` pins the
/// workspace crates to `level`; `Some(LevelFilter::Off)` silences everything.
/// Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);

    match level {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            for krate in WORKSPACE_CRATES {
                builder.filter_module(krate, level);
            }
        }
        None => {}
    }

    let _ = builder.try_init();
}

/// Maps the CLI flags to a logger level; `--quiet` wins over `--debug`.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
