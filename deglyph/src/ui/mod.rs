// deglyph/src/ui/mod.rs
//! Console output: themes, message lines, diffs and scan tables.

pub mod diff_viewer;
pub mod output_format;
pub mod scan_summary;
pub mod theme;
