//! Table rendering for the `scan` command.

use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;

use deglyph_core::{describe_code_points, RemovalSummaryItem};

use crate::ui::output_format;
use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Maps a theme color onto the closest `comfy_table` color.
fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        AnsiColors::BrightWhite => Color::White,
        _ => Color::Reset,
    }
}

fn themed_cell(text: String, entry: ThemeEntry, theme_map: &ThemeMap, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    match color_for(entry, theme_map).filter(|_| supports_color) {
        Some(color) => cell.fg(table_color(color)),
        None => cell,
    }
}

/// Builds the per-file rule table.
pub fn build_rule_table(summary: &[RemovalSummaryItem], theme_map: &ThemeMap, supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Pass", "Occurrences", "Samples"]);

    for item in summary {
        let samples = item
            .samples
            .iter()
            .map(|s| describe_code_points(s))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            themed_cell(item.rule_name.clone(), ThemeEntry::SummaryRuleName, theme_map, supports_color),
            Cell::new(item.pass.to_string()),
            themed_cell(item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme_map, supports_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(samples),
        ]);
    }
    if !supports_color {
        table.force_no_tty();
    }
    table
}

/// Prints the heading and rule table for one file.
pub fn print_file_summary<W: Write + ?Sized>(
    writer: &mut W,
    file_label: &str,
    summary: &[RemovalSummaryItem],
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    output_format::print_header(writer, &format!("{file_label}:"), theme_map, supports_color)?;
    writeln!(writer, "{}", build_rule_table(summary, theme_map, supports_color))
}
