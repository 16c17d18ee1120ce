//! Themed one-line messages for the console.
//!
//! Every function takes the destination writer and whether that stream
//! supports color, so callers decide between stdout, stderr or a buffer.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `msg` on its own line, colored per `entry` when `supports_color`.
pub fn print_styled_line<W: Write + ?Sized>(
    writer: &mut W,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    match color_for(entry, theme).filter(|_| supports_color) {
        Some(color) => writeln!(writer, "{}", msg.color(color)),
        None => writeln!(writer, "{}", msg),
    }
}

pub fn print_header<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled_line(writer, msg, ThemeEntry::Header, theme, supports_color)
}

pub fn print_info_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled_line(writer, msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled_line(writer, msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled_line(writer, &format!("Warning: {msg}"), ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write + ?Sized>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled_line(writer, &format!("Error: {msg}"), ThemeEntry::Error, theme, supports_color)
}
