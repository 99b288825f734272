// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. They hold
// no state and make no decisions about when to emit; `AnsiBackend` does
// that. Colors are always 24-bit.
//
// Cursor positions are 0-indexed here and converted to the 1-indexed form
// the terminal expects.
use std::io::{self, Write};

use crate::cell::Style;
use crate::color::Rgb;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` (CUP).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset every SGR attribute, colors included (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground color (SGR 38;2).
#[inline]
pub fn fg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let (r, g, b) = color.components();
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set the background color (SGR 48;2).
#[inline]
pub fn bg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let (r, g, b) = color.components();
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

// ─── Style Flags ─────────────────────────────────────────────────────────────

/// Emit the SGR codes for `flags` as one sequence, e.g. `\x1b[1;4m`.
///
/// Writes nothing for an empty style.
pub fn style(w: &mut impl Write, flags: Style) -> io::Result<()> {
    const CODES: [(Style, &str); 5] = [
        (Style::BOLD, "1"),
        (Style::ITALIC, "3"),
        (Style::UNDERLINE, "4"),
        (Style::BLINK, "5"),
        (Style::REVERSE, "7"),
    ];
    if flags.is_empty() {
        return Ok(());
    }
    let codes: Vec<&str> = CODES
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, code)| *code)
        .collect();
    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
