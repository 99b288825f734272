// SPDX-License-Identifier: MIT
//
// Text width and padding helpers.
//
// Layers advance two columns for wide glyphs (CJK, fullwidth forms, most
// emoji), so every helper that pads or measures text has to agree on what
// "wide" means. `unicode-width` is the single source of truth.

use unicode_width::UnicodeWidthChar;

/// Horizontal placement of text inside a padded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

/// Display width of a character in terminal columns (0, 1 or 2).
///
/// ```
/// use tessera_term::text::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Whether a character occupies two columns.
#[inline]
#[must_use]
pub fn is_wide(ch: char) -> bool {
    char_width(ch) == 2
}

/// Display width of a string in terminal columns.
///
/// ```
/// use tessera_term::text::string_width;
///
/// assert_eq!(string_width("a中b"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// How many wide characters `s` contains.
#[must_use]
pub fn wide_count(s: &str) -> usize {
    s.chars().filter(|&c| is_wide(c)).count()
}

/// `fill` repeated `count` times.
#[must_use]
pub fn filled(count: usize, fill: &str) -> String {
    fill.repeat(count)
}

/// Up to `len` characters of `s` starting at character `start`.
///
/// Out-of-range requests shrink rather than panic.
#[must_use]
pub fn substring(s: &str, start: usize, len: usize) -> String {
    s.chars().skip(start).take(len).collect()
}

/// Pad `text` to `width` characters.
///
/// Padding shrinks by one for every wide glyph, since each of those already
/// consumes an extra column when printed. Centered text gets half the
/// padding on each side plus one trailing space when the halves come up
/// short. Text longer than `width` is returned unchanged; printing clips it.
///
/// ```
/// use tessera_term::text::{align, Alignment};
///
/// assert_eq!(align("ab", 5, Alignment::Left), "ab   ");
/// assert_eq!(align("ab", 5, Alignment::Right), "   ab");
/// assert_eq!(align("ab", 5, Alignment::Center), " ab  ");
/// ```
#[must_use]
pub fn align(text: &str, width: usize, alignment: Alignment) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len).saturating_sub(wide_count(text));
    match alignment {
        Alignment::Left => format!("{text}{}", filled(padding, " ")),
        Alignment::Right => format!("{}{text}", filled(padding, " ")),
        Alignment::Center => {
            let half = filled(padding / 2, " ");
            let mut out = format!("{half}{text}{half}");
            if out.chars().count() < width {
                out.push(' ');
            }
            out
        }
    }
}
