// SPDX-License-Identifier: MIT
//
// Styles: the look of drawn elements and named text styles.
//
// A `TuiStyle` bundles every glyph and color the drawing primitives and
// widgets need: box-drawing characters for frames and lines, fill patterns,
// and the color pairs for menus, inputs and buttons. Callers usually start
// from `TuiStyle::default()` and tweak a field or two.
//
// A `TextStyle` is a named color/flag combination that dialog markup such
// as `{warning}` can switch to mid-string. `TextStyles` is the registry
// those names resolve against.

use std::collections::HashMap;

use crate::cell::{Attribute, Style};
use crate::color::{Rgb, ansi};
use crate::text::Alignment;

// ─── TuiStyle ────────────────────────────────────────────────────────────────

/// Glyphs and colors for frames, windows, menus, inputs and buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiStyle {
    pub upper_left: char,
    pub upper_right: char,
    pub lower_left: char,
    pub lower_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// ┤, joins a vertical line from the left.
    pub left_t: char,
    /// ├, joins a vertical line from the right.
    pub right_t: char,
    /// ┴
    pub up_t: char,
    /// ┬
    pub down_t: char,
    pub cross: char,
    pub desktop_pattern: char,
    pub progress_bar_background: char,
    pub progress_bar_foreground: char,
    pub cursor_glyph: char,
    /// Cells are as wide as they are tall; shadows shift by one column
    /// instead of two.
    pub is_square_font: bool,
    pub window_header: bool,
    pub window_footer: bool,
    pub text_fg: Rgb,
    pub text_bg: Rgb,
    pub text_input_fg: Rgb,
    pub text_input_bg: Rgb,
    pub cursor_fg: Rgb,
    pub cursor_bg: Rgb,
    pub menu_fg: Rgb,
    pub menu_bg: Rgb,
    pub highlight_fg: Rgb,
    pub highlight_bg: Rgb,
    pub button_fg: Rgb,
    pub button_bg: Rgb,
    /// Color of the lit edges of a raised button frame.
    pub button_raised: Rgb,
    pub menu_alignment: Alignment,
}

impl Default for TuiStyle {
    fn default() -> Self {
        Self {
            upper_left: '┌',
            upper_right: '┐',
            lower_left: '└',
            lower_right: '┘',
            horizontal: '─',
            vertical: '│',
            left_t: '┤',
            right_t: '├',
            up_t: '┴',
            down_t: '┬',
            cross: '┼',
            desktop_pattern: '░',
            progress_bar_background: '░',
            progress_bar_foreground: '█',
            cursor_glyph: '█',
            is_square_font: false,
            window_header: false,
            window_footer: false,
            text_fg: Rgb::WHITE,
            text_bg: Rgb::BLACK,
            text_input_fg: Rgb::WHITE,
            text_input_bg: Rgb::BLACK,
            cursor_fg: Rgb::WHITE,
            cursor_bg: Rgb::BLACK,
            menu_fg: Rgb::WHITE,
            menu_bg: Rgb::BLACK,
            highlight_fg: Rgb::BLACK,
            highlight_bg: Rgb::WHITE,
            button_fg: Rgb::BLACK,
            button_bg: ansi(7),
            button_raised: Rgb::WHITE,
            menu_alignment: Alignment::Left,
        }
    }
}

impl TuiStyle {
    /// Text colors over a copy of `base`.
    #[must_use]
    pub fn text_attr(&self, base: &Attribute) -> Attribute {
        Self::recolor(base, self.text_fg, self.text_bg)
    }

    #[must_use]
    pub fn menu_attr(&self, base: &Attribute) -> Attribute {
        Self::recolor(base, self.menu_fg, self.menu_bg)
    }

    #[must_use]
    pub fn highlight_attr(&self, base: &Attribute) -> Attribute {
        Self::recolor(base, self.highlight_fg, self.highlight_bg)
    }

    #[must_use]
    pub fn text_input_attr(&self, base: &Attribute) -> Attribute {
        Self::recolor(base, self.text_input_fg, self.text_input_bg)
    }

    #[must_use]
    pub fn cursor_attr(&self, base: &Attribute) -> Attribute {
        Self::recolor(base, self.cursor_fg, self.cursor_bg)
    }

    fn recolor(base: &Attribute, fg: Rgb, bg: Rgb) -> Attribute {
        let mut attr = Attribute::clone_from_existing(base);
        attr.fg = fg;
        attr.bg = bg;
        attr
    }
}

// ─── TextStyle ───────────────────────────────────────────────────────────────

/// A reusable color and flag combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: Style,
    pub fg_transform: f32,
    pub bg_transform: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: Style::empty(),
            fg_transform: 1.0,
            bg_transform: 1.0,
        }
    }
}

impl TextStyle {
    #[must_use]
    pub fn with_colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            ..Self::default()
        }
    }

    /// An untagged attribute carrying this style.
    #[must_use]
    pub fn to_attribute(&self) -> Attribute {
        Attribute {
            fg: self.fg,
            bg: self.bg,
            style: self.style,
            fg_transform: self.fg_transform,
            bg_transform: self.bg_transform,
            ..Attribute::default()
        }
    }
}

/// Text styles by alias.
#[derive(Debug, Clone, Default)]
pub struct TextStyles {
    styles: HashMap<String, TextStyle>,
}

impl TextStyles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `style` under `alias`, replacing any previous one.
    pub fn add(&mut self, alias: impl Into<String>, style: TextStyle) {
        self.styles.insert(alias.into(), style);
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&TextStyle> {
        self.styles.get(alias)
    }

    pub fn remove(&mut self, alias: &str) -> Option<TextStyle> {
        self.styles.remove(alias)
    }

    /// The attribute for a registered style, if there is one.
    #[must_use]
    pub fn attribute(&self, alias: &str) -> Option<Attribute> {
        self.get(alias).map(TextStyle::to_attribute)
    }
}
