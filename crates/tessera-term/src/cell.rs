// SPDX-License-Identifier: MIT
//
// Cell: the atomic unit of a layer.
//
// Every character position in a layer is a Cell: a character, the Attribute
// that styles it, and the alias of the layer that last wrote it. The
// compositor copies cells between layers; widgets tag cells through the
// attribute so the mouse can be resolved back to "which menu item is this".
//
// Transparency model:
//
//   A cell whose character is NUL ('\0') draws nothing. When such a cell is
//   composited its transform values still apply: anything below is pulled
//   toward black by (1 − transform). That is how drop shadows work. Cells
//   with a real character can also carry transforms < 1, in which case their
//   colors blend toward whatever was underneath.
//
// Attributes own a String (the cell alias), so Cell is Clone, not Copy.
// Copies between layers are explicit deep copies.

use crate::color::{Rgb, ansi};

// ─── Style Flags ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text style flags.
    ///
    /// ```
    /// use tessera_term::cell::Style;
    ///
    /// let s = Style::BOLD | Style::UNDERLINE;
    /// assert!(s.contains(Style::BOLD));
    /// assert!(!s.contains(Style::BLINK));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Style: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 4.
        const UNDERLINE = 1 << 1;
        /// SGR 7, swaps foreground and background.
        const REVERSE   = 1 << 2;
        /// SGR 5.
        const BLINK     = 1 << 3;
        /// SGR 3.
        const ITALIC    = 1 << 4;
    }
}

// ─── Cell Identity ───────────────────────────────────────────────────────────

/// Cell id meaning "not tagged". Hit tests return this for plain cells.
pub const NULL_CELL_ID: i32 = -1;

/// The character that marks a transparent cell.
pub const NULL_CHAR: char = '\0';

/// What kind of interactive element a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellType {
    /// Plain content.
    #[default]
    None,
    /// Part of a push button. The cell alias names the button.
    Button,
    /// Part of a text input field. The cell id is the column in the field.
    TextInput,
}

// ─── Attribute ───────────────────────────────────────────────────────────────

/// Styling and identity for one cell.
///
/// Transform values are blend factors: `1.0` is fully opaque, lower values
/// let the layer below show through (or darken it, for transparent cells).
/// Values above 1 are allowed and mean "overshoot".
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: Style,
    pub fg_transform: f32,
    pub bg_transform: f32,
    /// Hit-test tag, [`NULL_CELL_ID`] when untagged.
    pub cell_id: i32,
    pub cell_type: CellType,
    /// Widget owner tag (e.g. a button alias). Empty when untagged.
    pub cell_alias: String,
}

impl Default for Attribute {
    /// White on black, no style, fully opaque, untagged.
    fn default() -> Self {
        Self {
            fg: ansi(15),
            bg: ansi(0),
            style: Style::empty(),
            fg_transform: 1.0,
            bg_transform: 1.0,
            cell_id: NULL_CELL_ID,
            cell_type: CellType::None,
            cell_alias: String::new(),
        }
    }
}

impl Attribute {
    /// A default attribute with the given colors.
    #[must_use]
    pub fn with_colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            ..Self::default()
        }
    }

    /// An independent copy of `existing`.
    ///
    /// Equivalent to `existing.clone()`; spelled out so call sites that
    /// derive one attribute from another read as such.
    #[must_use]
    pub fn clone_from_existing(existing: &Self) -> Self {
        existing.clone()
    }

    /// Whether both transform values are exactly 1.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)] // 1.0 is an exact sentinel, never computed.
    pub fn is_opaque(&self) -> bool {
        self.fg_transform == 1.0 && self.bg_transform == 1.0
    }

    /// Set both transform values.
    #[inline]
    pub const fn set_transform(&mut self, value: f32) {
        self.fg_transform = value;
        self.bg_transform = value;
    }

    /// Builder form of [`set_transform`](Self::set_transform).
    #[inline]
    #[must_use]
    pub const fn with_transform(mut self, value: f32) -> Self {
        self.set_transform(value);
        self
    }

    /// Builder: tag with a cell id.
    #[inline]
    #[must_use]
    pub const fn with_cell_id(mut self, id: i32) -> Self {
        self.cell_id = id;
        self
    }

    /// Builder: add style flags.
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style |= style;
        self
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// One character position in a layer.
#[derive(Clone, PartialEq)]
pub struct Cell {
    /// Character to display. [`NULL_CHAR`] is transparent.
    pub ch: char,
    pub attr: Attribute,
    /// Alias of the layer that last wrote this cell.
    pub layer_alias: String,
}

impl Default for Cell {
    /// A transparent cell with a default attribute and no owner.
    fn default() -> Self {
        Self {
            ch: NULL_CHAR,
            attr: Attribute::default(),
            layer_alias: String::new(),
        }
    }
}

impl Cell {
    /// A cell holding `ch` in `attr`, owned by `layer_alias`.
    #[must_use]
    pub fn new(ch: char, attr: Attribute, layer_alias: impl Into<String>) -> Self {
        Self {
            ch,
            attr,
            layer_alias: layer_alias.into(),
        }
    }

    /// Whether this cell draws nothing.
    #[inline]
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.ch == NULL_CHAR
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_transparent() {
            write!(f, "Cell(∅")?;
        } else {
            write!(f, "Cell({:?}", self.ch)?;
        }
        write!(f, " {:?}/{:?}", self.attr.fg, self.attr.bg)?;
        if self.attr.cell_id != NULL_CELL_ID {
            write!(f, " id={}", self.attr.cell_id)?;
        }
        if !self.layer_alias.is_empty() {
            write!(f, " @{}", self.layer_alias)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
