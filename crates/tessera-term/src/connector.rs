// SPDX-License-Identifier: MIT
//
// Connector merging for box-drawing glyphs.
//
// When a line is drawn across an existing line the crossing cell should
// become the glyph that connects both: a horizontal run over a vertical one
// turns into ┼, a frame corner meeting a divider turns into ├, and so on.
//
// Each connector glyph is described by which of its four sides reach the
// cell edge. Merging ORs the sides of the glyph being drawn with the sides of
// the glyph already present and looks up the glyph with exactly that set.
// Glyphs come from the active `TuiStyle`, so custom line sets (double lines,
// ASCII art) merge the same way.

use crate::style::TuiStyle;

bitflags::bitflags! {
    /// Which sides of a cell a connector glyph touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

/// The eleven line-drawing connector shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    Horizontal,
    Vertical,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    /// ├
    RightT,
    /// ┤
    LeftT,
    /// ┴
    UpT,
    /// ┬
    DownT,
    Cross,
}

impl Connector {
    pub const ALL: [Self; 11] = [
        Self::Horizontal,
        Self::Vertical,
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
        Self::RightT,
        Self::LeftT,
        Self::UpT,
        Self::DownT,
        Self::Cross,
    ];

    /// The sides this shape connects.
    #[must_use]
    pub const fn sides(self) -> Sides {
        match self {
            Self::Horizontal => Sides::LEFT.union(Sides::RIGHT),
            Self::Vertical => Sides::TOP.union(Sides::BOTTOM),
            Self::UpperLeft => Sides::BOTTOM.union(Sides::RIGHT),
            Self::UpperRight => Sides::BOTTOM.union(Sides::LEFT),
            Self::LowerLeft => Sides::TOP.union(Sides::RIGHT),
            Self::LowerRight => Sides::TOP.union(Sides::LEFT),
            Self::RightT => Sides::TOP.union(Sides::BOTTOM).union(Sides::RIGHT),
            Self::LeftT => Sides::TOP.union(Sides::BOTTOM).union(Sides::LEFT),
            Self::UpT => Sides::TOP.union(Sides::LEFT).union(Sides::RIGHT),
            Self::DownT => Sides::BOTTOM.union(Sides::LEFT).union(Sides::RIGHT),
            Self::Cross => Sides::all(),
        }
    }

    /// The shape with exactly `sides`, if one exists.
    #[must_use]
    pub fn from_sides(sides: Sides) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.sides() == sides)
    }

    /// The shape `ch` draws under `style`.
    #[must_use]
    pub fn from_glyph(ch: char, style: &TuiStyle) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.glyph(style) == ch)
    }

    /// This shape's glyph under `style`.
    #[must_use]
    pub const fn glyph(self, style: &TuiStyle) -> char {
        match self {
            Self::Horizontal => style.horizontal,
            Self::Vertical => style.vertical,
            Self::UpperLeft => style.upper_left,
            Self::UpperRight => style.upper_right,
            Self::LowerLeft => style.lower_left,
            Self::LowerRight => style.lower_right,
            Self::RightT => style.right_t,
            Self::LeftT => style.left_t,
            Self::UpT => style.up_t,
            Self::DownT => style.down_t,
            Self::Cross => style.cross,
        }
    }
}

/// The glyph to draw when `source` is written over `target`.
///
/// Returns `source` unchanged unless both are connector glyphs of `style`.
///
/// ```
/// use tessera_term::connector::merge;
/// use tessera_term::style::TuiStyle;
///
/// let style = TuiStyle::default();
/// assert_eq!(merge('─', '│', &style), '┼');
/// assert_eq!(merge('┌', '├', &style), '├');
/// assert_eq!(merge('─', 'x', &style), '─');
/// ```
#[must_use]
pub fn merge(source: char, target: char, style: &TuiStyle) -> char {
    let (Some(src), Some(dst)) = (
        Connector::from_glyph(source, style),
        Connector::from_glyph(target, style),
    ) else {
        return source;
    };
    // Any union of two or more sides is one of the eleven shapes except a
    // lone side, which two connectors can never produce.
    Connector::from_sides(src.sides() | dst.sides()).map_or(source, |c| c.glyph(style))
}
