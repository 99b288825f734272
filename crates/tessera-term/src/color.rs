// SPDX-License-Identifier: MIT
//
// Color: 24-bit RGB values and the blend math the compositor runs on.
//
// Every cell carries a foreground and a background `Rgb`. Layers never store
// alpha in the color itself: translucency lives in the attribute's transform
// values, and the compositor resolves it at overlay time with two pure
// functions:
//
//   darken(color, f)          channel × f, f ∈ [0, 1]
//   transition(from, to, p)   from + round((to − from) × p), clamped
//
// Both are integer-exact per channel so composited frames are reproducible
// bit for bit across platforms.
//
// Single-letter channel names (r, g, b) are the usual convention.
#![allow(clippy::many_single_char_names)]

use std::fmt;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A 24-bit color with 8 bits per channel.
///
/// # Examples
///
/// ```
/// use tessera_term::color::Rgb;
///
/// let teal = Rgb::new(0, 128, 128);
/// assert_eq!(teal.to_packed(), 0x00_80_80);
/// assert_eq!(Rgb::from_packed(0x00_80_80), teal);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    #[inline]
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    #[inline]
    #[must_use]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// The `(r, g, b)` components.
    #[inline]
    #[must_use]
    pub const fn components(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

/// The 16-color ANSI palette (xterm defaults).
///
/// Index 0 is black, 7 is silver (the classic button face), 15 is white.
pub const ANSI16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // 0: Black
    Rgb::new(128, 0, 0),     // 1: Maroon
    Rgb::new(0, 128, 0),     // 2: Green
    Rgb::new(128, 128, 0),   // 3: Olive
    Rgb::new(0, 0, 128),     // 4: Navy
    Rgb::new(128, 0, 128),   // 5: Purple
    Rgb::new(0, 128, 128),   // 6: Teal
    Rgb::new(192, 192, 192), // 7: Silver
    Rgb::new(128, 128, 128), // 8: Grey
    Rgb::new(255, 0, 0),     // 9: Red
    Rgb::new(0, 255, 0),     // 10: Lime
    Rgb::new(255, 255, 0),   // 11: Yellow
    Rgb::new(0, 0, 255),     // 12: Blue
    Rgb::new(255, 0, 255),   // 13: Fuchsia
    Rgb::new(0, 255, 255),   // 14: Aqua
    Rgb::new(255, 255, 255), // 15: White
];

/// Look up a color in the 16-color palette.
///
/// # Panics
///
/// Panics if `index` is greater than 15.
#[must_use]
pub fn ansi(index: usize) -> Rgb {
    assert!(
        index < ANSI16.len(),
        "color index {index} is outside the 16-color palette (0..=15)"
    );
    ANSI16[index]
}

// ─── Blend Math ──────────────────────────────────────────────────────────────

/// Scale every channel by `factor`, truncating toward zero.
///
/// # Panics
///
/// Panics if `factor` is outside `[0, 1]` (or NaN).
///
/// # Examples
///
/// ```
/// use tessera_term::color::{darken, Rgb};
///
/// assert_eq!(darken(Rgb::new(200, 100, 51), 0.5), Rgb::new(100, 50, 25));
/// ```
#[must_use]
// factor ∈ [0, 1] keeps every product inside 0..=255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn darken(color: Rgb, factor: f32) -> Rgb {
    assert!(
        (0.0..=1.0).contains(&factor),
        "darken factor {factor} is outside the range 0.0..=1.0"
    );
    let scale = |c: u8| (f32::from(c) * factor) as u8;
    Rgb::new(scale(color.r), scale(color.g), scale(color.b))
}

/// Move `from` toward `to` by `percent` of the distance, per channel.
///
/// `percent` may over- or under-shoot `[0, 1]`; the result is always
/// clamped to `0..=255`.
///
/// # Examples
///
/// ```
/// use tessera_term::color::{transition, Rgb};
///
/// let a = Rgb::new(0, 0, 0);
/// let b = Rgb::new(255, 100, 10);
/// assert_eq!(transition(a, b, 0.0), a);
/// assert_eq!(transition(a, b, 1.0), b);
/// assert_eq!(transition(a, b, 0.5), Rgb::new(128, 50, 5));
/// ```
#[must_use]
pub fn transition(from: Rgb, to: Rgb, percent: f32) -> Rgb {
    Rgb::new(
        step_channel(from.r, to.r, percent),
        step_channel(from.g, to.g, percent),
        step_channel(from.b, to.b, percent),
    )
}

// Clamped into u8 range before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_channel(from: u8, to: u8, percent: f32) -> u8 {
    let delta = ((f32::from(to) - f32::from(from)) * percent).round();
    (f32::from(from) + delta).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
