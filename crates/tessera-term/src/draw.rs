// SPDX-License-Identifier: MIT
//
// Drawing primitives: frames, windows, lines, shadows, bars, buttons.
//
// Everything here paints into a single `Layer` through `put_char` and
// `fill_area`, so clipping is inherited: shapes may hang off any edge and
// only the visible cells are touched.
//
// Line glyphs are merged with whatever connector already occupies a cell
// (see `connector::merge`). Drawing a divider across a bordered window
// therefore produces ├────┤ instead of overwriting the border.

use crate::button::Button;
use crate::cell::{Attribute, CellType, Style};
use crate::color::ansi;
use crate::connector::merge;
use crate::layer::{Layer, Rect};
use crate::style::TuiStyle;

/// Alpha used for window drop shadows.
pub const WINDOW_SHADOW_ALPHA: f32 = 0.5;

/// How a frame's edges are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStyle {
    /// All edges in the text color.
    #[default]
    Normal,
    /// Right and bottom edges in black: light comes from the top left.
    Raised,
    /// Left and top edges in black.
    Sunken,
}

/// Write `glyph` at `(x, y)`, merged with the connector already there.
fn put_connector(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, x: i32, y: i32, glyph: char) {
    let Some(existing) = layer.get(x, y).map(|c| c.ch) else {
        return;
    };
    layer.put_char(attr, x, y, merge(glyph, existing, style));
}

// ─── Frames ──────────────────────────────────────────────────────────────────

/// Draw a rectangular frame around `area` with the style's line glyphs.
///
/// Only the outline is drawn; the interior is left as it was.
pub fn frame(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, frame_style: FrameStyle, area: Rect) {
    let base = style.text_attr(attr);
    let mut shaded = base.clone();
    shaded.fg = ansi(0);

    let raised = frame_style == FrameStyle::Raised;
    let sunken = frame_style == FrameStyle::Sunken;
    let (last_col, last_row) = (area.width - 1, area.height - 1);

    for row in 0..area.height {
        for col in 0..area.width {
            let (glyph, dark) = if row == 0 {
                if col == 0 {
                    (style.upper_left, sunken)
                } else if col == last_col {
                    (style.upper_right, raised)
                } else {
                    (style.horizontal, sunken)
                }
            } else if row == last_row {
                if col == 0 {
                    (style.lower_left, sunken)
                } else if col == last_col {
                    (style.lower_right, raised)
                } else {
                    (style.horizontal, raised)
                }
            } else if col == 0 {
                (style.vertical, sunken)
            } else if col == last_col {
                (style.vertical, raised)
            } else {
                continue;
            };
            let attr = if dark { &shaded } else { &base };
            put_connector(layer, style, attr, area.x + col, area.y + row, glyph);
        }
    }
}

/// A normal frame.
pub fn border(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, area: Rect) {
    frame(layer, style, attr, FrameStyle::Normal, area);
}

/// A filled, bordered window with a drop shadow.
///
/// With `style.window_header` a divider is drawn two rows below the top;
/// with `style.window_footer` one is drawn two rows above the bottom.
pub fn window(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, area: Rect) {
    let text = style.text_attr(attr);
    let shadow_dx = if style.is_square_font { 1 } else { 2 };
    shadow(
        layer,
        &text,
        Rect::new(area.x + shadow_dx, area.y + 1, area.width, area.height),
        WINDOW_SHADOW_ALPHA,
    );
    layer.fill_area(&text, " ", area.x, area.y, area.width, area.height);
    border(layer, style, &text, area);
    if style.window_header {
        horizontal_line(layer, style, &text, area.x, area.y + 2, area.width, true);
    }
    if style.window_footer {
        horizontal_line(layer, style, &text, area.x, area.bottom() - 3, area.width, true);
    }
}

/// Cover `area` with transparent cells that darken what lies below by
/// `alpha` when composited.
pub fn shadow(layer: &mut Layer, attr: &Attribute, area: Rect, alpha: f32) {
    let shade = Attribute::clone_from_existing(attr).with_transform(alpha);
    layer.fill_area(&shade, "", area.x, area.y, area.width, area.height);
}

// ─── Lines ───────────────────────────────────────────────────────────────────

/// A horizontal line of `width` cells starting at `(x, y)`.
///
/// With `connectors` the ends are drawn as ├ and ┤ and every glyph merges
/// with existing connectors; without, the line overwrites plainly.
pub fn horizontal_line(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, x: i32, y: i32, width: i32, connectors: bool) {
    let line = style.text_attr(attr);
    for i in 0..width {
        if !connectors {
            layer.put_char(&line, x + i, y, style.horizontal);
            continue;
        }
        let glyph = if i == 0 {
            style.right_t
        } else if i == width - 1 {
            style.left_t
        } else {
            style.horizontal
        };
        put_connector(layer, style, &line, x + i, y, glyph);
    }
}

/// A vertical line of `height` cells starting at `(x, y)`.
///
/// With `connectors` the ends are drawn as ┬ and ┴ and every glyph merges
/// with existing connectors.
pub fn vertical_line(layer: &mut Layer, style: &TuiStyle, attr: &Attribute, x: i32, y: i32, height: i32, connectors: bool) {
    let line = style.text_attr(attr);
    for i in 0..height {
        if !connectors {
            layer.put_char(&line, x, y + i, style.vertical);
            continue;
        }
        let glyph = if i == 0 {
            style.down_t
        } else if i == height - 1 {
            style.up_t
        } else {
            style.vertical
        };
        put_connector(layer, style, &line, x, y + i, glyph);
    }
}

/// A one-row run of `pattern`, `length` cells long.
pub fn bar(layer: &mut Layer, attr: &Attribute, pattern: &str, x: i32, y: i32, length: i32) {
    layer.fill_area(attr, pattern, x, y, length, 1);
}

// ─── Buttons ─────────────────────────────────────────────────────────────────

/// Paint a push button.
///
/// Buttons are at least three rows tall and always wide enough for their
/// label. Every painted cell is tagged with the button's alias so a mouse
/// hit can be traced back to it.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // labels are short
pub fn button(layer: &mut Layer, button: &Button) {
    let style = &button.style;
    let mut attr = Attribute::with_colors(style.button_fg, style.button_bg);
    attr.cell_type = CellType::Button;
    attr.cell_alias.clone_from(&button.alias);
    if button.selected {
        attr.style |= Style::UNDERLINE;
    }

    let label_len = button.label.chars().count() as i32;
    let mut area = button.area;
    area.height = area.height.max(3);
    if area.width < label_len {
        area.width = label_len + 2;
    }

    let edges = TuiStyle {
        text_fg: style.button_raised,
        text_bg: style.button_bg,
        ..style.clone()
    };
    layer.fill_area(&attr, " ", area.x, area.y, area.width, area.height);
    let frame_style = if button.pressed {
        FrameStyle::Sunken
    } else {
        FrameStyle::Raised
    };
    frame(layer, &edges, &attr, frame_style, area);
    layer.print_at(
        &attr,
        area.x + (area.width - label_len) / 2,
        area.y + area.height / 2,
        &button.label,
    );
}
