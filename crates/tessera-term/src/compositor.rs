// SPDX-License-Identifier: MIT
//
// Compositor: flattens the layer tree into one screen-sized frame.
//
// Layers are painted bottom to top in z-order. A nested layer is first
// composited into a private copy of its parent, and that copy is then
// composited into the parent's own scope, so children are always clipped to
// their parent and move with it.
//
// Stored layers are never modified. Every visible layer is cloned, its
// buttons are painted into the clone, and only the clone takes part in
// blending.
//
// Blending, per overlapping cell:
//
//   source is transparent   each channel with transform t < 1 darkens the
//                           target toward black by (1 − t); the character
//                           below stays
//   source has a character  the target takes the source character,
//                           attribute and owning layer; each color whose
//                           transform t < 1 is blended from the old target
//                           color toward the source color by t
//
// The transform comes from the cell when either of its values differs from
// 1, otherwise from the source layer's default attribute.

use tracing::trace;

use crate::button::Buttons;
use crate::cell::Attribute;
use crate::color::{Rgb, transition};
use crate::layer::Layer;
use crate::registry::{ROOT_ALIAS, Registry};

/// Composite every visible layer into a fresh `width × height` frame.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
#[must_use]
pub fn render(registry: &Registry, buttons: &Buttons, width: u16, height: u16) -> Layer {
    let mut frame = Layer::new(ROOT_ALIAS, width, height);
    let sorted = registry.sorted_aliases();
    render_subtree(registry, buttons, &mut frame, None, &sorted);
    trace!(width, height, layers = registry.len(), "frame composited");
    frame
}

/// Composite the direct children of `scope` (top-level layers when `None`)
/// into `target`, recursing into children that are parents themselves.
///
/// `sorted` must list aliases in ascending z-order.
pub fn render_subtree(
    registry: &Registry,
    buttons: &Buttons,
    target: &mut Layer,
    scope: Option<&str>,
    sorted: &[String],
) {
    for alias in sorted {
        let Some(layer) = registry.get(alias) else {
            continue;
        };
        if !layer.visible || layer.parent_alias() != scope {
            continue;
        }
        let mut copy = layer.clone();
        buttons.draw_on(&mut copy);
        if layer.is_parent() {
            render_subtree(registry, buttons, &mut copy, Some(alias), sorted);
        }
        overlay(&copy, target);
    }
}

/// Blend `source`, placed at its `(x, y)`, onto `target`.
///
/// Only the overlap of the two is visited; a source that lies entirely off
/// the target is a no-op.
pub fn overlay(source: &Layer, target: &mut Layer) {
    let Some(area) = source.placement().intersect(target.bounds()) else {
        return;
    };
    let layer_fg_t = source.default_attr.fg_transform;
    let layer_bg_t = source.default_attr.bg_transform;

    for ty in area.y..area.bottom() {
        for tx in area.x..area.right() {
            let (Some(src), Some(dst)) = (source.get(tx - source.x, ty - source.y), target.get_mut(tx, ty)) else {
                continue;
            };

            if src.is_transparent() {
                dst.attr.fg = darken_toward_black(dst.attr.fg, src.attr.fg_transform);
                dst.attr.bg = darken_toward_black(dst.attr.bg, src.attr.bg_transform);
                continue;
            }

            let (below_fg, below_bg) = (dst.attr.fg, dst.attr.bg);
            let (fg_t, bg_t) = if src.attr.is_opaque() {
                (layer_fg_t, layer_bg_t)
            } else {
                (src.attr.fg_transform, src.attr.bg_transform)
            };
            dst.ch = src.ch;
            dst.attr = Attribute::clone_from_existing(&src.attr);
            dst.layer_alias.clone_from(&src.layer_alias);
            if fg_t < 1.0 {
                dst.attr.fg = transition(below_fg, src.attr.fg, fg_t);
            }
            if bg_t < 1.0 {
                dst.attr.bg = transition(below_bg, src.attr.bg, bg_t);
            }
        }
    }
}

fn darken_toward_black(color: Rgb, transform: f32) -> Rgb {
    if transform < 1.0 {
        transition(color, Rgb::BLACK, 1.0 - transform)
    } else {
        color
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
