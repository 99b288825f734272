// SPDX-License-Identifier: MIT
//
// Push buttons.
//
// Buttons are not painted into the layers they belong to. The registry only
// records them; the compositor paints each layer's buttons into its private
// copy of that layer every frame. Pressed and selected states therefore show
// up on the next render without anyone repainting the stored layer.
//
// Presses are detected against the last composited frame: the cell under the
// mouse carries the button alias and the alias of the layer it came from.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::cell::CellType;
use crate::draw;
use crate::input::MouseState;
use crate::layer::{Layer, Rect};
use crate::style::TuiStyle;

/// One push button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub alias: String,
    pub label: String,
    pub style: TuiStyle,
    /// Position and size inside the owning layer.
    pub area: Rect,
    pub pressed: bool,
    /// Selected buttons draw their label underlined.
    pub selected: bool,
}

impl Button {
    #[must_use]
    pub fn new(alias: impl Into<String>, label: impl Into<String>, style: TuiStyle, area: Rect) -> Self {
        Self {
            alias: alias.into(),
            label: label.into(),
            style,
            area,
            pressed: false,
            selected: false,
        }
    }
}

/// Buttons grouped by the layer that owns them.
#[derive(Debug, Default)]
pub struct Buttons {
    by_layer: HashMap<String, BTreeMap<String, Button>>,
    /// `(layer alias, button alias)` of the button the mouse last pressed.
    held: Option<(String, String)>,
}

impl Buttons {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a button on `layer_alias`, replacing one with the same alias.
    pub fn add(&mut self, layer_alias: &str, button: Button) {
        debug!(layer = layer_alias, button = %button.alias, "button added");
        self.by_layer
            .entry(layer_alias.to_owned())
            .or_default()
            .insert(button.alias.clone(), button);
    }

    pub fn remove(&mut self, layer_alias: &str, button_alias: &str) -> Option<Button> {
        let layer = self.by_layer.get_mut(layer_alias)?;
        let removed = layer.remove(button_alias);
        if layer.is_empty() {
            self.by_layer.remove(layer_alias);
        }
        removed
    }

    /// Drop every button on `layer_alias`.
    pub fn remove_layer(&mut self, layer_alias: &str) {
        self.by_layer.remove(layer_alias);
        if self.held.as_ref().is_some_and(|(l, _)| l == layer_alias) {
            self.held = None;
        }
    }

    #[must_use]
    pub fn get(&self, layer_alias: &str, button_alias: &str) -> Option<&Button> {
        self.by_layer.get(layer_alias)?.get(button_alias)
    }

    pub fn get_mut(&mut self, layer_alias: &str, button_alias: &str) -> Option<&mut Button> {
        self.by_layer.get_mut(layer_alias)?.get_mut(button_alias)
    }

    /// Buttons on `layer_alias`, in alias order.
    pub fn on_layer(&self, layer_alias: &str) -> impl Iterator<Item = &Button> {
        self.by_layer
            .get(layer_alias)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    /// Paint every button registered on `layer` into it.
    pub fn draw_on(&self, layer: &mut Layer) {
        let Some(buttons) = self.by_layer.get(layer.alias()) else {
            return;
        };
        for button in buttons.values() {
            draw::button(layer, button);
        }
    }

    /// Follow the mouse over the last composited `frame`.
    ///
    /// A held button over a button cell presses that button. Once every
    /// mouse button is released, the button pressed last is released too.
    /// Returns whether any button changed state.
    pub fn update_states(&mut self, mouse: MouseState, frame: &Layer) -> bool {
        if mouse.is_pressed() {
            let Some(cell) = frame.get(mouse.x, mouse.y) else {
                return false;
            };
            if cell.attr.cell_type != CellType::Button || cell.attr.cell_alias.is_empty() {
                return false;
            }
            let (layer, alias) = (cell.layer_alias.clone(), cell.attr.cell_alias.clone());
            let Some(button) = self.get_mut(&layer, &alias) else {
                return false;
            };
            let changed = !button.pressed;
            button.pressed = true;
            if changed {
                debug!(layer = %layer, button = %alias, "button pressed");
            }
            self.held = Some((layer, alias));
            changed
        } else {
            let Some((layer, alias)) = self.held.take() else {
                return false;
            };
            self.get_mut(&layer, &alias).is_some_and(|button| {
                let changed = button.pressed;
                button.pressed = false;
                changed
            })
        }
    }
}
