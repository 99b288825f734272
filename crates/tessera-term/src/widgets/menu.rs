// SPDX-License-Identifier: MIT
//
// Selection menus.
//
//   vertical       one item per row inside a fixed box, scrolling when the
//                  list is taller than the box
//   horizontal     items side by side, each as wide as its label
//   proportional   a fixed number of equal-width slots on one row, scrolling
//                  sideways through a longer list
//
// All three share one state machine (`Scroll`): a viewport into the list
// and the highlighted slot inside it. Moving past either end of the visible
// slots shifts the viewport by one item.
//
// Each drawn item carries its slot number as cell id. Hovering the mouse
// over a slot highlights it and a primary click confirms it.

use std::sync::Arc;

use tracing::debug;

use super::{Selection, cells};
use crate::cell::Attribute;
use crate::error::Result;
use crate::input::Key;
use crate::layer::{Layer, Rect};
use crate::session::Session;
use crate::style::TuiStyle;
use crate::text::{align, filled, wide_count};

// ─── Scroll State ────────────────────────────────────────────────────────────

/// Viewport and highlighted slot of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scroll {
    /// Index of the first visible item.
    viewport: usize,
    /// Highlighted slot, relative to the viewport.
    selected: usize,
    slots: usize,
    len: usize,
}

impl Scroll {
    /// Highlight `index`, scrolled so it sits in the last slot when it is
    /// not on the first page.
    const fn at_bottom(slots: usize, len: usize, index: usize) -> Self {
        let viewport = (index + 1).saturating_sub(slots);
        Self {
            viewport,
            selected: index - viewport,
            slots,
            len,
        }
    }

    /// Highlight `index`, scrolled so it sits in the first slot when it is
    /// not on the first page (as far as the list allows).
    fn at_top(slots: usize, len: usize, index: usize) -> Self {
        let viewport = if index < slots {
            0
        } else {
            index.min(len.saturating_sub(slots))
        };
        Self {
            viewport,
            selected: index - viewport,
            slots,
            len,
        }
    }

    const fn index(self) -> usize {
        self.viewport + self.selected
    }

    fn forward(&mut self) {
        self.selected += 1;
        if self.selected >= self.slots {
            self.selected = self.slots - 1;
            self.viewport = (self.viewport + 1).min(self.len.saturating_sub(self.slots));
        }
        if self.index() >= self.len {
            self.selected = self.len - 1 - self.viewport;
        }
    }

    const fn back(&mut self) {
        if self.selected == 0 {
            self.viewport = self.viewport.saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    /// Highlight the slot a cell id names. Returns `false` for ids that do
    /// not name an item.
    fn hover(&mut self, cell_id: i32) -> bool {
        let Ok(slot) = usize::try_from(cell_id) else {
            return false;
        };
        if slot >= self.slots || self.viewport + slot >= self.len {
            return false;
        }
        self.selected = slot;
        true
    }
}

fn check_selection(selection: &Selection, default_index: usize) {
    assert!(!selection.is_empty(), "selection list is empty");
    assert!(
        default_index < selection.len(),
        "default item {default_index} is outside the selection range 0..{}",
        selection.len()
    );
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

/// Draw `area.height` items starting at `viewport`, one per row, each padded
/// to the menu width. Rows past the end of the list are blanked.
pub fn draw_vertical_menu(
    layer: &mut Layer,
    style: &TuiStyle,
    selection: &Selection,
    area: Rect,
    viewport: usize,
    selected: usize,
) {
    let menu = style.menu_attr(&Attribute::default());
    let highlight = style.highlight_attr(&Attribute::default());
    let width = usize::try_from(area.width).unwrap_or(0);
    for (slot, row) in (0..area.height).enumerate() {
        let y = area.y + row;
        match selection.value(viewport + slot) {
            None => layer.print_at(&menu, area.x, y, &filled(width, " ")),
            Some(value) => {
                let attr = if slot == selected { &highlight } else { &menu };
                let attr = attr.clone().with_cell_id(row);
                layer.print_at(&attr, area.x, y, &align(value, width, style.menu_alignment));
            }
        }
    }
}

/// Draw every item on one row as `" value "`. Items that would cross the
/// right edge of the layer are left out, along with everything after them.
pub fn draw_horizontal_menu(layer: &mut Layer, style: &TuiStyle, selection: &Selection, x: i32, y: i32, selected: usize) {
    let menu = style.menu_attr(&Attribute::default());
    let highlight = style.highlight_attr(&Attribute::default());
    let layer_width = i32::from(layer.width());
    let mut offset = 0;
    for (index, value) in selection.values().enumerate() {
        let item = format!(" {value} ");
        let len = cells(item.chars().count());
        if x + offset + len > layer_width {
            return;
        }
        let attr = if index == selected { &highlight } else { &menu };
        layer.print_at(&attr.clone().with_cell_id(cells(index)), x + offset, y, &item);
        offset += len + cells(wide_count(&item));
    }
}

/// Draw `items_per_row` equal slots across `menu_width` columns, starting at
/// item `viewport`. The last slot also takes the columns left over by the
/// division.
#[allow(clippy::too_many_arguments)]
pub fn draw_proportional_menu(
    layer: &mut Layer,
    style: &TuiStyle,
    selection: &Selection,
    x: i32,
    y: i32,
    menu_width: i32,
    items_per_row: usize,
    viewport: usize,
    selected: usize,
) {
    let menu = style.menu_attr(&Attribute::default());
    let highlight = style.highlight_attr(&Attribute::default());
    let per_row = cells(items_per_row.max(1));
    let item_width = (menu_width / per_row).max(1);
    let remainder = (menu_width - item_width * per_row).max(0);
    for (slot, column) in (0..per_row).enumerate() {
        let sx = x + column * item_width;
        let width = if column == per_row - 1 { item_width + remainder } else { item_width };
        let width = usize::try_from(width).unwrap_or(0);
        match selection.value(viewport + slot) {
            None => layer.print_at(&menu, sx, y, &filled(width, " ")),
            Some(value) => {
                let attr = if slot == selected { &highlight } else { &menu };
                let item = align(&format!(" {value} "), width, style.menu_alignment);
                layer.print_at(&attr.clone().with_cell_id(column), sx, y, &item);
            }
        }
    }
}

// ─── Session Entry Points ────────────────────────────────────────────────────

impl Session {
    /// Let the user pick an item from a vertical menu drawn in `area` of a
    /// layer. `Up`/`Down` move, `Enter` or a click confirms, `Escape`
    /// cancels.
    ///
    /// Returns the index of the confirmed item, or `None` when cancelled.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// Panics if the layer does not exist, `area` has a non-positive size,
    /// the selection is empty, or `default_index` is out of range.
    pub fn vertical_menu(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        area: Rect,
        default_index: usize,
    ) -> Result<Option<usize>> {
        assert!(
            area.width > 0 && area.height > 0,
            "menu size {}x{} is invalid",
            area.width,
            area.height
        );
        check_selection(selection, default_index);
        let slots = usize::try_from(area.height).unwrap_or(1);
        let scroll = Scroll::at_bottom(slots, selection.len(), default_index);
        let choice = self.run_menu(layer_alias, scroll, Key::Up, Key::Down, |layer, s| {
            draw_vertical_menu(layer, style, selection, area, s.viewport, s.selected);
        });
        self.layer_mut(layer_alias)
            .clear_cell_ids(area.x, area.y, area.width, area.height);
        choice
    }

    /// [`vertical_menu`](Self::vertical_menu), returning the alias of the
    /// confirmed item.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// See [`vertical_menu`](Self::vertical_menu).
    pub fn vertical_menu_alias(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        area: Rect,
        default_index: usize,
    ) -> Result<Option<String>> {
        let index = self.vertical_menu(layer_alias, style, selection, area, default_index)?;
        Ok(alias_of(selection, index))
    }

    /// Let the user pick an item from a horizontal menu at `(x, y)`.
    /// `Left`/`Right` move, `Enter` or a click confirms, `Escape` cancels.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// Panics if the layer does not exist, the selection is empty, or
    /// `default_index` is out of range.
    pub fn horizontal_menu(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        x: i32,
        y: i32,
        default_index: usize,
    ) -> Result<Option<usize>> {
        check_selection(selection, default_index);
        let scroll = Scroll::at_top(selection.len(), selection.len(), default_index);
        let choice = self.run_menu(layer_alias, scroll, Key::Left, Key::Right, |layer, s| {
            draw_horizontal_menu(layer, style, selection, x, y, s.selected);
        });
        let layer = self.layer_mut(layer_alias);
        let width = i32::from(layer.width());
        layer.clear_cell_ids(x, y, width, 1);
        choice
    }

    /// [`horizontal_menu`](Self::horizontal_menu), returning the alias of
    /// the confirmed item.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// See [`horizontal_menu`](Self::horizontal_menu).
    pub fn horizontal_menu_alias(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        x: i32,
        y: i32,
        default_index: usize,
    ) -> Result<Option<String>> {
        let index = self.horizontal_menu(layer_alias, style, selection, x, y, default_index)?;
        Ok(alias_of(selection, index))
    }

    /// Let the user pick an item from a row of `items_per_row` equal slots
    /// spanning `menu_width` columns. Longer lists scroll sideways. A
    /// default item beyond the first page starts scrolled to it.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// Panics if the layer does not exist, `menu_width` or `items_per_row`
    /// is not positive, the selection is empty, or `default_index` is out
    /// of range.
    #[allow(clippy::too_many_arguments)]
    pub fn proportional_menu(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        x: i32,
        y: i32,
        menu_width: i32,
        items_per_row: usize,
        default_index: usize,
    ) -> Result<Option<usize>> {
        assert!(menu_width > 0, "menu width {menu_width} is invalid");
        assert!(items_per_row > 0, "items per row must be positive");
        check_selection(selection, default_index);
        let scroll = Scroll::at_top(items_per_row, selection.len(), default_index);
        let choice = self.run_menu(layer_alias, scroll, Key::Left, Key::Right, |layer, s| {
            draw_proportional_menu(layer, style, selection, x, y, menu_width, items_per_row, s.viewport, s.selected);
        });
        let layer = self.layer_mut(layer_alias);
        let width = i32::from(layer.width());
        layer.clear_cell_ids(x, y, width, 1);
        choice
    }

    /// [`proportional_menu`](Self::proportional_menu), returning the alias
    /// of the confirmed item.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// See [`proportional_menu`](Self::proportional_menu).
    #[allow(clippy::too_many_arguments)]
    pub fn proportional_menu_alias(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        selection: &Selection,
        x: i32,
        y: i32,
        menu_width: i32,
        items_per_row: usize,
        default_index: usize,
    ) -> Result<Option<String>> {
        let index = self.proportional_menu(layer_alias, style, selection, x, y, menu_width, items_per_row, default_index)?;
        Ok(alias_of(selection, index))
    }

    /// The loop shared by every menu.
    fn run_menu(
        &mut self,
        layer_alias: &str,
        mut scroll: Scroll,
        back: Key,
        forward: Key,
        draw: impl Fn(&mut Layer, Scroll),
    ) -> Result<Option<usize>> {
        draw(self.layer_mut(layer_alias), scroll);
        self.update_display()?;
        let input = Arc::clone(self.input());
        let mut shown = scroll;
        loop {
            let key = input.pop_key();
            let mouse = input.mouse();
            if scroll.hover(self.cell_id_at(layer_alias, mouse.x, mouse.y)) && mouse.is_primary_pressed() {
                debug!(layer = layer_alias, index = scroll.index(), "menu item clicked");
                return Ok(Some(scroll.index()));
            }
            match key {
                Some(Key::Enter) => {
                    debug!(layer = layer_alias, index = scroll.index(), "menu item confirmed");
                    return Ok(Some(scroll.index()));
                }
                Some(Key::Escape) => {
                    debug!(layer = layer_alias, "menu cancelled");
                    return Ok(None);
                }
                // A stale pointer over the menu would fight the keyboard.
                Some(k) if k == back => {
                    scroll.back();
                    input.clear_mouse();
                }
                Some(k) if k == forward => {
                    scroll.forward();
                    input.clear_mouse();
                }
                Some(_) => {}
                None if scroll == shown => self.idle(),
                None => {}
            }
            if scroll != shown {
                draw(self.layer_mut(layer_alias), scroll);
                self.update_display()?;
                shown = scroll;
            }
        }
    }
}

fn alias_of(selection: &Selection, index: Option<usize>) -> Option<String> {
    index.and_then(|i| selection.alias(i)).map(str::to_owned)
}
