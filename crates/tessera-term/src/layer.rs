// SPDX-License-Identifier: MIT
//
// Layer: a named, positioned grid of cells. The unit of composition.
//
// Applications and widgets paint into layers; the compositor stacks them by
// z-order into a single frame. A layer's own coordinates always start at
// (0, 0); its screen position (x, y) is relative to its parent layer (or the
// screen, for top-level layers) and may be negative or run past the parent's
// far edge; the compositor clips.
//
// Design:
//
//   - Flat `Vec<Cell>` in row-major order: `index = y * width + x`.
//   - Width and height are fixed at creation. Resizing means a new layer.
//   - Drawing never fails on position. Cells that fall outside the grid are
//     skipped one by one; only malformed requests (a cursor placed outside
//     the grid, reading a cell that does not exist) panic.
//   - Fresh layers are fully transparent (every cell holds NUL), so an empty
//     layer composited over anything changes nothing.

use crate::cell::{Attribute, Cell, NULL_CELL_ID, NULL_CHAR};
use crate::color::{Rgb, ansi};
use crate::text::is_wide;

// ─── Rect ────────────────────────────────────────────────────────────────────

/// A rectangle with a signed origin.
///
/// ```
/// use tessera_term::layer::Rect;
///
/// let screen = Rect::new(0, 0, 80, 25);
/// let window = Rect::new(-5, 20, 10, 10);
/// assert_eq!(window.intersect(screen), Some(Rect::new(0, 20, 5, 5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// The overlapping part of two rectangles, or `None` if they don't touch.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        (x2 > x1 && y2 > y1).then(|| Self::new(x1, y1, x2 - x1, y2 - y1))
    }
}

// ─── Layer ───────────────────────────────────────────────────────────────────

/// A rectangular grid of cells with placement and stacking metadata.
///
/// ```
/// use tessera_term::cell::Attribute;
/// use tessera_term::layer::Layer;
///
/// let mut layer = Layer::new("status", 10, 1);
/// layer.print_at(&Attribute::default(), 0, 0, "hello, world");
/// assert_eq!(layer.row_text(0), "hello, wor");
/// ```
#[derive(Clone, PartialEq)]
pub struct Layer {
    alias: String,
    width: u16,
    height: u16,
    /// Horizontal position relative to the parent (or the screen).
    pub x: i32,
    /// Vertical position relative to the parent (or the screen).
    pub y: i32,
    /// Typewriter cursor used by [`print`](Self::print).
    cursor_x: i32,
    cursor_y: i32,
    /// Paint priority. Higher paints later (on top).
    pub z_order: i32,
    pub visible: bool,
    parent_alias: Option<String>,
    is_parent: bool,
    /// Attribute used when the caller doesn't supply one.
    pub default_attr: Attribute,
    cells: Vec<Cell>,
}

impl Layer {
    // ─── Construction ────────────────────────────────────────────────────

    /// A visible, fully transparent layer at (0, 0).
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(alias: impl Into<String>, width: u16, height: u16) -> Self {
        let alias = alias.into();
        assert!(
            width > 0 && height > 0,
            "layer '{alias}' must be at least 1x1, got {width}x{height}"
        );
        let size = usize::from(width) * usize::from(height);
        Self {
            alias,
            width,
            height,
            x: 0,
            y: 0,
            cursor_x: 0,
            cursor_y: 0,
            z_order: 0,
            visible: true,
            parent_alias: None,
            is_parent: false,
            default_attr: Attribute::default(),
            cells: vec![Cell::default(); size],
        }
    }

    /// Builder: place the layer at `(x, y)`.
    #[must_use]
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder: set the z-order.
    #[must_use]
    pub const fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub(crate) fn set_parent_alias(&mut self, parent: Option<String>) {
        self.parent_alias = parent;
    }

    pub(crate) const fn set_is_parent(&mut self, is_parent: bool) {
        self.is_parent = is_parent;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The layer's parent, if it is nested.
    #[inline]
    #[must_use]
    pub fn parent_alias(&self) -> Option<&str> {
        self.parent_alias.as_deref()
    }

    /// Whether at least one other layer currently names this one as parent.
    #[inline]
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// Typewriter cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    /// The layer's own grid: `(0, 0, width, height)`.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Where the layer sits inside its parent: `(x, y, width, height)`.
    #[inline]
    #[must_use]
    pub const fn placement(&self) -> Rect {
        Rect::new(self.x, self.y, self.width as i32, self.height as i32)
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }

    // Only called after `in_bounds`, so both coordinates are non-negative.
    #[allow(clippy::cast_sign_loss)]
    #[inline]
    const fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// The character at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the layer.
    #[must_use]
    pub fn char_at(&self, x: i32, y: i32) -> char {
        match self.get(x, y) {
            Some(cell) => cell.ch,
            None => panic!(
                "location ({x}, {y}) is out of bounds for layer '{}' of size {}x{}",
                self.alias, self.width, self.height
            ),
        }
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, or `None` past the last row.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = usize::from(y) * usize::from(self.width);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// The characters of one row as a string; transparent cells read as
    /// spaces. Handy for tests and debug dumps.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_transparent() { ' ' } else { c.ch })
                    .collect()
            })
            .unwrap_or_default()
    }

    // ─── Placement & Style ───────────────────────────────────────────────

    /// Move to an absolute position.
    pub const fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Move by a relative offset.
    pub const fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Set both transform values of the default attribute.
    pub const fn set_alpha(&mut self, alpha: f32) {
        self.default_attr.set_transform(alpha);
    }

    /// Set the default attribute's colors.
    pub const fn set_colors(&mut self, fg: Rgb, bg: Rgb) {
        self.default_attr.fg = fg;
        self.default_attr.bg = bg;
    }

    /// Set the default attribute's colors from the 16-color palette.
    ///
    /// # Panics
    ///
    /// Panics if either index is greater than 15.
    pub fn set_colors_by_index(&mut self, fg: usize, bg: usize) {
        self.set_colors(ansi(fg), ansi(bg));
    }

    /// Place the typewriter cursor.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the layer.
    pub fn locate(&mut self, x: i32, y: i32) {
        assert!(
            self.in_bounds(x, y),
            "cannot locate cursor at ({x}, {y}) on layer '{}' of size {}x{}",
            self.alias,
            self.width,
            self.height
        );
        self.cursor_x = x;
        self.cursor_y = y;
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    /// Write `text` starting at `(x, y)` with `attr`.
    ///
    /// Wide characters advance two columns. Writing stops as soon as the
    /// column reaches the layer width; cells left of the layer or on a row
    /// outside it are skipped individually.
    pub fn print_at(&mut self, attr: &Attribute, x: i32, y: i32, text: &str) {
        let width = i32::from(self.width);
        let mut col = x;
        for ch in text.chars() {
            if let Some(idx) = self.in_bounds(col, y).then(|| self.index(col, y)) {
                let cell = &mut self.cells[idx];
                cell.ch = ch;
                cell.attr = Attribute::clone_from_existing(attr);
                cell.layer_alias.clone_from(&self.alias);
            }
            col += if is_wide(ch) { 2 } else { 1 };
            if col >= width {
                return;
            }
        }
    }

    /// Write one character at `(x, y)`. Out of bounds is a no-op.
    pub fn put_char(&mut self, attr: &Attribute, x: i32, y: i32, ch: char) {
        if let Some(idx) = self.in_bounds(x, y).then(|| self.index(x, y)) {
            let cell = &mut self.cells[idx];
            cell.ch = ch;
            cell.attr = Attribute::clone_from_existing(attr);
            cell.layer_alias.clone_from(&self.alias);
        }
    }

    /// Typewriter print: write at the cursor with the default attribute,
    /// then move the cursor to the start of the next line.
    ///
    /// When the cursor has already run past the last row, the grid scrolls
    /// up one row first and printing happens on the last row.
    pub fn print(&mut self, text: &str) {
        if self.cursor_y >= i32::from(self.height) {
            self.cursor_y = i32::from(self.height) - 1;
            self.scroll_up();
        }
        let attr = self.default_attr.clone();
        self.print_at(&attr, self.cursor_x, self.cursor_y, text);
        self.cursor_x = 0;
        self.cursor_y += 1;
    }

    /// Drop the first row, shift the rest up, and append a row of spaces in
    /// the default attribute.
    pub fn scroll_up(&mut self) {
        let width = usize::from(self.width);
        self.cells.drain(..width);
        let blank = Cell::new(' ', self.default_attr.clone(), self.alias.clone());
        self.cells.extend(std::iter::repeat_n(blank, width));
    }

    /// Tile `pattern` over the rectangle `(x, y, width, height)`.
    ///
    /// The pattern position only advances on visible cells and carries over
    /// from one row to the next. A wide glyph consumes two columns. An empty
    /// pattern writes NUL, which makes the area transparent.
    pub fn fill_area(&mut self, attr: &Attribute, pattern: &str, x: i32, y: i32, width: i32, height: i32) {
        let glyphs: Vec<char> = if pattern.is_empty() {
            vec![NULL_CHAR]
        } else {
            pattern.chars().collect()
        };
        let Some(area) = Rect::new(x, y, width, height).intersect(self.bounds()) else {
            return;
        };
        let mut next = 0;
        for cy in area.y..area.bottom() {
            let mut cx = area.x;
            while cx < area.right() {
                let ch = glyphs[next];
                self.put_char(attr, cx, cy, ch);
                cx += if is_wide(ch) { 2 } else { 1 };
                next = (next + 1) % glyphs.len();
            }
        }
    }

    /// Tile `pattern` over the whole layer.
    pub fn fill(&mut self, attr: &Attribute, pattern: &str) {
        let (w, h) = (i32::from(self.width), i32::from(self.height));
        self.fill_area(attr, pattern, 0, 0, w, h);
    }

    /// Reset every cell to transparent and the cursor to (0, 0).
    ///
    /// Placement, z-order, visibility and the default attribute are kept.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    /// Reset the cell id of every cell in the rectangle to untagged.
    pub fn clear_cell_ids(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let Some(area) = Rect::new(x, y, width, height).intersect(self.bounds()) else {
            return;
        };
        for cy in area.y..area.bottom() {
            for cx in area.x..area.right() {
                let idx = self.index(cx, cy);
                self.cells[idx].attr.cell_id = NULL_CELL_ID;
            }
        }
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Layer('{}' {}x{} at ({}, {}) z={})",
            self.alias, self.width, self.height, self.x, self.y, self.z_order
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn attr() -> Attribute {
        Attribute::default()
    }

    // ── Rect ────────────────────────────────────────────────────────

    #[test]
    fn rect_edges() {
        let r = Rect::new(-2, 3, 10, 4);
        assert_eq!(r.right(), 8);
        assert_eq!(r.bottom(), 7);
        assert!(r.contains(-2, 3));
        assert!(!r.contains(8, 3));
        assert!(Rect::new(0, 0, 0, 3).is_empty());
    }

    #[test]
    fn rect_intersect_cases() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(Rect::new(5, 5, 10, 10)), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(Rect::new(10, 0, 5, 5)), None);
        assert_eq!(a.intersect(Rect::new(-20, -20, 5, 5)), None);
        assert_eq!(a.intersect(Rect::new(2, 2, 3, 3)), Some(Rect::new(2, 2, 3, 3)));
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn new_layer_is_visible_and_transparent() {
        let layer = Layer::new("a", 4, 3);
        assert_eq!(layer.cells().len(), 12);
        assert!(layer.visible);
        assert!(layer.cells().iter().all(Cell::is_transparent));
        assert_eq!(layer.parent_alias(), None);
        assert!(!layer.is_parent());
    }

    #[test]
    #[should_panic(expected = "must be at least 1x1")]
    fn zero_width_panics() {
        let _ = Layer::new("bad", 0, 5);
    }

    #[test]
    fn builders_set_placement() {
        let layer = Layer::new("a", 2, 2).at(-3, 4).with_z_order(7);
        assert_eq!(layer.placement(), Rect::new(-3, 4, 2, 2));
        assert_eq!(layer.z_order, 7);
    }

    // ── print_at ────────────────────────────────────────────────────

    #[test]
    fn print_at_tags_cells_with_layer_alias() {
        let mut layer = Layer::new("txt", 5, 1);
        layer.print_at(&attr(), 1, 0, "ab");
        assert_eq!(layer.row_text(0), " ab  ");
        assert_eq!(layer.get(1, 0).unwrap().layer_alias, "txt");
        assert!(layer.get(0, 0).unwrap().layer_alias.is_empty());
    }

    #[test]
    fn print_at_truncates_at_width() {
        let mut layer = Layer::new("t", 3, 1);
        layer.print_at(&attr(), 0, 0, "abcdef");
        assert_eq!(layer.row_text(0), "abc");
    }

    #[test]
    fn print_at_skips_cells_left_of_layer() {
        let mut layer = Layer::new("t", 4, 1);
        layer.print_at(&attr(), -2, 0, "abcd");
        assert_eq!(layer.row_text(0), "cd  ");
    }

    #[test]
    fn print_at_row_outside_is_noop() {
        let mut layer = Layer::new("t", 4, 2);
        layer.print_at(&attr(), 0, 2, "abcd");
        layer.print_at(&attr(), 0, -1, "abcd");
        assert!(layer.cells().iter().all(Cell::is_transparent));
    }

    #[test]
    fn print_at_wide_chars_advance_two() {
        let mut layer = Layer::new("t", 6, 1);
        layer.print_at(&attr(), 0, 0, "中a文");
        assert_eq!(layer.char_at(0, 0), '中');
        assert!(layer.get(1, 0).unwrap().is_transparent());
        assert_eq!(layer.char_at(2, 0), 'a');
        assert_eq!(layer.char_at(3, 0), '文');
    }

    #[test]
    fn print_at_copies_attribute() {
        let mut layer = Layer::new("t", 2, 1);
        let mut a = attr();
        a.cell_type = CellType::Button;
        a.cell_alias = "ok".into();
        layer.print_at(&a, 0, 0, "x");
        let cell = layer.get(0, 0).unwrap();
        assert_eq!(cell.attr.cell_type, CellType::Button);
        assert_eq!(cell.attr.cell_alias, "ok");
    }

    proptest! {
        #[test]
        fn print_at_stays_in_bounds(
            w in 1u16..12,
            h in 1u16..6,
            x in -20i32..20,
            y in -8i32..8,
            text in "[a-z中 ]{0,30}",
        ) {
            let mut layer = Layer::new("p", w, h);
            layer.print_at(&Attribute::default(), x, y, &text);
            prop_assert_eq!(layer.cells().len(), usize::from(w) * usize::from(h));
            if !(0..i32::from(h)).contains(&y) {
                prop_assert!(layer.cells().iter().all(Cell::is_transparent));
            }
        }
    }

    // ── print / scroll ──────────────────────────────────────────────

    #[test]
    fn print_advances_cursor_line_by_line() {
        let mut layer = Layer::new("t", 4, 2);
        layer.print("ab");
        layer.print("cd");
        assert_eq!(layer.cursor(), (0, 2));
        assert_eq!(layer.row_text(0), "ab  ");
        assert_eq!(layer.row_text(1), "cd  ");
    }

    #[test]
    fn print_past_last_row_scrolls() {
        let mut layer = Layer::new("t", 2, 2);
        layer.print("a");
        layer.print("b");
        layer.print("c");
        assert_eq!(layer.row_text(0), "b ");
        assert_eq!(layer.row_text(1), "c ");
        // Scrolled-in row is real spaces, not transparency.
        assert_eq!(layer.get(1, 1).unwrap().ch, ' ');
    }

    #[test]
    fn print_starts_at_located_cursor() {
        let mut layer = Layer::new("t", 4, 2);
        layer.locate(2, 1);
        layer.print("xy");
        assert_eq!(layer.row_text(1), "  xy");
    }

    #[test]
    #[should_panic(expected = "cannot locate cursor")]
    fn locate_out_of_bounds_panics() {
        Layer::new("t", 4, 2).locate(4, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn char_at_out_of_bounds_panics() {
        let _ = Layer::new("t", 4, 2).char_at(0, 2);
    }

    // ── fill ────────────────────────────────────────────────────────

    #[test]
    fn fill_tiles_pattern_across_rows() {
        let mut layer = Layer::new("t", 3, 2);
        layer.fill(&attr(), "ab");
        assert_eq!(layer.row_text(0), "aba");
        assert_eq!(layer.row_text(1), "bab");
    }

    #[test]
    fn fill_area_clips() {
        let mut layer = Layer::new("t", 4, 3);
        layer.fill_area(&attr(), "#", 2, 1, 5, 5);
        assert_eq!(layer.row_text(0), "    ");
        assert_eq!(layer.row_text(1), "  ##");
        assert_eq!(layer.row_text(2), "  ##");
    }

    #[test]
    fn fill_area_pattern_starts_at_first_visible_cell() {
        let mut layer = Layer::new("t", 3, 2);
        layer.fill_area(&attr(), "abc", -2, -1, 4, 3);
        assert_eq!(layer.row_text(0), "ab ");
        assert_eq!(layer.row_text(1), "ca ");
    }

    #[test]
    fn fill_area_far_off_layer_is_noop() {
        let mut layer = Layer::new("t", 3, 2);
        let before = layer.clone();
        layer.fill_area(&attr(), "#", 10_000, 0, i32::MAX, i32::MAX);
        layer.fill_area(&attr(), "#", i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(layer, before);
    }

    #[test]
    fn fill_area_huge_rect_covers_layer() {
        let mut layer = Layer::new("t", 3, 2);
        layer.fill_area(&attr(), "#", -1_000_000_000, -1_000_000_000, i32::MAX, i32::MAX);
        assert_eq!(layer.row_text(0), "###");
        assert_eq!(layer.row_text(1), "###");
    }

    #[test]
    fn fill_with_empty_pattern_makes_transparent() {
        let mut layer = Layer::new("t", 2, 1);
        layer.fill(&attr(), "x");
        layer.fill(&attr().with_transform(0.5), "");
        let cell = layer.get(0, 0).unwrap();
        assert!(cell.is_transparent());
        assert!((cell.attr.bg_transform - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fill_wide_pattern_skips_column() {
        let mut layer = Layer::new("t", 4, 1);
        layer.fill(&attr(), "中");
        assert_eq!(layer.char_at(0, 0), '中');
        assert!(layer.get(1, 0).unwrap().is_transparent());
        assert_eq!(layer.char_at(2, 0), '中');
    }

    // ── clear / ids / placement ─────────────────────────────────────

    #[test]
    fn clear_keeps_placement() {
        let mut layer = Layer::new("t", 2, 2).at(5, 6);
        layer.print("ab");
        layer.clear();
        assert!(layer.cells().iter().all(Cell::is_transparent));
        assert_eq!(layer.cursor(), (0, 0));
        assert_eq!((layer.x, layer.y), (5, 6));
    }

    #[test]
    fn clear_cell_ids_only_touches_area() {
        let mut layer = Layer::new("t", 3, 1);
        layer.print_at(&attr().with_cell_id(4), 0, 0, "abc");
        layer.clear_cell_ids(1, 0, 10, 1);
        assert_eq!(layer.get(0, 0).unwrap().attr.cell_id, 4);
        assert_eq!(layer.get(1, 0).unwrap().attr.cell_id, NULL_CELL_ID);
        assert_eq!(layer.get(2, 0).unwrap().attr.cell_id, NULL_CELL_ID);
    }

    #[test]
    fn move_and_alpha() {
        let mut layer = Layer::new("t", 1, 1);
        layer.move_to(3, 3);
        layer.move_by(-4, 1);
        assert_eq!((layer.x, layer.y), (-1, 4));
        layer.set_alpha(0.3);
        assert!((layer.default_attr.fg_transform - 0.3).abs() < f32::EPSILON);
        layer.set_colors_by_index(4, 6);
        assert_eq!(layer.default_attr.bg, ansi(6));
    }
}
