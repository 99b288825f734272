// SPDX-License-Identifier: MIT
//
// Single-line text input.
//
// A field `width` cells wide shows a window of `width - 1` characters of the
// buffer; the last cell is room for the cursor at the end of the text. The
// window (viewport) follows the cursor: typing at the right edge slides it
// one character, while Left, Right and Backspace past an edge jump by a whole
// window.
//
// Positions count characters, not bytes, so multibyte input edits cleanly.
// Wide glyphs are drawn two cells wide, so a window of them can show fewer
// characters than it holds; drawing stops before the cursor cell.

use std::sync::Arc;

use tracing::debug;

use super::cells;
use crate::cell::{Attribute, CellType};
use crate::error::Result;
use crate::input::Key;
use crate::layer::Layer;
use crate::session::Session;
use crate::style::TuiStyle;
use crate::text::{filled, is_wide};

// ─── Editor State ────────────────────────────────────────────────────────────

/// Buffer, cursor and viewport of a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    buffer: Vec<char>,
    /// Cursor column relative to the viewport.
    cursor: usize,
    /// Index of the first visible character.
    viewport: usize,
    max_len: usize,
    /// Visible characters, one less than the field width.
    window: usize,
}

impl LineEditor {
    /// An editor for a field `width` cells wide holding up to `max_len`
    /// characters, pre-filled with `text` and the cursor at its end.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is zero or `width` is less than 2.
    #[must_use]
    pub fn new(text: &str, width: usize, max_len: usize) -> Self {
        assert!(max_len > 0, "maximum input length must be positive");
        assert!(width >= 2, "text input width {width} is too narrow");
        let mut editor = Self {
            buffer: text.chars().collect(),
            cursor: 0,
            viewport: 0,
            max_len,
            window: width - 1,
        };
        if !editor.buffer.is_empty() {
            editor.end();
        }
        editor
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> usize {
        self.viewport
    }

    /// Apply one key. Returns whether the field needs redrawing.
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Char(ch) => self.insert(ch),
            Key::Delete => self.delete(),
            Key::Backspace => self.backspace(),
            Key::Home => {
                self.cursor = 0;
                self.viewport = 0;
                true
            }
            Key::End => {
                self.end();
                true
            }
            Key::Left => {
                self.left();
                true
            }
            Key::Right => {
                self.right();
                true
            }
            _ => false,
        }
    }

    /// Put the cursor on a visible column, as a click does. Returns whether
    /// it moved.
    pub fn place_cursor(&mut self, column: usize) -> bool {
        let column = column.min(self.window);
        let moved = column != self.cursor;
        self.cursor = column;
        moved
    }

    const fn position(&self) -> usize {
        self.viewport + self.cursor
    }

    fn insert(&mut self, ch: char) -> bool {
        if self.buffer.len() >= self.max_len {
            return false;
        }
        let at = self.position().min(self.buffer.len());
        self.buffer.insert(at, ch);
        if self.cursor < self.window {
            self.cursor += 1;
        } else {
            self.viewport += 1;
        }
        true
    }

    fn delete(&mut self) -> bool {
        if self.position() < self.buffer.len() {
            self.buffer.remove(self.position());
            true
        } else {
            false
        }
    }

    fn backspace(&mut self) -> bool {
        let pos = self.position();
        if pos == 0 || pos > self.buffer.len() {
            return false;
        }
        self.buffer.remove(pos - 1);
        if self.cursor >= 2 {
            self.cursor -= 1;
        } else if self.buffer.len() < self.window {
            // Everything fits again; drop the scroll.
            self.cursor = pos - 1;
            self.viewport = 0;
        } else if self.viewport != 0 {
            // Page back, leaving the cursor one short of the right edge.
            self.viewport = if self.cursor == 1 {
                (self.viewport + 1).saturating_sub(self.window)
            } else {
                self.viewport.saturating_sub(self.window)
            };
            self.cursor = self.window - 1;
        } else {
            self.cursor = 0;
        }
        true
    }

    fn end(&mut self) {
        let len = self.buffer.len();
        if self.viewport + self.window > len {
            self.cursor = len.saturating_sub(self.viewport);
        } else {
            self.viewport = len - self.window;
            self.cursor = self.window;
        }
    }

    const fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.viewport != 0 {
            self.viewport = self.viewport.saturating_sub(self.window);
            self.cursor = self.window;
        }
    }

    fn right(&mut self) {
        let next = self.cursor + 1;
        if self.viewport + next > self.buffer.len() {
            return;
        }
        if next > self.window {
            self.viewport += self.window;
            self.cursor = 0;
        } else {
            self.cursor = next;
        }
    }
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

/// Draw the field at `(x, y)`: blank it, print the visible window of the
/// buffer (or asterisks in `password` mode), then the cursor glyph.
///
/// Every visible character is tagged with its offset into the window as
/// cell id. Wide glyphs take two cells, both tagged, and the text is cut
/// where the next glyph would run into the cursor cell.
pub fn draw_text_input(layer: &mut Layer, style: &TuiStyle, x: i32, y: i32, editor: &LineEditor, password: bool) {
    let mut attr = style.text_input_attr(&Attribute::default());
    attr.cell_type = CellType::TextInput;
    layer.print_at(&attr, x, y, &filled(editor.window + 1, " "));

    let text_cells = cells(editor.window);
    let mut column = 0;
    let mut cursor_column = None;
    let visible = editor.buffer.iter().skip(editor.viewport).take(editor.window);
    for (index, &ch) in visible.enumerate() {
        if index == editor.cursor {
            cursor_column = Some(column);
        }
        let ch = if password { '*' } else { ch };
        let span = if is_wide(ch) { 2 } else { 1 };
        if column + span > text_cells {
            break;
        }
        let tagged = attr.clone().with_cell_id(cells(index));
        layer.put_char(&tagged, x + column, y, ch);
        if span == 2 {
            if let Some(cell) = layer.get_mut(x + column + 1, y) {
                cell.attr.cell_id = tagged.cell_id;
            }
        }
        column += span;
    }
    let cursor_column = cursor_column.unwrap_or(column).min(text_cells);
    let cursor = style.cursor_attr(&Attribute::default());
    layer.put_char(&cursor, x + cursor_column, y, style.cursor_glyph);
}

// ─── Session Entry Point ─────────────────────────────────────────────────────

impl Session {
    /// Read a line of text in a field at `(x, y)` of a layer, `width` cells
    /// wide. Typing is refused once the text holds `max_len` characters.
    /// A primary click on the text moves the cursor there. `Enter` returns
    /// the text.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// Panics if the layer does not exist, `max_len` is zero, or `width` is
    /// less than 2.
    #[allow(clippy::too_many_arguments)]
    pub fn text_input(
        &mut self,
        layer_alias: &str,
        style: &TuiStyle,
        x: i32,
        y: i32,
        width: usize,
        max_len: usize,
        password: bool,
        default_value: &str,
    ) -> Result<String> {
        let mut editor = LineEditor::new(default_value, width, max_len);
        let input = Arc::clone(self.input());
        let mut redraw = true;
        loop {
            let mouse = input.mouse();
            if mouse.is_primary_pressed() {
                let column = self
                    .cell_at(layer_alias, mouse.x, mouse.y)
                    .filter(|c| c.attr.cell_type == CellType::TextInput)
                    .and_then(|c| usize::try_from(c.attr.cell_id).ok());
                if let Some(column) = column {
                    redraw |= editor.place_cursor(column);
                }
            }
            let key = input.pop_key();
            match key {
                Some(Key::Enter) => break,
                Some(key) => redraw |= editor.apply(key),
                None if !redraw => self.idle(),
                None => {}
            }
            if redraw {
                draw_text_input(self.layer_mut(layer_alias), style, x, y, &editor, password);
                self.update_display()?;
                redraw = false;
            }
        }
        self.layer_mut(layer_alias).clear_cell_ids(x, y, cells(width), 1);
        debug!(layer = layer_alias, chars = editor.buffer.len(), "text input confirmed");
        Ok(editor.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::cell::NULL_CELL_ID;
    use crate::config::SessionConfig;
    use crate::input::MouseState;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::time::Duration;

    fn session() -> (Session, MemoryBackend) {
        let (mut session, backend) =
            Session::with_memory_backend(SessionConfig::new(20, 1).with_poll_interval(Duration::ZERO));
        session.add_layer("form", 0, 0, 20, 1, 0, None);
        (session, backend)
    }

    fn typed(editor: &mut LineEditor, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            editor.apply(key);
        }
    }

    // ── editor ──

    #[test]
    fn typing_past_the_window_slides_it() {
        let mut editor = LineEditor::new("", 15, 20);
        typed(&mut editor, Key::chars("this is a test!"));
        assert_eq!((editor.viewport(), editor.cursor()), (1, 14));
    }

    #[test]
    fn edit_scenario() {
        let mut editor = LineEditor::new("", 15, 20);
        typed(&mut editor, Key::chars("this is a test!"));
        typed(&mut editor, [Key::Backspace; 5]);
        assert_eq!(editor.text(), "this is a ");
        typed(&mut editor, Key::chars("edit!"));
        typed(&mut editor, [Key::Home, Key::End]);
        assert_eq!(editor.text(), "this is a edit!");
        assert_eq!((editor.viewport(), editor.cursor()), (1, 14));
    }

    #[test]
    fn max_len_refuses_more() {
        let mut editor = LineEditor::new("", 10, 3);
        typed(&mut editor, Key::chars("abcdef"));
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn default_value_starts_at_end() {
        let editor = LineEditor::new("hello", 10, 20);
        assert_eq!((editor.viewport(), editor.cursor()), (0, 5));
        let editor = LineEditor::new("a long default", 5, 20);
        assert_eq!((editor.viewport(), editor.cursor()), (10, 4));
    }

    #[test]
    fn delete_and_backspace_at_edges() {
        let mut editor = LineEditor::new("ab", 10, 20);
        assert!(!editor.apply(Key::Delete));
        typed(&mut editor, [Key::Home]);
        assert!(!editor.apply(Key::Backspace));
        assert!(editor.apply(Key::Delete));
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut editor = LineEditor::new("ac", 10, 20);
        typed(&mut editor, [Key::Left, Key::Char('b')]);
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn left_and_right_page_through_long_text() {
        let mut editor = LineEditor::new("abcdefghij", 5, 20);
        assert_eq!((editor.viewport(), editor.cursor()), (6, 4));
        typed(&mut editor, [Key::Left; 5]);
        assert_eq!((editor.viewport(), editor.cursor()), (2, 4));
        typed(&mut editor, [Key::Right]);
        assert_eq!((editor.viewport(), editor.cursor()), (6, 0));
        // No moving past the end of the text.
        typed(&mut editor, [Key::Right; 10]);
        assert_eq!(editor.viewport() + editor.cursor(), 10);
    }

    #[test]
    fn backspace_pages_back_at_the_left_edge() {
        let mut editor = LineEditor::new("abcdefghij", 5, 20);
        typed(&mut editor, [Key::Left; 4]);
        assert_eq!((editor.viewport(), editor.cursor()), (6, 0));
        typed(&mut editor, [Key::Backspace]);
        assert_eq!(editor.text(), "abcdeghij");
        assert_eq!((editor.viewport(), editor.cursor()), (2, 3));
    }

    #[test]
    fn backspace_unscrolls_when_text_fits() {
        let mut editor = LineEditor::new("abcdef", 5, 20);
        assert_eq!((editor.viewport(), editor.cursor()), (2, 4));
        typed(&mut editor, [Key::Backspace; 3]);
        assert_eq!((editor.viewport(), editor.cursor()), (2, 1));
        typed(&mut editor, [Key::Backspace]);
        assert_eq!(editor.text(), "ab");
        assert_eq!((editor.viewport(), editor.cursor()), (0, 2));
    }

    #[test]
    #[should_panic(expected = "maximum input length must be positive")]
    fn zero_max_len_panics() {
        let _ = LineEditor::new("", 10, 0);
    }

    proptest! {
        #[test]
        fn cursor_stays_in_the_text(keys in proptest::collection::vec(
            prop_oneof![
                Just(Key::Left), Just(Key::Right), Just(Key::Home), Just(Key::End),
                Just(Key::Backspace), Just(Key::Delete), Just(Key::Char('x')),
            ],
            0..80,
        )) {
            let mut editor = LineEditor::new("seed", 6, 12);
            for key in keys {
                editor.apply(key);
                prop_assert!(editor.text().chars().count() <= 12);
                prop_assert!(editor.cursor() <= 5);
            }
        }
    }

    // ── drawing ──

    #[test]
    fn password_mode_masks_text() {
        let mut layer = Layer::new("form", 8, 1);
        let editor = LineEditor::new("pw", 6, 10);
        draw_text_input(&mut layer, &TuiStyle::default(), 1, 0, &editor, true);
        assert_eq!(layer.row_text(0), " **█    ");
        assert_eq!(layer.get(2, 0).unwrap().attr.cell_id, 1);
        assert_eq!(layer.get(2, 0).unwrap().attr.cell_type, CellType::TextInput);
        assert_eq!(layer.get(5, 0).unwrap().attr.cell_id, NULL_CELL_ID);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut layer = Layer::new("form", 6, 1);
        let editor = LineEditor::new("中文", 6, 10);
        draw_text_input(&mut layer, &TuiStyle::default(), 0, 0, &editor, false);
        assert_eq!(layer.char_at(0, 0), '中');
        assert_eq!(layer.char_at(2, 0), '文');
        assert_eq!(layer.char_at(4, 0), '█');
        assert_eq!(layer.get(1, 0).unwrap().attr.cell_id, 0);
        assert_eq!(layer.get(3, 0).unwrap().attr.cell_id, 1);
    }

    #[test]
    fn wide_glyph_that_would_reach_the_cursor_cell_is_cut() {
        let mut layer = Layer::new("form", 4, 1);
        let mut editor = LineEditor::new("ab中", 4, 10);
        editor.apply(Key::Home);
        draw_text_input(&mut layer, &TuiStyle::default(), 0, 0, &editor, false);
        assert_eq!(layer.row_text(0), "█b  ");
        assert_eq!(layer.get(2, 0).unwrap().attr.cell_id, NULL_CELL_ID);
    }

    // ── session ──

    #[test]
    fn scenario_returns_edited_text() {
        let (mut session, backend) = session();
        let input = Arc::clone(session.input());
        input.push_keys(Key::chars("this is a test!"));
        input.push_keys([Key::Backspace; 5]);
        input.push_keys(Key::chars("edit!"));
        input.push_keys([Key::Home, Key::End, Key::Enter]);

        let text = session
            .text_input("form", &TuiStyle::default(), 0, 0, 15, 20, false, "")
            .unwrap();
        assert_eq!(text, "this is a edit!");
        let frame = backend.last_frame().unwrap();
        assert_eq!(frame.row_text(0).trim_end(), "his is a edit!█");
        assert!(session.layer("form").cells().iter().all(|c| c.attr.cell_id == NULL_CELL_ID));
    }

    #[test]
    fn click_moves_the_cursor() {
        let (mut session, _) = session();
        let style = TuiStyle::default();
        // The field as a previous round left it, so the click has ids to hit.
        draw_text_input(session.layer_mut("form"), &style, 0, 0, &LineEditor::new("hello", 10, 20), false);
        session.input().set_mouse(MouseState::new(1, 0, MouseState::PRIMARY));
        session.input().push_keys([Key::Char('X'), Key::Enter]);

        let text = session.text_input("form", &style, 0, 0, 10, 20, false, "hello").unwrap();
        assert_eq!(text, "hXello");
    }

    #[test]
    fn default_value_is_returned_untouched() {
        let (mut session, _) = session();
        session.input().push_key(Key::Enter);
        let text = session
            .text_input("form", &TuiStyle::default(), 0, 0, 10, 20, true, "secret")
            .unwrap();
        assert_eq!(text, "secret");
    }
}
