// SPDX-License-Identifier: MIT
//
// Session: the context object every screen operation goes through.
//
// A session owns the layer registry, the buttons, the named text styles and
// timers, the backend that frames are presented to, and the last frame it
// presented. Input arrives through an `Arc<InputBuffers>` that a pump thread
// (or a test) fills from the outside.
//
// Everything here runs on the caller's thread. The only waiting is bounded
// sleep: `idle()` between input polls and the pacing delay of
// `print_dialog`.
//
// The interactive widgets (menus, text input) are further `impl Session`
// blocks in `crate::widgets`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::backend::{Backend, MemoryBackend};
use crate::button::{Button, Buttons};
use crate::cell::{Cell, NULL_CELL_ID};
use crate::compositor;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::input::{InputBuffers, Key};
use crate::layer::Layer;
use crate::pump::{EventSource, InputPump};
use crate::registry::{ROOT_ALIAS, Registry};
use crate::style::TextStyles;
use crate::text::is_wide;
use crate::timer::Timers;

/// Owner of all screen state for one display.
pub struct Session {
    registry: Registry,
    buttons: Buttons,
    text_styles: TextStyles,
    timers: Timers,
    input: Arc<InputBuffers>,
    backend: Box<dyn Backend>,
    /// The frame most recently presented.
    frame: Layer,
    config: SessionConfig,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("layers", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session presenting to `backend`.
    ///
    /// # Panics
    ///
    /// Panics if the configured screen width or height is zero.
    pub fn new(backend: impl Backend + 'static, config: SessionConfig) -> Self {
        assert!(
            config.width > 0 && config.height > 0,
            "screen size {}x{} is invalid",
            config.width,
            config.height
        );
        Self {
            registry: Registry::new(),
            buttons: Buttons::new(),
            text_styles: TextStyles::new(),
            timers: Timers::new(),
            input: Arc::new(InputBuffers::new()),
            backend: Box::new(backend),
            frame: Layer::new(ROOT_ALIAS, config.width, config.height),
            config,
        }
    }

    /// A session that records its frames in memory, plus a handle to them.
    ///
    /// # Panics
    ///
    /// Panics if the configured screen width or height is zero.
    #[must_use]
    pub fn with_memory_backend(config: SessionConfig) -> (Self, MemoryBackend) {
        let backend = MemoryBackend::new();
        (Self::new(backend.clone(), config), backend)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The layer named `alias`.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    #[must_use]
    pub fn layer(&self, alias: &str) -> &Layer {
        self.registry.layer(alias)
    }

    /// # Panics
    ///
    /// Panics if no such layer exists.
    pub fn layer_mut(&mut self, alias: &str) -> &mut Layer {
        self.registry.layer_mut(alias)
    }

    #[inline]
    #[must_use]
    pub const fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    #[inline]
    pub const fn buttons_mut(&mut self) -> &mut Buttons {
        &mut self.buttons
    }

    #[inline]
    #[must_use]
    pub const fn text_styles(&self) -> &TextStyles {
        &self.text_styles
    }

    #[inline]
    pub const fn text_styles_mut(&mut self) -> &mut TextStyles {
        &mut self.text_styles
    }

    #[inline]
    pub const fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// The shared input buffers. Clone the `Arc` to feed them from another
    /// thread.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> &Arc<InputBuffers> {
        &self.input
    }

    /// The frame most recently presented.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> &Layer {
        &self.frame
    }

    // ─── Layers & Buttons ────────────────────────────────────────────────

    /// Create a layer. See [`Registry::add_layer`].
    ///
    /// # Panics
    ///
    /// Panics on a non-positive size, an empty alias, or an unknown parent.
    #[allow(clippy::too_many_arguments)]
    pub fn add_layer(
        &mut self,
        alias: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        z_order: i32,
        parent: Option<&str>,
    ) -> &mut Layer {
        self.registry.add_layer(alias, x, y, width, height, z_order, parent)
    }

    /// Delete a layer, everything nested under it, and all of their
    /// buttons. Returns how many layers were removed.
    pub fn delete_layer(&mut self, alias: &str) -> usize {
        let mut doomed = vec![alias.to_owned()];
        let mut next = 0;
        while next < doomed.len() {
            let kids: Vec<String> = self.registry.children(&doomed[next]).map(str::to_owned).collect();
            doomed.extend(kids);
            next += 1;
        }
        for layer in &doomed {
            self.buttons.remove_layer(layer);
        }
        self.registry.delete_layer(alias)
    }

    /// Register a button on an existing layer.
    ///
    /// # Panics
    ///
    /// Panics if no layer named `layer_alias` exists.
    pub fn add_button(&mut self, layer_alias: &str, button: Button) {
        assert!(
            self.registry.contains(layer_alias),
            "cannot add button '{}': layer '{layer_alias}' does not exist",
            button.alias
        );
        self.buttons.add(layer_alias, button);
    }

    // ─── Display ─────────────────────────────────────────────────────────

    /// Composite every visible layer and present the result.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    pub fn update_display(&mut self) -> Result<()> {
        let frame = compositor::render(&self.registry, &self.buttons, self.config.width, self.config.height);
        self.backend.present(&frame)?;
        trace!(layers = self.registry.len(), "display updated");
        self.frame = frame;
        Ok(())
    }

    /// Press or release buttons according to the mouse, redrawing when
    /// anything changed. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with while redrawing.
    pub fn update_button_states(&mut self) -> Result<bool> {
        let changed = self.buttons.update_states(self.input.mouse(), &self.frame);
        if changed {
            self.update_display()?;
        }
        Ok(changed)
    }

    // ─── Hit Testing ─────────────────────────────────────────────────────

    /// Cell id under the mouse in the last presented frame.
    #[must_use]
    pub fn cell_id_under_mouse(&self) -> i32 {
        let mouse = self.input.mouse();
        self.frame.get(mouse.x, mouse.y).map_or(NULL_CELL_ID, |c| c.attr.cell_id)
    }

    /// The stored cell of `layer_alias` at screen position `(sx, sy)`.
    ///
    /// Nested layers are resolved through their parents' offsets. Cells
    /// covered by other layers still count.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    #[must_use]
    pub fn cell_at(&self, layer_alias: &str, sx: i32, sy: i32) -> Option<&Cell> {
        let (ox, oy) = self.registry.screen_origin(layer_alias);
        self.registry.layer(layer_alias).get(sx - ox, sy - oy)
    }

    /// Cell id of `layer_alias` at screen position `(sx, sy)`, or
    /// [`NULL_CELL_ID`] when untagged or outside the layer.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    #[must_use]
    pub fn cell_id_at(&self, layer_alias: &str, sx: i32, sy: i32) -> i32 {
        self.cell_at(layer_alias, sx, sy).map_or(NULL_CELL_ID, |c| c.attr.cell_id)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Start a pump thread feeding `source` into this session's input.
    pub fn spawn_input_pump<S: EventSource>(&self, source: S) -> InputPump {
        InputPump::spawn(source, Arc::clone(&self.input), self.config.pump_timeout)
    }

    /// Sleep for one poll interval. Widget loops call this when no input is
    /// queued.
    pub fn idle(&self) {
        thread::sleep(self.config.poll_interval);
    }

    // ─── Dialog ──────────────────────────────────────────────────────────

    /// Typewriter-print `text` into a layer, one character every `delay`.
    ///
    /// Lines wrap before a word that would run past `line_width` columns
    /// from `x`, or past the layer edge. Printing past the last row keeps
    /// overwriting that row.
    ///
    /// `{alias}` switches to the registered [`TextStyle`](crate::style::TextStyle)
    /// of that name and `{}` back to the layer's default attribute. An
    /// unknown alias also falls back to the default.
    ///
    /// A `skippable` dialog stops pacing, and prints the rest at once, on
    /// `Enter` or any mouse button.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend fails with.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists or `(x, y)` lies outside it.
    #[allow(clippy::too_many_arguments)]
    pub fn print_dialog(
        &mut self,
        layer_alias: &str,
        x: i32,
        y: i32,
        line_width: i32,
        delay: Duration,
        skippable: bool,
        text: &str,
    ) -> Result<()> {
        let layer = self.registry.layer(layer_alias);
        let (width, height) = (i32::from(layer.width()), i32::from(layer.height()));
        assert!(
            (0..=width).contains(&x) && (0..=height).contains(&y),
            "dialog start ({x}, {y}) is outside layer '{layer_alias}' of size {width}x{height}"
        );
        let default_attr = layer.default_attr.clone();
        let mut attr = default_attr.clone();

        let chars: Vec<char> = text.chars().collect();
        let (mut cx, mut cy) = (x, y);
        let mut skipped = false;
        let mut i = 0;
        while i < chars.len() {
            if let Some((tag, end)) = markup_tag(&chars, i) {
                attr = self
                    .text_styles
                    .attribute(&tag)
                    .unwrap_or_else(|| default_attr.clone());
                i = end;
                continue;
            }
            let ch = chars[i];
            self.registry.layer_mut(layer_alias).put_char(&attr, cx, cy, ch);
            cx += if is_wide(ch) { 2 } else { 1 };

            let next_word = if ch == ' ' { next_word_len(&chars, i + 1) } else { 0 };
            if cx + next_word - x >= line_width || cx + next_word >= width {
                cx = x;
                cy = (cy + 1).min(height - 1);
            }

            if skippable && !skipped {
                let pressed = self.input.mouse().is_pressed();
                if pressed || self.input.pop_key() == Some(Key::Enter) {
                    debug!(layer = layer_alias, "dialog pacing skipped");
                    skipped = true;
                }
            }
            if !skipped {
                thread::sleep(delay);
                self.update_display()?;
            }
            i += 1;
        }
        self.update_display()
    }
}

/// The `{alias}` markup starting at `start`, with the index just past its
/// closing brace. `None` when there is no complete tag there.
fn markup_tag(chars: &[char], start: usize) -> Option<(String, usize)> {
    if chars.get(start) != Some(&'{') {
        return None;
    }
    let close = chars[start + 1..].iter().position(|&c| c == '}')?;
    let tag = chars[start + 1..start + 1 + close].iter().collect();
    Some((tag, start + close + 2))
}

/// Printed columns of the word starting at `start`, ignoring markup.
fn next_word_len(chars: &[char], start: usize) -> i32 {
    let mut len = 0;
    let mut i = start;
    while i < chars.len() && chars[i] != ' ' {
        if let Some((_, end)) = markup_tag(chars, i) {
            i = end;
            continue;
        }
        len += if is_wide(chars[i]) { 2 } else { 1 };
        i += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Attribute, CellType};
    use crate::color::Rgb;
    use crate::input::MouseState;
    use crate::layer::Rect;
    use crate::style::{TextStyle, TuiStyle};
    use pretty_assertions::assert_eq;

    fn session(width: u16, height: u16) -> (Session, MemoryBackend) {
        Session::with_memory_backend(SessionConfig::new(width, height).with_poll_interval(Duration::ZERO))
    }

    // ── display ──

    #[test]
    fn update_display_presents_and_keeps_the_frame() {
        let (mut session, backend) = session(10, 2);
        session.add_layer("a", 2, 1, 3, 1, 0, None).print_at(&Attribute::default(), 0, 0, "abc");
        session.update_display().unwrap();

        assert_eq!(backend.frame_count(), 1);
        assert_eq!(session.frame().row_text(1), "  abc     ");
        assert_eq!(backend.last_frame().unwrap().row_text(1), "  abc     ");
    }

    #[test]
    #[should_panic(expected = "screen size 0x5 is invalid")]
    fn zero_screen_panics() {
        let _ = session(0, 5);
    }

    // ── hit testing ──

    #[test]
    fn cell_id_at_resolves_nested_origins() {
        let (mut session, _) = session(20, 10);
        session.add_layer("parent", 5, 2, 10, 5, 0, None);
        session
            .add_layer("child", 1, 1, 3, 3, 0, Some("parent"))
            .put_char(&Attribute::default().with_cell_id(7), 0, 0, 'x');

        assert_eq!(session.cell_id_at("child", 6, 3), 7);
        assert_eq!(session.cell_id_at("child", 7, 3), NULL_CELL_ID);
        assert_eq!(session.cell_id_at("child", 0, 0), NULL_CELL_ID);
    }

    #[test]
    fn cell_id_under_mouse_reads_the_last_frame() {
        let (mut session, _) = session(10, 3);
        session
            .add_layer("a", 0, 0, 10, 3, 0, None)
            .put_char(&Attribute::default().with_cell_id(3), 4, 1, 'x');
        session.input().set_mouse(MouseState::new(4, 1, 0));
        // Nothing presented yet.
        assert_eq!(session.cell_id_under_mouse(), NULL_CELL_ID);
        session.update_display().unwrap();
        assert_eq!(session.cell_id_under_mouse(), 3);
    }

    // ── layers & buttons ──

    #[test]
    fn delete_layer_drops_nested_buttons() {
        let (mut session, _) = session(20, 10);
        session.add_layer("win", 0, 0, 20, 10, 0, None);
        session.add_layer("pane", 0, 0, 10, 5, 0, Some("win"));
        session.add_button("pane", Button::new("ok", "OK", TuiStyle::default(), Rect::new(0, 0, 6, 3)));

        assert_eq!(session.delete_layer("win"), 2);
        assert!(session.buttons().get("pane", "ok").is_none());
        assert_eq!(session.delete_layer("win"), 0);
    }

    #[test]
    #[should_panic(expected = "layer 'nowhere' does not exist")]
    fn button_on_unknown_layer_panics() {
        let (mut session, _) = session(10, 5);
        session.add_button("nowhere", Button::new("ok", "OK", TuiStyle::default(), Rect::new(0, 0, 6, 3)));
    }

    #[test]
    fn button_press_and_release_redraw() {
        let (mut session, backend) = session(20, 5);
        session.add_layer("dlg", 0, 0, 20, 5, 0, None);
        session.add_button("dlg", Button::new("ok", "OK", TuiStyle::default(), Rect::new(1, 1, 6, 3)));
        session.update_display().unwrap();
        let cell = session.frame().get(2, 2).unwrap();
        assert_eq!(cell.attr.cell_type, CellType::Button);

        session.input().set_mouse(MouseState::new(2, 2, 1));
        assert!(session.update_button_states().unwrap());
        assert!(session.buttons().get("dlg", "ok").unwrap().pressed);
        assert!(!session.update_button_states().unwrap());

        session.input().set_mouse(MouseState::new(2, 2, 0));
        assert!(session.update_button_states().unwrap());
        assert!(!session.buttons().get("dlg", "ok").unwrap().pressed);
        assert_eq!(backend.frame_count(), 3);
    }

    // ── dialog ──

    #[test]
    fn dialog_wraps_before_long_words() {
        let (mut session, backend) = session(20, 5);
        session.add_layer("d", 0, 0, 20, 5, 0, None);
        session
            .print_dialog("d", 0, 0, 10, Duration::ZERO, false, "hello big world")
            .unwrap();

        let layer = session.layer("d");
        assert_eq!(layer.row_text(0).trim_end(), "hello big");
        assert_eq!(layer.row_text(1).trim_end(), "world");
        // One frame per character plus the final one.
        assert_eq!(backend.frame_count(), 16);
    }

    #[test]
    fn dialog_wraps_at_the_layer_edge() {
        let (mut session, _) = session(8, 3);
        session.add_layer("d", 0, 0, 8, 3, 0, None);
        session.print_dialog("d", 2, 0, 40, Duration::ZERO, false, "ab cdef").unwrap();
        assert_eq!(session.layer("d").row_text(0), "  ab    ");
        assert_eq!(session.layer("d").row_text(1), "  cdef  ");
    }

    #[test]
    fn dialog_markup_switches_styles() {
        let red = Rgb::new(255, 0, 0);
        let (mut session, _) = session(10, 1);
        session.add_layer("d", 0, 0, 10, 1, 0, None);
        session
            .text_styles_mut()
            .add("red", TextStyle::with_colors(red, Rgb::BLACK));
        session
            .print_dialog("d", 0, 0, 10, Duration::ZERO, false, "a{red}b{}c{nope}d")
            .unwrap();

        let layer = session.layer("d");
        assert_eq!(layer.row_text(0), "abcd      ");
        let default_fg = layer.default_attr.fg;
        let fgs: Vec<Rgb> = (0..4).map(|x| layer.get(x, 0).unwrap().attr.fg).collect();
        assert_eq!(fgs, vec![default_fg, red, default_fg, default_fg]);
    }

    #[test]
    fn dialog_keeps_overwriting_the_last_row() {
        let (mut session, _) = session(4, 1);
        session.add_layer("d", 0, 0, 4, 1, 0, None);
        session.print_dialog("d", 0, 0, 2, Duration::ZERO, false, "abcd").unwrap();
        assert_eq!(session.layer("d").row_text(0), "cd  ");
    }

    #[test]
    fn skippable_dialog_stops_pacing_on_enter() {
        let (mut session, backend) = session(20, 1);
        session.add_layer("d", 0, 0, 20, 1, 0, None);
        session.input().push_keys([Key::Enter, Key::Char('z')]);
        session
            .print_dialog("d", 0, 0, 20, Duration::from_secs(60), true, "no waiting")
            .unwrap();

        assert_eq!(session.layer("d").row_text(0).trim_end(), "no waiting");
        assert_eq!(backend.frame_count(), 1);
        // Keys after the skip are left alone.
        assert_eq!(session.input().pop_key(), Some(Key::Char('z')));
    }

    #[test]
    #[should_panic(expected = "dialog start (11, 0) is outside layer 'd'")]
    fn dialog_start_outside_layer_panics() {
        let (mut session, _) = session(10, 1);
        session.add_layer("d", 0, 0, 10, 1, 0, None);
        let _ = session.print_dialog("d", 11, 0, 10, Duration::ZERO, false, "x");
    }

    #[test]
    fn markup_parsing() {
        let chars: Vec<char> = "{bold}x{".chars().collect();
        assert_eq!(markup_tag(&chars, 0), Some(("bold".to_owned(), 6)));
        assert_eq!(markup_tag(&chars, 6), None);
        assert_eq!(markup_tag(&chars, 7), None);
        let chars: Vec<char> = " a{b}cd e".chars().collect();
        assert_eq!(next_word_len(&chars, 1), 3);
    }
}
