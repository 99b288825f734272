// SPDX-License-Identifier: MIT
//
// Input buffers: the hand-off point between whoever produces input and the
// widgets that consume it.
//
// Producers (the `InputPump` thread, tests, scripted demos) push decoded
// keys and the latest mouse state; the widget loops pop keys one at a time
// and sample the mouse. Both sides share one `Arc<InputBuffers>`.
//
// - Keys queue in order (FIFO). Nothing is ever dropped.
// - The mouse is a single record, last write wins. Pointer motion only
//   matters at its most recent position.
// - Each mutex is held for exactly one read or write. A panic while holding
//   it cannot leave the data half-updated, so poisoned locks are recovered.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// A decoded keystroke.
///
/// Named keys have lowercase token names (`"enter"`, `"esc"`, `"left"`,
/// `"f5"`) that round-trip through [`FromStr`] and [`Display`]. Any single
/// character parses as [`Key::Char`].
///
/// ```
/// use tessera_term::input::Key;
///
/// assert_eq!("enter".parse::<Key>(), Ok(Key::Enter));
/// assert_eq!("x".parse::<Key>(), Ok(Key::Char('x')));
/// assert_eq!(Key::F(5).to_string(), "f5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// F1 through F64.
    F(u8),
}

impl Key {
    /// One [`Key::Char`] per character of `text`, for scripted typing.
    pub fn chars(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().map(Self::Char)
    }
}

/// A token that names no key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key token '{0}'")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(ch));
        }
        let key = match token {
            "enter" => Self::Enter,
            "esc" | "escape" => Self::Escape,
            // Terminals disagree on which byte backspace sends; both names
            // mean the same key here.
            "backspace" | "backspace2" => Self::Backspace,
            "delete" => Self::Delete,
            "tab" => Self::Tab,
            "backtab" => Self::BackTab,
            "insert" => Self::Insert,
            "home" => Self::Home,
            "end" => Self::End,
            "pgup" => Self::PageUp,
            "pgdn" => Self::PageDown,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => {
                return token
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=64).contains(n))
                    .map(Self::F)
                    .ok_or_else(|| ParseKeyError(token.to_owned()));
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Char(ch) => return write!(f, "{ch}"),
            Self::F(n) => return write!(f, "f{n}"),
            Self::Enter => "enter",
            Self::Escape => "esc",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Tab => "tab",
            Self::BackTab => "backtab",
            Self::Insert => "insert",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pgup",
            Self::PageDown => "pgdn",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

// ─── Mouse ───────────────────────────────────────────────────────────────────

/// Scroll wheel direction of the latest mouse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wheel {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// The most recent mouse report.
///
/// `buttons` is a bit mask: bit 0 is the primary button. Zero means no
/// button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
    pub wheel: Wheel,
}

impl MouseState {
    /// The primary button.
    pub const PRIMARY: u8 = 1;

    /// No position, no buttons.
    pub const CLEARED: Self = Self {
        x: -1,
        y: -1,
        buttons: 0,
        wheel: Wheel::None,
    };

    #[must_use]
    pub const fn new(x: i32, y: i32, buttons: u8) -> Self {
        Self {
            x,
            y,
            buttons,
            wheel: Wheel::None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.buttons != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_primary_pressed(&self) -> bool {
        self.buttons & Self::PRIMARY != 0
    }

    /// Whether the pointer lies in the box from `(x, y)` to
    /// `(x + width, y + height)`, far edges included.
    #[must_use]
    pub const fn is_in_box(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        self.x >= x && self.x <= x + width && self.y >= y && self.y <= y + height
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::CLEARED
    }
}

// ─── InputBuffers ────────────────────────────────────────────────────────────

/// Thread-safe key queue plus mouse record.
#[derive(Debug, Default)]
pub struct InputBuffers {
    keys: Mutex<VecDeque<Key>>,
    mouse: Mutex<MouseState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InputBuffers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&self, key: Key) {
        lock(&self.keys).push_back(key);
    }

    /// Queue several keys atomically, in order.
    pub fn push_keys(&self, keys: impl IntoIterator<Item = Key>) {
        lock(&self.keys).extend(keys);
    }

    /// Take the oldest queued key without blocking.
    #[must_use]
    pub fn pop_key(&self) -> Option<Key> {
        lock(&self.keys).pop_front()
    }

    #[must_use]
    pub fn pending_keys(&self) -> usize {
        lock(&self.keys).len()
    }

    pub fn clear_keys(&self) {
        lock(&self.keys).clear();
    }

    pub fn set_mouse(&self, state: MouseState) {
        *lock(&self.mouse) = state;
    }

    #[must_use]
    pub fn mouse(&self) -> MouseState {
        *lock(&self.mouse)
    }

    /// Reset the mouse record to [`MouseState::CLEARED`].
    pub fn clear_mouse(&self) {
        self.set_mouse(MouseState::CLEARED);
    }

    /// See [`MouseState::is_in_box`].
    #[must_use]
    pub fn is_mouse_in_box(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        self.mouse().is_in_box(x, y, width, height)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
