// SPDX-License-Identifier: MIT
//
// tessera-term: layer compositing and interactive widgets for text
// terminals.
//
// Screens are built from layers: rectangular grids of styled cells with a
// position, a z-order and an optional parent. Every display update
// composites the visible layers, back to front, into a fresh frame.
// Transparent cells let lower layers show through or darken them (shadows),
// and per-cell blend factors tint what lies below. Box-drawing glyphs merge
// where frames touch, so windows and dividers join cleanly.
//
// On top of the compositor sit the interactive pieces: menus, a text input,
// push buttons and a typewriter dialog. They read keys and mouse state from
// lock-guarded buffers that a background pump fills, and present frames
// through a `Backend`: in memory for tests, ANSI escape sequences for a
// real terminal.
//
// All state lives in a `Session`. There are no globals.

pub mod ansi;
pub mod backend;
pub mod button;
pub mod cell;
pub mod color;
pub mod compositor;
pub mod config;
pub mod connector;
pub mod draw;
pub mod error;
pub mod input;
pub mod layer;
pub mod pump;
pub mod registry;
pub mod scramble;
pub mod session;
pub mod style;
pub mod text;
pub mod timer;
pub mod widgets;

pub use backend::{AnsiBackend, Backend, MemoryBackend};
pub use cell::{Attribute, Cell, CellType, Style};
pub use color::Rgb;
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use input::{InputBuffers, Key, MouseState};
pub use layer::{Layer, Rect};
pub use registry::Registry;
pub use session::Session;
pub use style::{TextStyle, TuiStyle};
pub use widgets::Selection;
