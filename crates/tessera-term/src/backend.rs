// SPDX-License-Identifier: MIT
//
// Backends: where composited frames go.
//
//   MemoryBackend   keeps every presented frame in memory behind a shared
//                   handle. Tests and scripted runs inspect it.
//   AnsiBackend     encodes a frame as 24-bit ANSI escape sequences into any
//                   `Write`. The whole frame is built in memory and written
//                   with one `write_all`, and color or style sequences are
//                   only emitted when they differ from the previous cell.
//
// Terminal setup (raw mode, alternate screen, mouse reporting) belongs to
// the driver that owns the terminal, not to the backend.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ansi;
use crate::cell::{Cell, Style};
use crate::color::Rgb;
use crate::error::Result;
use crate::layer::Layer;
use crate::text::is_wide;

/// A sink for composited frames.
pub trait Backend {
    /// Show `frame`. Called once per display update.
    fn present(&mut self, frame: &Layer) -> Result<()>;
}

// ─── MemoryBackend ───────────────────────────────────────────────────────────

/// Records presented frames. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    frames: Arc<Mutex<Vec<Layer>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.lock().len()
    }

    /// The most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<Layer> {
        self.lock().last().cloned()
    }

    /// Every presented frame, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<Layer> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Layer>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for MemoryBackend {
    fn present(&mut self, frame: &Layer) -> Result<()> {
        self.lock().push(frame.clone());
        Ok(())
    }
}

// ─── AnsiBackend ─────────────────────────────────────────────────────────────

/// Writes frames as ANSI text.
///
/// Each frame starts with the cursor hidden and homed, every row is
/// addressed explicitly, and attributes are reset at the end. Transparent
/// cells print as spaces in their own colors.
#[derive(Debug)]
pub struct AnsiBackend<W: Write> {
    out: W,
    buf: Vec<u8>,
}

/// Style state already sent to the terminal within one frame.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: Style,
}

impl Pen {
    fn apply(&mut self, buf: &mut Vec<u8>, cell: &Cell) -> std::io::Result<()> {
        if cell.attr.style != self.style {
            if !self.style.is_empty() {
                // SGR 0 clears colors too.
                ansi::reset(buf)?;
                self.fg = None;
                self.bg = None;
            }
            ansi::style(buf, cell.attr.style)?;
            self.style = cell.attr.style;
        }
        if self.fg != Some(cell.attr.fg) {
            ansi::fg(buf, cell.attr.fg)?;
            self.fg = Some(cell.attr.fg);
        }
        if self.bg != Some(cell.attr.bg) {
            ansi::bg(buf, cell.attr.bg)?;
            self.bg = Some(cell.attr.bg);
        }
        Ok(())
    }
}

impl<W: Write> AnsiBackend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(16_384),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn encode(&mut self, frame: &Layer) -> std::io::Result<()> {
        let buf = &mut self.buf;
        buf.clear();
        ansi::cursor_hide(buf)?;
        let mut pen = Pen::default();
        for y in 0..frame.height() {
            ansi::cursor_to(buf, 0, y)?;
            let Some(row) = frame.row(y) else { continue };
            let mut cells = row.iter();
            while let Some(cell) = cells.next() {
                pen.apply(buf, cell)?;
                let ch = if cell.is_transparent() { ' ' } else { cell.ch };
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                // The terminal already advanced over the second column.
                if is_wide(ch) {
                    cells.next();
                }
            }
        }
        ansi::reset(buf)
    }
}

impl<W: Write> Backend for AnsiBackend<W> {
    fn present(&mut self, frame: &Layer) -> Result<()> {
        self.encode(frame)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}
