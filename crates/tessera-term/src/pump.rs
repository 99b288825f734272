// SPDX-License-Identifier: MIT
//
// Input pump: a background thread that moves decoded input from an event
// source into the shared `InputBuffers`.
//
// Widget loops never block on input. They pop whatever the pump has queued
// and sleep briefly when nothing is there, so the pump is the only place
// that waits on the outside world.
//
// Shutdown: the source is polled with a short timeout and the stop flag is
// checked between polls, so `stop()` returns within one poll interval. A
// source error (or a disconnected channel) ends the thread; the error is
// logged since there is nobody to return it to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::input::{InputBuffers, Key, MouseState};

/// One decoded input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Mouse(MouseState),
}

/// Something that produces decoded input, such as a terminal driver.
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    ///
    /// `Ok(None)` means the timeout passed quietly. An error ends polling
    /// for good.
    fn poll(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

// ─── ChannelSource ───────────────────────────────────────────────────────────

/// An event source fed through an mpsc channel.
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<InputEvent>,
}

impl ChannelSource {
    /// A connected sender and source pair.
    #[must_use]
    pub fn channel() -> (Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl From<Receiver<InputEvent>> for ChannelSource {
    fn from(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::SourceClosed),
        }
    }
}

// ─── InputPump ───────────────────────────────────────────────────────────────

/// Background thread pumping an [`EventSource`] into [`InputBuffers`].
///
/// The thread runs until [`stop`](Self::stop) is called, the pump is
/// dropped, or the source fails.
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tessera_term::input::{InputBuffers, Key};
/// use tessera_term::pump::{ChannelSource, InputEvent, InputPump};
///
/// let buffers = Arc::new(InputBuffers::new());
/// let (tx, source) = ChannelSource::channel();
/// let pump = InputPump::spawn(source, Arc::clone(&buffers), Duration::from_millis(5));
///
/// tx.send(InputEvent::Key(Key::Enter)).unwrap();
/// drop(tx); // disconnecting ends the pump after the queue drains
/// pump.join();
/// assert_eq!(buffers.pop_key(), Some(Key::Enter));
/// ```
#[derive(Debug)]
pub struct InputPump {
    /// `None` after the thread has been joined.
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl InputPump {
    /// Start pumping `source` into `buffers`, polling with `timeout`.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a new thread.
    #[must_use]
    pub fn spawn<S: EventSource>(source: S, buffers: Arc<InputBuffers>, timeout: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("input-pump".into())
            .spawn(move || pump_loop(source, &buffers, &stop_flag, timeout))
            .expect("failed to spawn input pump thread");
        Self {
            handle: Some(handle),
            stop,
        }
    }

    /// Whether the thread is still pumping.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread to stop and wait for it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.join_thread();
    }

    /// Wait for the thread to end on its own (source error or disconnect).
    pub fn join(mut self) {
        self.join_thread();
    }

    fn join_thread(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.stop();
    }
}

fn pump_loop<S: EventSource>(mut source: S, buffers: &InputBuffers, stop: &AtomicBool, timeout: Duration) {
    while !stop.load(Ordering::Relaxed) {
        match source.poll(timeout) {
            Ok(Some(InputEvent::Key(key))) => {
                trace!(%key, "key pumped");
                buffers.push_key(key);
            }
            Ok(Some(InputEvent::Mouse(mouse))) => {
                trace!(x = mouse.x, y = mouse.y, buttons = mouse.buttons, "mouse pumped");
                buffers.set_mouse(mouse);
            }
            Ok(None) => {}
            Err(Error::SourceClosed) => {
                trace!("input source closed");
                break;
            }
            Err(err) => {
                warn!(error = %err, "input source failed, stopping pump");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    const TICK: Duration = Duration::from_millis(5);

    #[test]
    fn channel_source_reports_timeout_and_disconnect() {
        let (tx, mut source) = ChannelSource::channel();
        assert!(matches!(source.poll(TICK), Ok(None)));
        tx.send(InputEvent::Key(Key::Up)).unwrap();
        assert_eq!(source.poll(TICK).unwrap(), Some(InputEvent::Key(Key::Up)));
        drop(tx);
        assert!(matches!(source.poll(TICK), Err(Error::SourceClosed)));
    }

    #[test]
    fn pump_delivers_keys_in_order_and_latest_mouse() {
        let buffers = Arc::new(InputBuffers::new());
        let (tx, source) = ChannelSource::channel();
        let pump = InputPump::spawn(source, Arc::clone(&buffers), TICK);

        for key in Key::chars("abc") {
            tx.send(InputEvent::Key(key)).unwrap();
        }
        tx.send(InputEvent::Mouse(MouseState::new(1, 1, 0))).unwrap();
        tx.send(InputEvent::Mouse(MouseState::new(7, 3, 1))).unwrap();
        drop(tx);
        pump.join();

        let keys: Vec<Key> = std::iter::from_fn(|| buffers.pop_key()).collect();
        assert_eq!(keys, Key::chars("abc").collect::<Vec<_>>());
        assert_eq!(buffers.mouse(), MouseState::new(7, 3, 1));
    }

    #[test]
    fn stop_is_idempotent_and_prompt() {
        let (_tx, source) = ChannelSource::channel();
        let mut pump = InputPump::spawn(source, Arc::new(InputBuffers::new()), TICK);
        assert!(pump.is_running());
        pump.stop();
        pump.stop();
        assert!(!pump.is_running());
    }

    struct Failing;

    impl EventSource for Failing {
        fn poll(&mut self, _timeout: Duration) -> Result<Option<InputEvent>> {
            Err(io::Error::other("device gone").into())
        }
    }

    #[test]
    fn source_error_ends_thread() {
        let pump = InputPump::spawn(Failing, Arc::new(InputBuffers::new()), TICK);
        pump.join(); // must not hang
    }

    #[test]
    fn drop_stops_pump() {
        let (_tx, source) = ChannelSource::channel();
        drop(InputPump::spawn(source, Arc::new(InputBuffers::new()), TICK));
    }
}
