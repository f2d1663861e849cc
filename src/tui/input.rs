//! Keyboard listener thread.
//!
//! Terminals deliver key-down (and repeat) events with no key-up, which
//! is exactly what the keypad debouncer expects: the listener forwards
//! every mapped press and runs the stale-release scan on each pass,
//! independently of the VM clock.

use crate::keypad::{map_key, Keypad};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Background thread turning crossterm key events into keypad presses.
///
/// Esc or Ctrl-C raises the quit flag the run loop polls; game keys are
/// the literal hex characters `0-9` and `a-f`.
pub struct KeyListener {
    handle: Option<thread::JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
}

impl KeyListener {
    /// Put the terminal in raw mode and start listening.
    pub fn spawn(keypad: Keypad) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let stop = Arc::new(AtomicBool::new(false));
        let quit = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let thread_quit = Arc::clone(&quit);

        let handle = thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                if let Ok(true) = event::poll(POLL_INTERVAL) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat {
                            match key.code {
                                KeyCode::Esc => thread_quit.store(true, Ordering::Relaxed),
                                KeyCode::Char('c')
                                    if key.modifiers.contains(KeyModifiers::CONTROL) =>
                                {
                                    thread_quit.store(true, Ordering::Relaxed)
                                }
                                KeyCode::Char(c) => {
                                    if let Some(k) = map_key(c.to_ascii_lowercase()) {
                                        keypad.press(k);
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                }
                keypad.release_stale();
            }
        });

        Ok(Self {
            handle: Some(handle),
            stop,
            quit,
        })
    }

    /// The stop-request flag, raised on Esc or Ctrl-C.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// Stop the thread and restore the terminal.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.shutdown();
    }
}
