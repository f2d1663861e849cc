//! Keypad debouncing for the 16-key hex pad.
//!
//! Terminal input only reports key-down events; there is no paired
//! key-up. Each raw press stamps the key with the current time, and a
//! continuously-running scan releases any key whose last press is older
//! than [`RELEASE_DELAY`]. A key physically held down repeats faster
//! than the threshold, so it stays pressed until the repeats stop.
//!
//! The VM sees a double-buffered view: once per tick, [`Keypad::update`]
//! shifts the current vector into the previous one and republishes the
//! raw state, which makes just-pressed and just-released edges
//! observable for exactly one tick.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Number of logical keys on the pad.
pub const KEY_COUNT: usize = 16;

/// How long after the last press event a key counts as released.
pub const RELEASE_DELAY: Duration = Duration::from_millis(200);

/// Keyboard characters for keys 0x0-0xF, in key order.
const KEY_CHARS: [char; KEY_COUNT] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Map a keyboard character to its logical key index.
pub fn map_key(c: char) -> Option<u8> {
    KEY_CHARS.iter().position(|&k| k == c).map(|i| i as u8)
}

struct KeypadState {
    /// Pressed state the VM polled this tick.
    current: [bool; KEY_COUNT],
    /// Pressed state the VM polled last tick.
    previous: [bool; KEY_COUNT],
    /// Live state maintained by the listener between ticks.
    raw: [bool; KEY_COUNT],
    /// When each raw-pressed key was last seen.
    last_press: [Option<Instant>; KEY_COUNT],
}

/// Shared, lockable pressed/released state for the 16 keys.
///
/// Clones share the same underlying state: the listener thread holds one
/// handle and the VM another.
#[derive(Clone)]
pub struct Keypad {
    state: Arc<Mutex<KeypadState>>,
    release_delay: Duration,
}

impl Keypad {
    pub fn new() -> Self {
        Self::with_release_delay(RELEASE_DELAY)
    }

    /// A keypad with a custom release threshold (tests use a short one).
    pub fn with_release_delay(release_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(KeypadState {
                current: [false; KEY_COUNT],
                previous: [false; KEY_COUNT],
                raw: [false; KEY_COUNT],
                last_press: [None; KEY_COUNT],
            })),
            release_delay,
        }
    }

    /// Record a raw press event for `key`, refreshing its timestamp.
    pub fn press(&self, key: u8) {
        let key = (key & 0xF) as usize;
        let mut s = self.state.lock().unwrap();
        s.raw[key] = true;
        s.last_press[key] = Some(Instant::now());
    }

    /// Release every key whose last press is older than the threshold.
    ///
    /// The listener calls this on every pass, independently of VM ticks.
    pub fn release_stale(&self) {
        let now = Instant::now();
        let mut s = self.state.lock().unwrap();
        for key in 0..KEY_COUNT {
            if let Some(t) = s.last_press[key] {
                if now.duration_since(t) >= self.release_delay {
                    s.last_press[key] = None;
                    s.raw[key] = false;
                }
            }
        }
    }

    /// Publish the raw state to the VM's polled view. Called once per
    /// tick; enables the edge queries below.
    pub fn update(&self) {
        let mut s = self.state.lock().unwrap();
        s.previous = s.current;
        s.current = s.raw;
    }

    /// Whether `key` is pressed, as of the last update.
    pub fn is_pressed(&self, key: u8) -> bool {
        let s = self.state.lock().unwrap();
        s.current[(key & 0xF) as usize]
    }

    /// Whether `key` went down between the last two updates.
    pub fn just_pressed(&self, key: u8) -> bool {
        let key = (key & 0xF) as usize;
        let s = self.state.lock().unwrap();
        s.current[key] && !s.previous[key]
    }

    /// Whether `key` came up between the last two updates.
    pub fn just_released(&self, key: u8) -> bool {
        let key = (key & 0xF) as usize;
        let s = self.state.lock().unwrap();
        !s.current[key] && s.previous[key]
    }

    /// Lowest-numbered pressed key, if any (the wait-for-key scan).
    pub fn first_pressed(&self) -> Option<u8> {
        let s = self.state.lock().unwrap();
        s.current.iter().position(|&p| p).map(|i| i as u8)
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
