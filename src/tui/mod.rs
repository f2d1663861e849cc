//! Terminal front-end for the emulator.
//!
//! Provides the pieces the CLI wires together:
//! - a ratatui display backend rendering the framebuffer in place
//! - a crossterm key listener thread feeding the keypad debouncer

mod display;
mod input;

pub use display::TerminalDisplay;
pub use input::KeyListener;
