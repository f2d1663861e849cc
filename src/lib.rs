//! # CHIP-8 Emulator
//!
//! A fetch-decode-execute virtual machine for the CHIP-8: 16-bit
//! opcodes, 4KB of memory, 16 registers, a return-address stack, two
//! 60Hz countdown timers, and a 64x32 XOR-blitted display.
//!
//! The VM core talks to the outside world through two narrow seams: the
//! [`display::Display`] capability and the [`keypad::Keypad`] debouncer.
//! The default `tui` feature supplies terminal implementations of both.

pub mod disasm;
pub mod display;
pub mod keypad;
pub mod vm;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types
pub use disasm::{disassemble, disassemble_instruction};
pub use display::{Display, DummyDisplay, FrameBuffer};
pub use keypad::Keypad;
pub use vm::{Memory, MemoryError, Opcode, Vm, VmError, VmState};

#[cfg(feature = "tui")]
pub use tui::{KeyListener, TerminalDisplay};
