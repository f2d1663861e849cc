//! The CHIP-8 virtual machine core.
//!
//! This module implements the complete interpreter:
//! - 4096 bytes of memory with the font table at the bottom
//! - 16 general registers, index register, 16-slot call stack
//! - two 60Hz countdown timers
//! - the fetch-decode-execute cycle over the 16-bit instruction set

pub mod decode;
pub mod execute;
pub mod memory;

pub use decode::Opcode;
pub use execute::{Vm, VmError, VmState};
pub use memory::{Memory, MemoryError};
