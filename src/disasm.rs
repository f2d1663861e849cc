//! Static disassembler for CHIP-8 ROMs.
//!
//! Reuses the opcode decoder to render instructions as text; it never
//! executes anything. Encodings outside the instruction table print as
//! `???` with the raw word still visible.

use crate::vm::decode::Opcode;
use crate::vm::memory::PROGRAM_OFFSET;

/// Disassemble a single instruction word fetched from `addr`.
pub fn disassemble_instruction(addr: u16, raw: u16) -> String {
    let op = Opcode::decode(raw);
    match mnemonic(&op) {
        (name, Some(operands)) => format!("{addr:04X}: {raw:04x} {name}  {operands}"),
        (name, None) => format!("{addr:04X}: {raw:04x} {name}"),
    }
}

/// Disassemble a whole ROM image as it would sit in memory at the store
/// offset.
pub fn disassemble(rom: &[u8]) -> String {
    let mut output = String::new();
    let mut chunks = rom.chunks_exact(2);
    for (idx, pair) in chunks.by_ref().enumerate() {
        let addr = PROGRAM_OFFSET + (idx * 2) as u16;
        let raw = u16::from_be_bytes([pair[0], pair[1]]);
        output.push_str(&disassemble_instruction(addr, raw));
        output.push('\n');
    }
    if let [byte] = chunks.remainder() {
        let addr = PROGRAM_OFFSET + (rom.len() - 1) as u16;
        output.push_str(&format!("{addr:04X}: {byte:02x}   ; trailing byte\n"));
    }
    output
}

/// Mnemonic and operand text for a decoded instruction.
fn mnemonic(op: &Opcode) -> (&'static str, Option<String>) {
    let x = op.x;
    let y = op.y;
    match op.op {
        0x0 => match op.kk {
            0xE0 => ("CLS", None),
            0xEE => ("RET", None),
            _ => unknown(),
        },
        0x1 => ("JP", Some(format!("{:X}", op.nnn))),
        0x2 => ("CALL", Some(format!("{:X}", op.nnn))),
        0x3 => ("SE", Some(format!("V{x},{:X}", op.kk))),
        0x4 => ("SNE", Some(format!("V{x},{:X}", op.kk))),
        0x5 if op.n == 0 => ("SE", Some(format!("V{x},V{y}"))),
        0x6 => ("LD", Some(format!("V{x},{:X}", op.kk))),
        0x7 => ("ADD", Some(format!("V{x},{:X}", op.kk))),
        0x8 => match op.n {
            0x0 => ("LD", Some(format!("V{x},V{y}"))),
            0x1 => ("OR", Some(format!("V{x},V{y}"))),
            0x2 => ("AND", Some(format!("V{x},V{y}"))),
            0x3 => ("XOR", Some(format!("V{x},V{y}"))),
            0x4 => ("ADD", Some(format!("V{x},V{y}"))),
            0x5 => ("SUB", Some(format!("V{x},V{y}"))),
            0x6 => ("SHR", Some(format!("V{x}"))),
            0x7 => ("SUBN", Some(format!("V{x},V{y}"))),
            0xE => ("SHL", Some(format!("V{x}"))),
            _ => unknown(),
        },
        0x9 if op.n == 0 => ("SNE", Some(format!("V{x},V{y}"))),
        0xA => ("LD", Some(format!("I,{:X}", op.nnn))),
        0xB => ("JP", Some(format!("V0,{:X}", op.nnn))),
        0xC => ("RND", Some(format!("V{x},{:X}", op.kk))),
        0xD => ("DRW", Some(format!("V{x},V{y},{}", op.n))),
        0xE => match op.kk {
            0x9E => ("SKP", Some(format!("V{x}"))),
            0xA1 => ("SKNP", Some(format!("V{x}"))),
            _ => unknown(),
        },
        0xF => match op.kk {
            0x07 => ("LD", Some(format!("V{x},DT"))),
            0x0A => ("LD", Some(format!("V{x},K"))),
            0x15 => ("LD", Some(format!("DT,V{x}"))),
            0x18 => ("LD", Some(format!("ST,V{x}"))),
            0x1E => ("ADD", Some(format!("I,V{x}"))),
            0x29 => ("LD", Some(format!("F,V{x}"))),
            0x33 => ("LD", Some(format!("B,V{x}"))),
            0x55 => ("LD", Some(format!("[I],V{x}"))),
            0x65 => ("LD", Some(format!("V{x},[I]"))),
            _ => unknown(),
        },
        _ => unknown(),
    }
}

fn unknown() -> (&'static str, Option<String>) {
    ("???", None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cls_and_ret() {
        assert_eq!(disassemble_instruction(0x200, 0x00E0), "0200: 00e0 CLS");
        assert_eq!(disassemble_instruction(0x202, 0x00EE), "0202: 00ee RET");
    }

    #[test]
    fn test_jump_and_call() {
        assert_eq!(disassemble_instruction(0x200, 0x1ABC), "0200: 1abc JP  ABC");
        assert_eq!(disassemble_instruction(0x200, 0x2ABC), "0200: 2abc CALL  ABC");
        assert_eq!(disassemble_instruction(0x200, 0xB123), "0200: b123 JP  V0,123");
    }

    #[test]
    fn test_register_operands() {
        assert_eq!(disassemble_instruction(0x200, 0x63AB), "0200: 63ab LD  V3,AB");
        assert_eq!(disassemble_instruction(0x200, 0x8125), "0200: 8125 SUB  V1,V2");
        assert_eq!(disassemble_instruction(0x200, 0x8106), "0200: 8106 SHR  V1");
    }

    #[test]
    fn test_draw() {
        assert_eq!(
            disassemble_instruction(0x200, 0xD125),
            "0200: d125 DRW  V1,V2,5"
        );
    }

    #[test]
    fn test_timer_and_memory_loads() {
        assert_eq!(disassemble_instruction(0x200, 0xF107), "0200: f107 LD  V1,DT");
        assert_eq!(disassemble_instruction(0x200, 0xF10A), "0200: f10a LD  V1,K");
        assert_eq!(disassemble_instruction(0x200, 0xF155), "0200: f155 LD  [I],V1");
        assert_eq!(disassemble_instruction(0x200, 0xF165), "0200: f165 LD  V1,[I]");
    }

    #[test]
    fn test_unknown_encoding() {
        assert_eq!(disassemble_instruction(0x200, 0x5001), "0200: 5001 ???");
        assert_eq!(disassemble_instruction(0x200, 0x0000), "0200: 0000 ???");
    }

    #[test]
    fn test_disassemble_rom() {
        let rom = [0x00, 0xE0, 0x12, 0x00];
        let text = disassemble(&rom);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["0200: 00e0 CLS", "0202: 1200 JP  200"]);
    }

    #[test]
    fn test_disassemble_odd_rom() {
        let rom = [0x00, 0xE0, 0xAA];
        let text = disassemble(&rom);
        assert!(text.lines().count() == 2);
        assert!(text.contains("trailing byte"));
    }
}
