//! Whole-program tests driving the VM through its public API.

use chip8::{DummyDisplay, Keypad, Vm, VmError};

fn load(program: &[u8]) -> Vm {
    let mut vm = Vm::new(Box::new(DummyDisplay::new()), Keypad::new());
    vm.load_program(program).unwrap();
    vm
}

/// Step until the program counter reaches `target`, bounded so a broken
/// program fails the test instead of hanging it.
fn run_until(vm: &mut Vm, target: u16, max_steps: usize) {
    for _ in 0..max_steps {
        if vm.pc == target {
            return;
        }
        vm.step().unwrap();
    }
    panic!("pc never reached {target:#05X} (stuck at {:#05X})", vm.pc);
}

#[test]
fn counting_loop_terminates_with_expected_value() {
    // V0 = 0; loop { V0 += 1 } until V0 == 10
    let program = [
        0x60, 0x00, // 0x200: LD V0, 0
        0x70, 0x01, // 0x202: ADD V0, 1
        0x30, 0x0A, // 0x204: SE V0, 0x0A
        0x12, 0x02, // 0x206: JP 0x202
    ];
    let mut vm = load(&program);
    run_until(&mut vm, 0x208, 100);
    assert_eq!(vm.r[0], 10);
}

#[test]
fn subroutine_computes_bcd_of_a_sum() {
    // main: V0 = 0xC7, CALL bcd_at_300, then spin target
    // bcd_at_300: I = 0x300, BCD V0, RET
    let program = [
        0x60, 0xC7, // 0x200: LD V0, 0xC7 (199)
        0x22, 0x08, // 0x202: CALL 0x208
        0x12, 0x04, // 0x204: JP 0x204
        0x00, 0x00, //
        0xA3, 0x00, // 0x208: LD I, 0x300
        0xF0, 0x33, // 0x20A: LD B, V0
        0x00, 0xEE, // 0x20C: RET
    ];
    let mut vm = load(&program);
    run_until(&mut vm, 0x204, 20);
    assert_eq!(vm.memory.read(0x300), 1);
    assert_eq!(vm.memory.read(0x301), 9);
    assert_eq!(vm.memory.read(0x302), 9);
    assert_eq!(vm.sp, 0);
}

#[test]
fn drawing_a_glyph_twice_erases_it() {
    // I = glyph for V1 (0), draw, draw again at the same spot
    let program = [
        0x61, 0x00, // LD V1, 0
        0xF1, 0x29, // LD F, V1
        0xD2, 0x35, // DRW V2, V3, 5
        0xD2, 0x35, // DRW V2, V3, 5
    ];
    let mut vm = load(&program);
    vm.step().unwrap();
    vm.step().unwrap();
    vm.step().unwrap();
    assert_eq!(vm.r[0xF], 0);
    vm.step().unwrap();
    assert_eq!(vm.r[0xF], 1);
}

#[test]
fn waiting_program_makes_progress_once_a_key_arrives() {
    let program = [
        0xF4, 0x0A, // LD V4, K
        0x12, 0x02, // JP 0x202 (spin target)
    ];
    let mut vm = load(&program);

    // a few ticks with no input: the same instruction re-executes
    for _ in 0..3 {
        vm.keypad.update();
        vm.step().unwrap();
        assert_eq!(vm.pc, 0x200);
    }

    vm.keypad.press(0x9);
    vm.keypad.update();
    vm.step().unwrap();
    assert_eq!(vm.r[4], 0x9);
    assert_eq!(vm.pc, 0x202);
}

#[test]
fn bad_encoding_stops_a_run() {
    let program = [
        0x60, 0x01, // LD V0, 1
        0x50, 0x01, // invalid sub-opcode
    ];
    let mut vm = load(&program);
    vm.step().unwrap();
    let err = vm.step().unwrap_err();
    match err {
        VmError::UnknownOpcode { opcode, addr } => {
            assert_eq!(opcode, 0x5001);
            assert_eq!(addr, 0x202);
        }
        other => panic!("unexpected error: {other}"),
    }
}
