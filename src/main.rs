//! CHIP-8 Emulator - CLI Entry Point
//!
//! Commands:
//! - `chip8-emu run <rom>` - Run a ROM image
//! - `chip8-emu disasm <rom>` - Disassemble a ROM image

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chip8-emu")]
#[command(version = "0.1.0")]
#[command(about = "A CHIP-8 virtual machine with a terminal front-end")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a ROM until its program counter leaves memory
    Run {
        /// Path to the ROM image to execute
        rom: String,
        /// Clock speed of the interpreter in Hz
        #[arg(short, long, default_value = "700")]
        clock_hz: u32,
        /// Step through instructions one at a time
        #[arg(short, long)]
        debug: bool,
    },
    /// Disassemble a ROM without executing it
    Disasm {
        /// Path to the ROM image
        rom: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            rom,
            clock_hz,
            debug,
        }) => {
            run_rom(&rom, clock_hz, debug);
        }
        Some(Commands::Disasm { rom }) => {
            disassemble_rom(&rom);
        }
        None => {
            println!("chip8-emu v0.1.0");
            println!("A CHIP-8 virtual machine");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn run_rom(path: &str, clock_hz: u32, debug: bool) {
    use chip8::Display as _;
    use chip8::{KeyListener, Keypad, TerminalDisplay, Vm};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    let image = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("❌ Failed to read ROM: {}", e);
            std::process::exit(1);
        }
    };
    println!("📂 Loaded {} bytes", image.len());

    let mut display = match TerminalDisplay::new() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("❌ Failed to open terminal display: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = display.init() {
        eprintln!("❌ Failed to initialise display: {}", e);
        std::process::exit(1);
    }

    let keypad = Keypad::new();
    let mut vm = Vm::new(Box::new(display), keypad.clone());
    vm.clock_hz = clock_hz;
    vm.debug = debug;

    if let Err(e) = vm.load_program(&image) {
        eprintln!("❌ Failed to load program: {}", e);
        std::process::exit(1);
    }

    // Debug stepping reads lines from stdin, which the raw-mode key
    // listener would swallow; the two are mutually exclusive.
    let listener = if debug {
        println!("Running debugger: enter 'n' to step through instructions");
        None
    } else {
        match KeyListener::spawn(keypad) {
            Ok(l) => Some(l),
            Err(e) => {
                eprintln!("❌ Failed to start key listener: {}", e);
                std::process::exit(1);
            }
        }
    };
    let stop: Arc<AtomicBool> = listener
        .as_ref()
        .map(|l| l.quit_flag())
        .unwrap_or_default();

    let result = vm.run(&stop);
    if let Some(listener) = listener {
        listener.stop();
    }

    match result {
        Ok(()) => println!("Halted after {} cycles", vm.cycles),
        Err(e) => {
            eprintln!("❌ Emulation stopped: {}", e);
            std::process::exit(1);
        }
    }
}

fn disassemble_rom(path: &str) {
    use chip8::disassemble;

    let image = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("❌ Failed to read ROM: {}", e);
            std::process::exit(1);
        }
    };
    print!("{}", disassemble(&image));
}
