pub mod chip8_emulator;

pub use chip8_emulator::app::{run_emulator_app, run_emulator_headless, run_frame, FrameReport};
pub use chip8_emulator::config::{EmulatorConfig, Rgb};
pub use chip8_emulator::cpu::{
    execute_cycle, execute_instruction, execute_opcode, fetch_opcode, tick_timers,
};
pub use chip8_emulator::display::Display;
pub use chip8_emulator::error::Chip8Error;
pub use chip8_emulator::instruction::{decode, Instruction};
pub use chip8_emulator::keypad::KeyState;
pub use chip8_emulator::quirks::{
    load_quirks_profile, load_quirks_profile_from_env, Chip8Quirks, MODERN_QUIRKS, ORIGINAL_QUIRKS,
};
pub use chip8_emulator::state::{
    clear_display, create_state, create_state_with_rom, load, load_rom, load_rom_from_reader,
    reset_state, EmulatorState, KeyWait,
};
