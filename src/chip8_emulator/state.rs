use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{info, log_enabled, trace};

use crate::chip8_emulator::config::{
    FONT_BYTES, FONT_OFFSET, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, STACK_CAPACITY,
};
use crate::chip8_emulator::display::Display;
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::keypad::KeyState;
use crate::chip8_emulator::quirks::Chip8Quirks;

/// Progress of an FX0A key wait. The program counter already points past
/// the FX0A word while either variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    AwaitingPress { register: usize },
    AwaitingRelease { register: usize, key: u8 },
}

#[derive(Debug, Clone)]
pub struct EmulatorState {
    pub memory: [u8; MEMORY_SIZE],
    pub registers: [u8; REGISTER_COUNT],
    pub stack: Vec<u16>,
    pub keys: KeyState,
    pub display: Display,
    pub pc: usize,
    pub index: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub key_wait: Option<KeyWait>,
    quirks: Chip8Quirks,
    pub rom_path: Option<PathBuf>,
}

impl EmulatorState {
    pub fn quirks(&self) -> Chip8Quirks {
        self.quirks
    }
}

/// Zeroed machine with the font table in place and the program counter at
/// the program start.
pub fn create_state(quirks: Chip8Quirks) -> EmulatorState {
    let mut state = EmulatorState {
        memory: [0; MEMORY_SIZE],
        registers: [0; REGISTER_COUNT],
        stack: Vec::with_capacity(STACK_CAPACITY),
        keys: KeyState::default(),
        display: Display::default(),
        pc: PROGRAM_START,
        index: 0,
        delay_timer: 0,
        sound_timer: 0,
        key_wait: None,
        quirks,
        rom_path: None,
    };
    load_font(&mut state);
    state
}

pub fn create_state_with_rom(
    quirks: Chip8Quirks,
    rom_path: &Path,
) -> Result<EmulatorState, Chip8Error> {
    let mut state = create_state(quirks);
    load_rom(&mut state, rom_path)?;
    Ok(state)
}

/// Returns the machine to its post-creation state and reloads the ROM it
/// was last loaded from, if any.
pub fn reset_state(state: &mut EmulatorState) -> Result<(), Chip8Error> {
    let rom_path = state.rom_path.take();
    *state = create_state(state.quirks);

    if let Some(path) = rom_path {
        load_rom(state, &path)?;
    }

    Ok(())
}

pub fn clear_display(state: &mut EmulatorState) {
    state.display.clear();
}

/// Copies `bytes` verbatim into memory at `offset`.
pub fn load(state: &mut EmulatorState, offset: usize, bytes: &[u8]) -> Result<(), Chip8Error> {
    let end = offset + bytes.len();
    if end > MEMORY_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: bytes.len(),
            max: MEMORY_SIZE.saturating_sub(offset),
        });
    }

    state.memory[offset..end].copy_from_slice(bytes);
    Ok(())
}

pub fn load_font(state: &mut EmulatorState) {
    state.memory[FONT_OFFSET..FONT_OFFSET + FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
}

pub fn load_rom(state: &mut EmulatorState, path: &Path) -> Result<(), Chip8Error> {
    info!("loading rom: {}", path.display());
    let mut file = File::open(path).map_err(|source| Chip8Error::RomOpen {
        path: path.to_path_buf(),
        source,
    })?;

    load_rom_from_reader(state, &mut file)?;
    state.rom_path = Some(path.to_path_buf());
    Ok(())
}

/// Loads a program image at the program start and points the program
/// counter at it.
pub fn load_rom_from_reader<R: Read>(
    state: &mut EmulatorState,
    reader: &mut R,
) -> Result<(), Chip8Error> {
    let mut rom_bytes = Vec::new();
    reader.read_to_end(&mut rom_bytes)?;

    load(state, PROGRAM_START, &rom_bytes)?;
    state.pc = PROGRAM_START;

    if log_enabled!(log::Level::Trace) {
        log_rom_content(&rom_bytes);
    }
    info!(
        "loaded rom into mem starting at {:x} - to {:x}",
        PROGRAM_START,
        PROGRAM_START + rom_bytes.len()
    );

    Ok(())
}

fn log_rom_content(rom: &[u8]) {
    let dump = rom
        .chunks(16)
        .map(|row| {
            row.iter()
                .map(|byte| format!("0x{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    trace!("rom content:\n{dump}");
}
