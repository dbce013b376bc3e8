use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::quirks::{Chip8Quirks, ORIGINAL_QUIRKS};

pub const MEMORY_SIZE: usize = 4096;
pub const REGISTER_COUNT: usize = 16;
pub const STACK_CAPACITY: usize = 16;
pub const KEY_COUNT: usize = 16;
pub const FLAG_REGISTER: usize = 0xF;

pub const FONT_OFFSET: usize = 0x050;
pub const FONT_GLYPH_SIZE: usize = 5;
pub const PROGRAM_START: usize = 0x200;

/// Display width in bytes; each byte packs 8 horizontal pixels.
pub const DISPLAY_WIDTH_BYTES: usize = 8;
pub const SCREEN_WIDTH: usize = DISPLAY_WIDTH_BYTES * 8;
pub const SCREEN_HEIGHT: usize = 32;
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH_BYTES * SCREEN_HEIGHT;

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: usize = 700;
pub const DEFAULT_FRAMES_PER_SECOND: usize = 60;

pub const FONT_BYTES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn parse(text: &str) -> Result<Self, Chip8Error> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Chip8Error::InvalidArgument("color must be #RRGGBB"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| Chip8Error::InvalidArgument("color must be #RRGGBB"))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Runtime settings. Colors are carried for the renderer only; the
/// interpreter never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub instructions_per_second: usize,
    pub frames_per_second: usize,
    pub quirks: Chip8Quirks,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            quirks: ORIGINAL_QUIRKS,
            foreground: None,
            background: None,
        }
    }
}

impl EmulatorConfig {
    pub fn validate(&self) -> Result<(), Chip8Error> {
        if self.instructions_per_second == 0 {
            return Err(Chip8Error::InvalidArgument("hz must be > 0"));
        }
        if self.frames_per_second == 0 {
            return Err(Chip8Error::InvalidArgument("fps must be > 0"));
        }
        if self.frames_per_second > self.instructions_per_second {
            return Err(Chip8Error::InvalidArgument("fps must not exceed hz"));
        }
        Ok(())
    }

    pub fn instructions_per_frame(&self) -> usize {
        usize::max(1, self.instructions_per_second / self.frames_per_second.max(1))
    }

    pub fn foreground_or_default(&self) -> Rgb {
        self.foreground.unwrap_or(Rgb::WHITE)
    }

    pub fn background_or_default(&self) -> Rgb {
        self.background.unwrap_or(Rgb::BLACK)
    }
}
