use std::path::Path;

use log::{debug, info};

use crate::chip8_emulator::config::{EmulatorConfig, Rgb, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::chip8_emulator::cpu::{execute_cycle, tick_timers};
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::keypad::KeyState;
use crate::chip8_emulator::state::{create_state_with_rom, EmulatorState};

/// What the frontend needs to know after a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Sound timer was nonzero going into this frame's tick.
    pub beep: bool,
    pub exit_requested: bool,
}

/// One frame: latch `keys`, run `instructions_per_frame` cycles, then tick
/// the timers once. A quit request skips execution entirely.
pub fn run_frame(
    state: &mut EmulatorState,
    instructions_per_frame: usize,
    keys: KeyState,
) -> Result<FrameReport, Chip8Error> {
    state.keys = keys;
    if keys.exit {
        return Ok(FrameReport {
            beep: false,
            exit_requested: true,
        });
    }

    for _ in 0..instructions_per_frame {
        execute_cycle(state)?;
    }

    let beep = tick_timers(state, None);
    Ok(FrameReport {
        beep,
        exit_requested: false,
    })
}

pub fn run_emulator_headless(
    config: &EmulatorConfig,
    rom_path: &Path,
    frames: usize,
    keys: KeyState,
) -> Result<EmulatorState, Chip8Error> {
    config.validate()?;
    if frames == 0 {
        return Err(Chip8Error::InvalidArgument("frames must be > 0"));
    }

    let mut state = create_state_with_rom(config.quirks, rom_path)?;
    let instructions_per_frame = config.instructions_per_frame();

    for frame in 0..frames {
        let report = run_frame(&mut state, instructions_per_frame, keys)?;
        if report.exit_requested {
            debug!("exit requested after {frame} frames");
            break;
        }
    }

    Ok(state)
}

fn to_color(rgb: Rgb) -> raylib::prelude::Color {
    raylib::prelude::Color::new(rgb.0, rgb.1, rgb.2, 0xFF)
}

pub fn run_emulator_app(
    config: &EmulatorConfig,
    rom_path: &Path,
    scale: usize,
) -> Result<EmulatorState, Chip8Error> {
    use raylib::prelude::{KeyboardKey, RaylibDraw};

    config.validate()?;
    if scale == 0 {
        return Err(Chip8Error::InvalidArgument("scale must be > 0"));
    }

    let mut state = create_state_with_rom(config.quirks, rom_path)?;

    let width = (SCREEN_WIDTH * scale) as i32;
    let height = (SCREEN_HEIGHT * scale) as i32;
    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("chip8-core-emu")
        .build();
    rl.set_target_fps(config.frames_per_second as u32);

    let key_map = [
        (KeyboardKey::KEY_ONE, 0x1usize),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    let foreground = to_color(config.foreground_or_default());
    let background = to_color(config.background_or_default());
    let instructions_per_frame = config.instructions_per_frame();
    info!(
        "running {} instructions per frame at {} fps",
        instructions_per_frame, config.frames_per_second
    );

    while !rl.window_should_close() {
        let mut keys = KeyState {
            keys: 0,
            exit: rl.is_key_pressed(KeyboardKey::KEY_ESCAPE),
        };
        for (key, mapped) in key_map {
            keys.set(mapped, rl.is_key_down(key));
        }

        let report = run_frame(&mut state, instructions_per_frame, keys)?;
        if report.exit_requested {
            break;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(background);
        for (x, y) in state.display.lit_pixels() {
            d.draw_rectangle(
                x as i32 * scale as i32,
                y as i32 * scale as i32,
                scale as i32,
                scale as i32,
                foreground,
            );
        }
        if report.beep {
            d.draw_rectangle_lines(0, 0, width, height, foreground);
        }
    }

    Ok(state)
}
