use std::path::PathBuf;

use clap::Parser;
use log::error;

use chip8_core_emu::{
    load_quirks_profile, load_quirks_profile_from_env, run_emulator_app, run_emulator_headless,
    Chip8Error, EmulatorConfig, KeyState, Rgb,
};

#[derive(Debug, Parser)]
#[command(name = "chip8-core-emu")]
#[command(about = "Run a CHIP-8 program")]
struct Args {
    #[arg(long)]
    rom: PathBuf,

    /// Quirk profile; falls back to CHIP8_QUIRKS, then "original".
    #[arg(long, value_parser = ["original", "modern"])]
    quirks: Option<String>,

    #[arg(long)]
    shift_uses_vy: Option<bool>,

    #[arg(long)]
    jump_with_vx: Option<bool>,

    #[arg(long)]
    store_increments_index: Option<bool>,

    #[arg(long, default_value_t = 16)]
    scale: usize,

    /// Instructions per second (not per frame); each frame runs hz / fps instructions.
    #[arg(long, default_value_t = 700)]
    hz: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    #[arg(long)]
    foreground: Option<String>,

    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: usize,
}

fn build_config(args: &Args) -> Result<EmulatorConfig, Chip8Error> {
    let mut quirks = match &args.quirks {
        Some(profile) => load_quirks_profile(profile)
            .map_err(|_| Chip8Error::InvalidArgument("quirks must be original or modern"))?,
        None => {
            load_quirks_profile_from_env()
                .map_err(|_| Chip8Error::InvalidArgument("CHIP8_QUIRKS must be original or modern"))?
                .1
        }
    };
    if let Some(value) = args.shift_uses_vy {
        quirks.shift_uses_vy = value;
    }
    if let Some(value) = args.jump_with_vx {
        quirks.jump_with_vx = value;
    }
    if let Some(value) = args.store_increments_index {
        quirks.store_increments_index = value;
    }

    let config = EmulatorConfig {
        instructions_per_second: args.hz,
        frames_per_second: args.fps,
        quirks,
        foreground: args.foreground.as_deref().map(Rgb::parse).transpose()?,
        background: args.background.as_deref().map(Rgb::parse).transpose()?,
    };
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), Chip8Error> {
    let config = build_config(args)?;

    if args.headless {
        let state = run_emulator_headless(&config, &args.rom, args.frames, KeyState::default())?;
        println!(
            "headless finished: pc=0x{:03x} lit_pixels={}",
            state.pc,
            state.display.lit_pixels().count()
        );
        return Ok(());
    }

    let _state = run_emulator_app(&config, &args.rom, args.scale)?;
    Ok(())
}

fn main() -> Result<(), Chip8Error> {
    env_logger::init();
    let args = Args::parse();

    run(&args).inspect_err(|err| error!("{err}"))
}
