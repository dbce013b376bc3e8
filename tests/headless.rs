use std::io::Cursor;

use chip8_core_emu::{
    create_state, create_state_with_rom, load_rom_from_reader, reset_state, run_emulator_headless,
    run_frame, Chip8Error, EmulatorConfig, KeyState, ORIGINAL_QUIRKS,
};

fn rom_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), bytes).unwrap();
    tmp
}

#[test]
fn clear_and_self_jump_spins_at_program_start() {
    let rom = rom_file(&[0x00, 0xE0, 0x12, 0x00]);
    let mut state = create_state_with_rom(ORIGINAL_QUIRKS, rom.path()).unwrap();

    for _ in 0..50 {
        run_frame(&mut state, 11, KeyState::default()).unwrap();
        assert!(state.pc == 0x200 || state.pc == 0x202);
    }

    assert!(state.display.is_blank());
}

#[test]
fn headless_runner_survives_many_frames() {
    let rom = rom_file(&[0x00, 0xE0, 0x12, 0x00]);

    let state =
        run_emulator_headless(&EmulatorConfig::default(), rom.path(), 600, KeyState::default())
            .unwrap();

    assert!(state.display.is_blank());
    assert!(state.pc == 0x200 || state.pc == 0x202);
}

#[test]
fn draws_sprite_at_top_left() {
    let sprite = [0xF0, 0x90, 0xF0, 0x90, 0xF0];
    let mut rom = vec![0u8; 0x2F];
    rom[0..6].copy_from_slice(&[0xA2, 0x2A, 0xD0, 0x15, 0x12, 0x04]);
    rom[0x2A..0x2F].copy_from_slice(&sprite);

    let mut state = create_state(ORIGINAL_QUIRKS);
    load_rom_from_reader(&mut state, &mut Cursor::new(rom)).unwrap();
    run_frame(&mut state, 3, KeyState::default()).unwrap();

    assert_eq!(state.index, 0x22A);
    assert_eq!(state.registers[0xF], 0);
    for (row, expected) in sprite.iter().enumerate() {
        assert_eq!(state.display.row(row)[0], *expected);
        assert!(state.display.row(row)[1..].iter().all(|b| *b == 0));
    }
    assert_eq!(state.display.lit_pixels().count(), 16);
}

#[test]
fn runaway_program_faults() {
    // jump to the last word; the zero word there is ignored and the next fetch runs off the end
    let rom = rom_file(&[0x1F, 0xFE]);
    let config = EmulatorConfig::default();

    let result = run_emulator_headless(&config, rom.path(), 2, KeyState::default());

    assert!(matches!(
        result,
        Err(Chip8Error::ProgramCounterOutOfBounds(0x1000))
    ));
}

#[test]
fn missing_rom_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ch8");

    let result = create_state_with_rom(ORIGINAL_QUIRKS, &path);

    match result {
        Err(Chip8Error::RomOpen { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected RomOpen, got {other:?}"),
    }
}

#[test]
fn oversized_rom_is_rejected() {
    let rom = rom_file(&vec![0xAA; 4096 - 0x200 + 1]);

    let result = create_state_with_rom(ORIGINAL_QUIRKS, rom.path());

    assert!(matches!(
        result,
        Err(Chip8Error::RomTooLarge {
            size: 3585,
            max: 3584
        })
    ));
}

#[test]
fn largest_rom_fits_exactly() {
    let rom = rom_file(&vec![0xAA; 4096 - 0x200]);

    let state = create_state_with_rom(ORIGINAL_QUIRKS, rom.path()).unwrap();

    assert_eq!(state.memory[0xFFF], 0xAA);
}

#[test]
fn reset_reloads_rom() {
    let rom = rom_file(&[0x60, 0x05, 0x12, 0x02]);
    let mut state = create_state_with_rom(ORIGINAL_QUIRKS, rom.path()).unwrap();
    run_frame(&mut state, 4, KeyState::default()).unwrap();
    state.memory[0x200] = 0x00;
    assert_eq!(state.registers[0], 5);

    reset_state(&mut state).unwrap();

    assert_eq!(state.registers[0], 0);
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.memory[0x200..0x204], [0x60, 0x05, 0x12, 0x02]);
    assert_eq!(state.memory[0x050], 0xF0);
}

#[test]
fn invalid_config_is_rejected_before_loading() {
    let config = EmulatorConfig {
        instructions_per_second: 10,
        frames_per_second: 60,
        ..EmulatorConfig::default()
    };

    let result = run_emulator_headless(
        &config,
        std::path::Path::new("does-not-matter.ch8"),
        1,
        KeyState::default(),
    );

    assert!(matches!(result, Err(Chip8Error::InvalidArgument(_))));
}
