use log::{debug, error, trace};
use rand::random;

use crate::chip8_emulator::config::{
    FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_OFFSET, MEMORY_SIZE, SCREEN_HEIGHT, STACK_CAPACITY,
};
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::instruction::{decode, Instruction};
use crate::chip8_emulator::state::{clear_display, EmulatorState, KeyWait};

/// Reads the big-endian word at the program counter and steps past it.
pub fn fetch_opcode(state: &mut EmulatorState) -> Result<u16, Chip8Error> {
    if state.pc > (MEMORY_SIZE - 2) {
        error!("program counter ran off the end of memory: 0x{:03x}", state.pc);
        return Err(Chip8Error::ProgramCounterOutOfBounds(state.pc));
    }

    let opcode = ((state.memory[state.pc] as u16) << 8) | state.memory[state.pc + 1] as u16;
    state.pc += 2;
    Ok(opcode)
}

/// Runs one instruction, or, while an FX0A wait is active, advances the
/// wait from the current key state instead of fetching.
pub fn execute_cycle(state: &mut EmulatorState) -> Result<(), Chip8Error> {
    if state.key_wait.is_some() {
        poll_key_wait(state);
        return Ok(());
    }

    let opcode = fetch_opcode(state)?;
    execute_opcode(state, opcode)
}

/// Decrements both timers once. `sound_callback` fires when the sound timer
/// was nonzero before the decrement, and the same condition is returned.
pub fn tick_timers(
    state: &mut EmulatorState,
    mut sound_callback: Option<&mut dyn FnMut()>,
) -> bool {
    state.delay_timer = state.delay_timer.saturating_sub(1);

    if state.sound_timer > 0 {
        state.sound_timer -= 1;
        if let Some(callback) = sound_callback.as_mut() {
            callback();
        }
        return true;
    }

    false
}

pub fn execute_opcode(state: &mut EmulatorState, opcode: u16) -> Result<(), Chip8Error> {
    let instruction = decode(opcode);
    trace!("0x{:03x}: {opcode:04x} {instruction:?}", state.pc.saturating_sub(2));
    execute_instruction(state, instruction)
}

pub fn execute_instruction(
    state: &mut EmulatorState,
    instruction: Instruction,
) -> Result<(), Chip8Error> {
    use Instruction::*;

    let quirks = state.quirks();
    let v = &mut state.registers;

    match instruction {
        ClearScreen => clear_display(state),
        Return => {
            let ret = state.stack.pop().ok_or_else(|| {
                error!("return with empty stack at 0x{:03x}", state.pc);
                Chip8Error::StackUnderflow
            })?;
            state.pc = ret as usize;
        }
        Jump { nnn } => state.pc = nnn as usize,
        Call { nnn } => {
            if state.stack.len() >= STACK_CAPACITY {
                error!("stack overflow calling 0x{nnn:03x}");
                return Err(Chip8Error::StackOverflow(nnn));
            }
            state.stack.push(state.pc as u16);
            state.pc = nnn as usize;
        }
        SkipEqImmediate { x, nn } => skip_if(&mut state.pc, v[x] == nn),
        SkipNeImmediate { x, nn } => skip_if(&mut state.pc, v[x] != nn),
        SkipEqRegister { x, y } => skip_if(&mut state.pc, v[x] == v[y]),
        SkipNeRegister { x, y } => skip_if(&mut state.pc, v[x] != v[y]),
        LoadImmediate { x, nn } => v[x] = nn,
        AddImmediate { x, nn } => v[x] = v[x].wrapping_add(nn),
        Assign { x, y } => v[x] = v[y],
        Or { x, y } => v[x] |= v[y],
        And { x, y } => v[x] &= v[y],
        Xor { x, y } => v[x] ^= v[y],
        AddRegister { x, y } => {
            let (result, carry) = v[x].overflowing_add(v[y]);
            v[x] = result;
            v[FLAG_REGISTER] = u8::from(carry);
        }
        Subtract { x, y } => {
            let no_borrow = v[x] >= v[y];
            v[x] = v[x].wrapping_sub(v[y]);
            v[FLAG_REGISTER] = u8::from(no_borrow);
        }
        ReverseSubtract { x, y } => {
            let no_borrow = v[y] >= v[x];
            v[x] = v[y].wrapping_sub(v[x]);
            v[FLAG_REGISTER] = u8::from(no_borrow);
        }
        ShiftRight { x, y } => {
            if quirks.shift_uses_vy {
                v[x] = v[y];
            }
            let shifted_out = v[x] & 0x1;
            v[x] >>= 1;
            v[FLAG_REGISTER] = shifted_out;
        }
        ShiftLeft { x, y } => {
            if quirks.shift_uses_vy {
                v[x] = v[y];
            }
            let shifted_out = (v[x] & 0x80) >> 7;
            v[x] <<= 1;
            v[FLAG_REGISTER] = shifted_out;
        }
        LoadIndex { nnn } => state.index = nnn,
        JumpWithOffset { x, nnn } => {
            let jump_register = if quirks.jump_with_vx { x } else { 0 };
            state.pc = (nnn as usize + v[jump_register] as usize) & 0x0FFF;
        }
        Random { x, nn } => v[x] = random::<u8>() & nn,
        Draw { x, y, n } => {
            let (x_pos, y_pos) = (v[x], v[y]);
            // rows below the bottom edge are clipped and never read
            let visible_rows =
                usize::min(n as usize, SCREEN_HEIGHT - y_pos as usize % SCREEN_HEIGHT);
            let sprite = index_slice(state.index, visible_rows)?;
            let collision = state
                .display
                .draw_sprite(x_pos, y_pos, &state.memory[sprite]);
            v[FLAG_REGISTER] = u8::from(collision);
        }
        SkipKeyDown { x } => skip_if(&mut state.pc, state.keys.is_down(v[x])),
        SkipKeyUp { x } => skip_if(&mut state.pc, !state.keys.is_down(v[x])),
        ReadDelayTimer { x } => v[x] = state.delay_timer,
        WaitForKey { x } => {
            state.key_wait = Some(KeyWait::AwaitingPress { register: x });
            poll_key_wait(state);
        }
        SetDelayTimer { x } => state.delay_timer = v[x],
        SetSoundTimer { x } => state.sound_timer = v[x],
        AddIndex { x } => {
            let sum = state.index as usize + v[x] as usize;
            state.index = sum as u16;
            v[FLAG_REGISTER] = u8::from(sum >= MEMORY_SIZE);
        }
        LoadFontGlyph { x } => {
            state.index = ((v[x] & 0x0F) as usize * FONT_GLYPH_SIZE + FONT_OFFSET) as u16;
        }
        StoreBcd { x } => {
            let value = v[x];
            let target = index_slice(state.index, 3)?;
            state.memory[target].copy_from_slice(&[value / 100, (value % 100) / 10, value % 10]);
        }
        StoreRegisters { x } => {
            let target = index_slice(state.index, x + 1)?;
            state.memory[target].copy_from_slice(&v[..=x]);
            if quirks.store_increments_index {
                state.index = state.index.wrapping_add(x as u16 + 1);
            }
        }
        LoadRegisters { x } => {
            let source = index_slice(state.index, x + 1)?;
            v[..=x].copy_from_slice(&state.memory[source]);
        }
        Unknown(opcode) => debug!("ignoring unknown instruction 0x{opcode:04x}"),
    }

    Ok(())
}

fn skip_if(pc: &mut usize, condition: bool) {
    if condition {
        *pc += 2;
    }
}

fn index_slice(index: u16, len: usize) -> Result<std::ops::Range<usize>, Chip8Error> {
    let start = index as usize;
    let end = start + len;
    if end > MEMORY_SIZE {
        error!("index register access out of memory: 0x{start:03x} + {len}");
        return Err(Chip8Error::IndexOutOfBounds { index: start, len });
    }
    Ok(start..end)
}

/// Latches the first key pressed, then completes the wait once that key is
/// released, storing it in the destination register.
fn poll_key_wait(state: &mut EmulatorState) {
    state.key_wait = match state.key_wait {
        Some(KeyWait::AwaitingPress { register }) => match state.keys.first_pressed() {
            Some(key) => Some(KeyWait::AwaitingRelease { register, key }),
            None => Some(KeyWait::AwaitingPress { register }),
        },
        Some(KeyWait::AwaitingRelease { register, key }) => {
            if state.keys.is_down(key) {
                Some(KeyWait::AwaitingRelease { register, key })
            } else {
                state.registers[register] = key;
                None
            }
        }
        None => None,
    };
}
