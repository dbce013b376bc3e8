//! Decoding of 16-bit instruction words into [`Instruction`].
//!
//! Field names follow the usual nibble notation: `x` and `y` are register
//! indices, `nn` is the low byte, `nnn` the low 12 bits and `n` the low nibble.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Return,
    Jump { nnn: u16 },
    Call { nnn: u16 },
    SkipEqImmediate { x: usize, nn: u8 },
    SkipNeImmediate { x: usize, nn: u8 },
    SkipEqRegister { x: usize, y: usize },
    SkipNeRegister { x: usize, y: usize },
    LoadImmediate { x: usize, nn: u8 },
    AddImmediate { x: usize, nn: u8 },
    Assign { x: usize, y: usize },
    Or { x: usize, y: usize },
    And { x: usize, y: usize },
    Xor { x: usize, y: usize },
    AddRegister { x: usize, y: usize },
    Subtract { x: usize, y: usize },
    ShiftRight { x: usize, y: usize },
    ReverseSubtract { x: usize, y: usize },
    ShiftLeft { x: usize, y: usize },
    LoadIndex { nnn: u16 },
    JumpWithOffset { x: usize, nnn: u16 },
    Random { x: usize, nn: u8 },
    Draw { x: usize, y: usize, n: u8 },
    SkipKeyDown { x: usize },
    SkipKeyUp { x: usize },
    ReadDelayTimer { x: usize },
    WaitForKey { x: usize },
    SetDelayTimer { x: usize },
    SetSoundTimer { x: usize },
    AddIndex { x: usize },
    LoadFontGlyph { x: usize },
    StoreBcd { x: usize },
    StoreRegisters { x: usize },
    LoadRegisters { x: usize },
    Unknown(u16),
}

fn x_register_index(opcode: u16) -> usize {
    ((opcode & 0x0F00) >> 8) as usize
}

fn y_register_index(opcode: u16) -> usize {
    ((opcode & 0x00F0) >> 4) as usize
}

fn address_nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

fn byte_nn(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

fn nibble_n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

pub fn decode(opcode: u16) -> Instruction {
    use Instruction::*;

    let x = x_register_index(opcode);
    let y = y_register_index(opcode);
    let nn = byte_nn(opcode);
    let nnn = address_nnn(opcode);
    let n = nibble_n(opcode);

    match opcode & 0xF000 {
        0x0000 => match opcode {
            0x00E0 => ClearScreen,
            0x00EE => Return,
            _ => Unknown(opcode),
        },
        0x1000 => Jump { nnn },
        0x2000 => Call { nnn },
        0x3000 => SkipEqImmediate { x, nn },
        0x4000 => SkipNeImmediate { x, nn },
        0x5000 if n == 0 => SkipEqRegister { x, y },
        0x6000 => LoadImmediate { x, nn },
        0x7000 => AddImmediate { x, nn },
        0x8000 => match n {
            0x0 => Assign { x, y },
            0x1 => Or { x, y },
            0x2 => And { x, y },
            0x3 => Xor { x, y },
            0x4 => AddRegister { x, y },
            0x5 => Subtract { x, y },
            0x6 => ShiftRight { x, y },
            0x7 => ReverseSubtract { x, y },
            0xE => ShiftLeft { x, y },
            _ => Unknown(opcode),
        },
        0x9000 if n == 0 => SkipNeRegister { x, y },
        0xA000 => LoadIndex { nnn },
        0xB000 => JumpWithOffset { x, nnn },
        0xC000 => Random { x, nn },
        0xD000 => Draw { x, y, n },
        0xE000 => match nn {
            0x9E => SkipKeyDown { x },
            0xA1 => SkipKeyUp { x },
            _ => Unknown(opcode),
        },
        0xF000 => match nn {
            0x07 => ReadDelayTimer { x },
            0x0A => WaitForKey { x },
            0x15 => SetDelayTimer { x },
            0x18 => SetSoundTimer { x },
            0x1E => AddIndex { x },
            0x29 => LoadFontGlyph { x },
            0x33 => StoreBcd { x },
            0x55 => StoreRegisters { x },
            0x65 => LoadRegisters { x },
            _ => Unknown(opcode),
        },
        _ => Unknown(opcode),
    }
}
