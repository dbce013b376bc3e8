use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum Chip8Error {
    Io(std::io::Error),
    RomOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    RomTooLarge {
        size: usize,
        max: usize,
    },
    ProgramCounterOutOfBounds(usize),
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    StackOverflow(u16),
    StackUnderflow,
    InvalidArgument(&'static str),
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::RomOpen { path, source } => {
                write!(f, "failed to open ROM {}: {source}", path.display())
            }
            Self::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {size} bytes (max {max})")
            }
            Self::ProgramCounterOutOfBounds(pc) => {
                write!(f, "program counter exceeded program memory: 0x{pc:03x}")
            }
            Self::IndexOutOfBounds { index, len } => write!(
                f,
                "index register access out of memory: 0x{index:03x} + {len} bytes"
            ),
            Self::StackOverflow(target) => {
                write!(f, "call to 0x{target:03x} with a full stack")
            }
            Self::StackUnderflow => write!(f, "return instruction with empty stack"),
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for Chip8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::RomOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Chip8Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
