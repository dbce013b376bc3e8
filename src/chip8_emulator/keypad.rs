use crate::chip8_emulator::config::KEY_COUNT;

/// Snapshot of the hex keypad for one frame: one bit per key 0x0..=0xF,
/// plus the frontend's quit request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub keys: u16,
    pub exit: bool,
}

impl KeyState {
    pub fn with_keys(pressed: &[u8]) -> Self {
        let mut state = Self::default();
        for &key in pressed {
            state.set(key as usize, true);
        }
        state
    }

    pub fn is_down(&self, key: u8) -> bool {
        let key = (key & 0x0F) as usize;
        self.keys & (1 << key) != 0
    }

    pub fn set(&mut self, key_index: usize, is_pressed: bool) {
        if key_index >= KEY_COUNT {
            return;
        }

        if is_pressed {
            self.keys |= 1 << key_index;
        } else {
            self.keys &= !(1 << key_index);
        }
    }

    /// Lowest numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|key| self.is_down(*key))
    }
}
