use crate::chip8_emulator::config::{
    DISPLAY_SIZE, DISPLAY_WIDTH_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH,
};

/// Monochrome framebuffer stored as rows of packed bytes. The most
/// significant bit of each byte is the leftmost pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub bytes: [u8; DISPLAY_SIZE],
}

impl Default for Display {
    fn default() -> Self {
        Self {
            bytes: [0; DISPLAY_SIZE],
        }
    }
}

impl Display {
    pub fn clear(&mut self) {
        self.bytes = [0; DISPLAY_SIZE];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let byte = self.bytes[y * DISPLAY_WIDTH_BYTES + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * DISPLAY_WIDTH_BYTES;
        &self.bytes[start..start + DISPLAY_WIDTH_BYTES]
    }

    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|byte| *byte == 0)
    }

    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SCREEN_HEIGHT).flat_map(move |y| {
            (0..SCREEN_WIDTH)
                .filter(move |x| self.pixel(*x, y))
                .map(move |x| (x, y))
        })
    }

    /// XORs `sprite` (one byte per row) into the display with its top-left
    /// corner at `(x, y)`. Start coordinates wrap; the sprite itself is
    /// clipped at the right and bottom edges. Returns true if any lit pixel
    /// was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = x as usize % SCREEN_WIDTH;
        let y = y as usize % SCREEN_HEIGHT;

        let column = x / 8;
        let start_bit = x % 8;
        let mut collision = false;

        for (row, &slice) in sprite.iter().enumerate() {
            let y_pos = y + row;
            if y_pos >= SCREEN_HEIGHT {
                break;
            }

            let location = y_pos * DISPLAY_WIDTH_BYTES + column;

            let first = slice >> start_bit;
            collision |= self.bytes[location] & first != 0;
            self.bytes[location] ^= first;

            // bits shifted past this byte land in the next column of the same row only
            if start_bit != 0 && column + 1 < DISPLAY_WIDTH_BYTES {
                let second = slice << (8 - start_bit);
                collision |= self.bytes[location + 1] & second != 0;
                self.bytes[location + 1] ^= second;
            }
        }

        collision
    }
}
