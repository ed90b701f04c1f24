pub const BITMAP_SIZE: usize = 16;

// Rows hold full palette indices so artwork exported from the paint tool
// drops in without conversion. Index zero is transparent; anything else
// collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpacityBitmap {
    rows: [[u8; BITMAP_SIZE]; BITMAP_SIZE],
}

impl OpacityBitmap {
    pub const fn from_rows(rows: [[u8; BITMAP_SIZE]; BITMAP_SIZE]) -> Self {
        Self { rows }
    }

    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        self.rows[y][x] != 0
    }

    pub fn opaque_pixel_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|pixel| **pixel != 0)
            .count()
    }

    // Placeholder artwork until real sprite exports land: an 8-wide diamond
    // centered in the box, palette 1 outline around a palette 6 fill.
    pub const fn diamond_test_pattern() -> Self {
        const E: u8 = 0x01;
        const F: u8 = 0x06;
        Self::from_rows([
            [0; 16],
            [0; 16],
            [0; 16],
            [0; 16],
            [0, 0, 0, 0, 0, 0, 0, E, E, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, E, F, F, E, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, E, F, F, F, F, E, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, E, F, F, F, F, F, F, E, 0, 0, 0, 0],
            [0, 0, 0, 0, E, F, F, F, F, F, F, E, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, E, F, F, F, F, E, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, E, F, F, E, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, E, E, 0, 0, 0, 0, 0, 0, 0],
            [0; 16],
            [0; 16],
            [0; 16],
            [0; 16],
        ])
    }
}
