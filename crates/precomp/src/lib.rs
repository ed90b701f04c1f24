pub mod bitmap;
pub mod emit;
pub mod grid;
pub mod hits;
pub mod manifest;
pub mod pipeline;
pub mod quadrant;
pub mod rings;

pub use bitmap::OpacityBitmap;
pub use hits::HitTable;
pub use manifest::{GeneratedFile, GeneratedManifest, TABLE_FORMAT_VERSION};
pub use pipeline::{
    build_sprite_tables, write_sprite_tables, ConfigError, SpriteTables, TableGenConfig,
    TableGenError, TableWriteError, HITS_FILE_NAME, MANIFEST_FILE_NAME, PATHS_FILE_NAME,
};
pub use rings::{PathError, RingPath, RingSpec, Waypoint, DEFAULT_RINGS};

pub const SCREEN_WIDTH: i16 = 640;
pub const SCREEN_HEIGHT: i16 = 480;

pub const SPRITE_WIDTH: i16 = 16;
pub const SPRITE_HEIGHT: i16 = 16;

// 16 cells per axis: 40px columns across 640, 30px rows across 480.
pub const GRID_CELL_WIDTH: i16 = 40;
pub const GRID_CELL_HEIGHT: i16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub screen_width: i16,
    pub screen_height: i16,
    pub sprite_width: i16,
    pub sprite_height: i16,
}

impl ScreenLayout {
    pub const fn center_x(&self) -> i16 {
        self.screen_width / 2
    }

    pub const fn center_y(&self) -> i16 {
        self.screen_height / 2
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            sprite_width: SPRITE_WIDTH,
            sprite_height: SPRITE_HEIGHT,
        }
    }
}
