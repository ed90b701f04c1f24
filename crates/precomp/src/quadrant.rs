use crate::ScreenLayout;

pub const MASK_LEFT: u8 = 0x10;
pub const MASK_RIGHT: u8 = 0x20;
pub const MASK_TOP: u8 = 0x40;
pub const MASK_BOTTOM: u8 = 0x80;

// The runtime writes the whole mask byte into the VERA sprite attribute,
// so the depth bits ride along even when no quadrant bit is set.
pub const ZDEPTH_ABOVE_LAYER_1: u8 = 0x0C;

#[derive(Debug, Clone, Copy)]
struct QuadrantBounds {
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl QuadrantBounds {
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }
}

fn box_touches(bounds: QuadrantBounds, x: i16, y: i16, screen: &ScreenLayout) -> bool {
    // Corner math widens to i32 so anchors near i16::MAX cannot wrap.
    let first_x = i32::from(x);
    let first_y = i32::from(y);
    let last_x = first_x + i32::from(screen.sprite_width) - 1;
    let last_y = first_y + i32::from(screen.sprite_height) - 1;

    bounds.contains(first_x, first_y)
        || bounds.contains(last_x, first_y)
        || bounds.contains(first_x, last_y)
        || bounds.contains(last_x, last_y)
}

/// Quadrant membership convention:
/// - quadrant ranges are half-open, split at the exact screen center,
/// - a sprite box touches a quadrant when any of its four corners lies inside,
/// - a box spanning a centerline collects the bits of every quadrant it
///   touches; a fully offscreen box collects none.
pub fn sprite_quadrant_mask(x: i16, y: i16, screen: &ScreenLayout) -> u8 {
    let center_x = i32::from(screen.center_x());
    let center_y = i32::from(screen.center_y());
    let width = i32::from(screen.screen_width);
    let height = i32::from(screen.screen_height);

    let quadrants = [
        (
            QuadrantBounds { x_min: 0, x_max: center_x, y_min: 0, y_max: center_y },
            MASK_TOP | MASK_LEFT,
        ),
        (
            QuadrantBounds { x_min: center_x, x_max: width, y_min: 0, y_max: center_y },
            MASK_TOP | MASK_RIGHT,
        ),
        (
            QuadrantBounds { x_min: 0, x_max: center_x, y_min: center_y, y_max: height },
            MASK_BOTTOM | MASK_LEFT,
        ),
        (
            QuadrantBounds { x_min: center_x, x_max: width, y_min: center_y, y_max: height },
            MASK_BOTTOM | MASK_RIGHT,
        ),
    ];

    let mut mask = ZDEPTH_ABOVE_LAYER_1;
    for (bounds, bits) in quadrants {
        if box_touches(bounds, x, y, screen) {
            mask |= bits;
        }
    }
    mask
}
