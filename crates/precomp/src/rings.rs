use thiserror::Error;

use crate::grid::AxisMaskTable;
use crate::quadrant::sprite_quadrant_mask;
use crate::ScreenLayout;

// One ULP below f32::consts::PI. The shipped tables were cut with this
// truncated constant; substituting the library value moves waypoints that
// sit on a truncation edge.
const PI_F32: f32 = 3.141_592_6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSpec {
    pub radius: i32,
    pub point_count: usize,
}

pub const DEFAULT_RINGS: [RingSpec; 8] = [
    RingSpec { radius: 50, point_count: 400 },
    RingSpec { radius: 70, point_count: 208 },
    RingSpec { radius: 90, point_count: 256 },
    RingSpec { radius: 110, point_count: 304 },
    RingSpec { radius: 130, point_count: 352 },
    RingSpec { radius: 150, point_count: 400 },
    RingSpec { radius: 170, point_count: 464 },
    RingSpec { radius: 190, point_count: 512 },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("ring {ring_index} point {point_index} lands at ({x}, {y}), outside 16-bit coordinates")]
    CoordinateOutOfRange { ring_index: usize, point_index: usize, x: i32, y: i32 },
    #[error("ring {ring_index} point {point_index} at ({x}, {y}) is off the spatial grid")]
    WaypointOffGrid { ring_index: usize, point_index: usize, x: i16, y: i16 },
    #[error("ring {ring_index} emitted {emitted} waypoints but {expected} were configured")]
    PointCountMismatch { ring_index: usize, expected: usize, emitted: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: i16,
    pub y: i16,
    pub quadrant_mask: u8,
    pub grid_mask_x: u16,
    pub grid_mask_y: u16,
    // Carried only for the provenance comments in the emitted text.
    pub angle_degrees: f32,
    pub angle_radians: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingPath {
    pub ring_index: usize,
    pub hradius: i32,
    pub vradius: i32,
    pub waypoints: Vec<Waypoint>,
}

// 4:3 matches the pixel aspect of the 640x480 mode. Ring 0 swaps the long
// axis, standing the innermost ring upright instead of flat.
pub fn ellipse_radii(ring_index: usize, radius: i32) -> (i32, i32) {
    if ring_index == 0 {
        let hradius = radius;
        let vradius = hradius.saturating_mul(4) / 3;
        (hradius, vradius)
    } else {
        let vradius = radius;
        let hradius = vradius.saturating_mul(4) / 3;
        (hradius, vradius)
    }
}

/// Sampling convention:
/// - the angle accumulates in f32, one increment of `360/point_count` per
///   step; regenerating on the same platform reproduces the shipped tables
///   byte for byte,
/// - positions truncate toward zero, never round,
/// - sampling stops at the configured count even when the accumulated angle
///   has not reached 360 degrees.
pub fn generate_ring_path(
    ring_index: usize,
    ring: RingSpec,
    screen: &ScreenLayout,
    x_masks: &AxisMaskTable,
    y_masks: &AxisMaskTable,
) -> Result<RingPath, PathError> {
    let (hradius, vradius) = ellipse_radii(ring_index, ring.radius);
    let center_x = f64::from(screen.center_x());
    let center_y = f64::from(screen.center_y());
    let half_sprite_w = i32::from(screen.sprite_width) / 2;
    let half_sprite_h = i32::from(screen.sprite_height) / 2;

    let increment = (360.0_f64 / ring.point_count as f64) as f32;
    let mut waypoints = Vec::with_capacity(ring.point_count);
    let mut angle_degrees = 0.0_f32;
    while angle_degrees < 360.0 {
        let angle_radians = 2.0_f32 * PI_F32 * angle_degrees / 360.0_f32;

        let x_wide = (f64::from(angle_radians).cos() * f64::from(hradius) + center_x) as i32
            - half_sprite_w;
        let y_wide = (f64::from(angle_radians).sin() * f64::from(vradius) + center_y) as i32
            - half_sprite_h;

        let point_index = waypoints.len();
        let x = i16::try_from(x_wide).map_err(|_| PathError::CoordinateOutOfRange {
            ring_index,
            point_index,
            x: x_wide,
            y: y_wide,
        })?;
        let y = i16::try_from(y_wide).map_err(|_| PathError::CoordinateOutOfRange {
            ring_index,
            point_index,
            x: x_wide,
            y: y_wide,
        })?;

        let grid_mask_x = x_masks
            .mask_at(x)
            .ok_or(PathError::WaypointOffGrid { ring_index, point_index, x, y })?;
        let grid_mask_y = y_masks
            .mask_at(y)
            .ok_or(PathError::WaypointOffGrid { ring_index, point_index, x, y })?;

        waypoints.push(Waypoint {
            x,
            y,
            quadrant_mask: sprite_quadrant_mask(x, y, screen),
            grid_mask_x,
            grid_mask_y,
            angle_degrees,
            angle_radians,
        });

        if waypoints.len() >= ring.point_count {
            break;
        }
        angle_degrees += increment;
    }

    if waypoints.len() != ring.point_count {
        return Err(PathError::PointCountMismatch {
            ring_index,
            expected: ring.point_count,
            emitted: waypoints.len(),
        });
    }

    Ok(RingPath { ring_index, hradius, vradius, waypoints })
}
