use std::io::{self, Write};

use crate::hits::{HitTable, OFFSET_MIN, TABLE_SPAN};
use crate::quadrant::{MASK_BOTTOM, MASK_LEFT, MASK_RIGHT, MASK_TOP};
use crate::rings::RingPath;

pub const HIT_TABLE_LABEL: &str = "sprite_hit_decision";

// The emitted text is committed into the game source tree and diffed across
// regenerations. Field spacing, comment columns, and trailing blank lines
// are part of the format.
pub fn write_path_tables<W: Write>(
    out: &mut W,
    paths: &[RingPath],
    include_grid_masks: bool,
) -> io::Result<()> {
    for path in paths {
        writeln!(
            out,
            "sprite_path_{}: ; {}x{}, {} points",
            path.ring_index,
            path.hradius,
            path.vradius,
            path.waypoints.len()
        )?;
        for (ordinal, waypoint) in path.waypoints.iter().enumerate() {
            writeln!(
                out,
                "    .word    {},{}    ;   {}, angle: {:.6}, rads: {:.6}",
                waypoint.x, waypoint.y, ordinal, waypoint.angle_degrees, waypoint.angle_radians
            )?;
            writeln!(
                out,
                "    .byte    ${:02X}        ;   mask: {}",
                waypoint.quadrant_mask,
                mask_legend(waypoint.quadrant_mask)
            )?;
            if include_grid_masks {
                writeln!(
                    out,
                    "    .word    ${:04X},${:04X} ;   grid x,y",
                    waypoint.grid_mask_x, waypoint.grid_mask_y
                )?;
            }
        }
        writeln!(out, "end_sprite_path_{}: ; {}x{}", path.ring_index, path.hradius, path.vradius)?;
        writeln!(out)?;
    }
    Ok(())
}

// TODO: pack eight flags per byte once the runtime gains a bit-test
// lookup; one byte per flag costs 1 KiB of bank space.
pub fn write_hit_table<W: Write>(out: &mut W, table: &HitTable) -> io::Result<()> {
    writeln!(out, "{HIT_TABLE_LABEL}:")?;
    for (index, flag) in table.flags().iter().enumerate() {
        let dx = (index % TABLE_SPAN) as i16 + OFFSET_MIN;
        let dy = (index / TABLE_SPAN) as i16 + OFFSET_MIN;
        writeln!(out, "    .byte    {}    ; dx: {}, dy: {}", u8::from(*flag), dx, dy)?;
        if index % TABLE_SPAN == TABLE_SPAN - 1 {
            writeln!(out)?;
        }
    }
    Ok(())
}

// Legend letters run B, T, R, L to mirror the mask bits from high to low.
fn mask_legend(mask: u8) -> String {
    let bit = |flag: u8, letter: char| if mask & flag != 0 { letter } else { '-' };
    [
        bit(MASK_BOTTOM, 'B'),
        bit(MASK_TOP, 'T'),
        bit(MASK_RIGHT, 'R'),
        bit(MASK_LEFT, 'L'),
    ]
    .iter()
    .collect()
}
