use crate::bitmap::{OpacityBitmap, BITMAP_SIZE};

pub const OFFSET_MIN: i16 = -16;
pub const OFFSET_MAX: i16 = 16;
pub const TABLE_SPAN: usize = 32;
pub const TABLE_LEN: usize = TABLE_SPAN * TABLE_SPAN;

/// Offset convention:
/// - `(dx, dy)` is where the reference sprite sits relative to the probe,
///   matching the runtime's `x1 - x2` after its coarse checks pass,
/// - flags are row-major with `dy` as the slow axis, indexed by `dx + 16`
///   and `dy + 16`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTable {
    flags: Vec<bool>,
}

impl HitTable {
    pub fn build(reference: &OpacityBitmap, probe: &OpacityBitmap) -> Self {
        let mut flags = Vec::with_capacity(TABLE_LEN);
        for dy in OFFSET_MIN..OFFSET_MAX {
            for dx in OFFSET_MIN..OFFSET_MAX {
                flags.push(pixels_collide(reference, probe, dx, dy));
            }
        }
        Self { flags }
    }

    // Offsets outside the stored range cannot overlap two 16x16 boxes and
    // always report false, so callers need no range check.
    pub fn hit(&self, dx: i16, dy: i16) -> bool {
        if !(OFFSET_MIN..OFFSET_MAX).contains(&dx) || !(OFFSET_MIN..OFFSET_MAX).contains(&dy) {
            return false;
        }
        let row = (dy - OFFSET_MIN) as usize;
        let column = (dx - OFFSET_MIN) as usize;
        self.flags[row * TABLE_SPAN + column]
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn hit_count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }
}

fn pixels_collide(reference: &OpacityBitmap, probe: &OpacityBitmap, dx: i16, dy: i16) -> bool {
    let size = BITMAP_SIZE as i16;
    for y1 in 0..size {
        // Probe pixels falling outside the 16x16 box are skipped, not clamped.
        let y2 = y1 - dy;
        if y2 < 0 || y2 >= size {
            continue;
        }
        for x1 in 0..size {
            let x2 = x1 - dx;
            if x2 < 0 || x2 >= size {
                continue;
            }
            if reference.is_opaque(x1 as usize, y1 as usize)
                && probe.is_opaque(x2 as usize, y2 as usize)
            {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_table() -> HitTable {
        let diamond = OpacityBitmap::diamond_test_pattern();
        HitTable::build(&diamond, &diamond)
    }

    #[test]
    fn table_holds_one_flag_per_offset_pair() {
        assert_eq!(diamond_table().flags().len(), TABLE_LEN);
    }

    #[test]
    fn zero_offset_always_collides_for_nonempty_sprites() {
        assert!(diamond_table().hit(0, 0));
    }

    #[test]
    fn diamond_tips_touch_at_seven_pixels_apart() {
        let table = diamond_table();
        // Right tip of one diamond over the left tip of the other.
        assert!(table.hit(7, 0));
        assert!(table.hit(-7, 0));
        assert!(table.hit(0, 7));
        assert!(!table.hit(8, 0));
        assert!(!table.hit(0, 8));
    }

    #[test]
    fn diagonal_offsets_miss_sooner_than_axis_offsets() {
        let table = diamond_table();
        assert!(table.hit(3, 3));
        assert!(table.hit(4, 4));
        assert!(!table.hit(5, 5));
    }

    #[test]
    fn edge_of_range_offsets_never_collide() {
        let table = diamond_table();
        for other in OFFSET_MIN..OFFSET_MAX {
            assert!(!table.hit(OFFSET_MIN, other));
            assert!(!table.hit(other, OFFSET_MIN));
        }
    }

    #[test]
    fn out_of_range_offsets_report_false() {
        let table = diamond_table();
        assert!(!table.hit(16, 0));
        assert!(!table.hit(0, 16));
        assert!(!table.hit(-17, 0));
        assert!(!table.hit(i16::MAX, i16::MIN));
    }

    #[test]
    fn identical_sprites_collide_symmetrically() {
        let table = diamond_table();
        for dy in OFFSET_MIN..OFFSET_MAX {
            for dx in OFFSET_MIN..OFFSET_MAX {
                assert_eq!(
                    table.hit(dx, dy),
                    table.hit(-dx, -dy),
                    "offset ({dx}, {dy})"
                );
            }
        }
    }

    #[test]
    fn asymmetric_sprites_collide_at_exactly_one_offset() {
        let mut reference_rows = [[0u8; BITMAP_SIZE]; BITMAP_SIZE];
        reference_rows[0][0] = 1;
        let mut probe_rows = [[0u8; BITMAP_SIZE]; BITMAP_SIZE];
        probe_rows[15][15] = 1;

        let table = HitTable::build(
            &OpacityBitmap::from_rows(reference_rows),
            &OpacityBitmap::from_rows(probe_rows),
        );

        // Reference pixel (0,0) only lands on probe pixel (15,15) when
        // the reference sits 15 up and 15 left of the probe.
        assert!(table.hit(-15, -15));
        assert_eq!(table.hit_count(), 1);
    }

    #[test]
    fn empty_sprites_never_collide() {
        let empty = OpacityBitmap::from_rows([[0; BITMAP_SIZE]; BITMAP_SIZE]);
        let table = HitTable::build(&empty, &empty);
        assert_eq!(table.hit_count(), 0);
    }
}
