use thiserror::Error;

pub const CELL_MASK_BITS: u32 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("axis length must be positive, got {axis_len}")]
    AxisLenNotPositive { axis_len: i16 },
    #[error("cell size must be positive, got {cell_size}")]
    CellSizeNotPositive { cell_size: i16 },
    #[error("sprite footprint must be positive, got {footprint}")]
    FootprintNotPositive { footprint: i16 },
    #[error("axis length {axis_len} is not a whole number of {cell_size}px cells")]
    AxisNotCellAligned { axis_len: i16, cell_size: i16 },
    #[error("axis splits into {cells} cells but the mask holds {max} bits")]
    TooManyCells { cells: i32, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAxis {
    axis_len: i16,
    cell_size: i16,
    footprint: i16,
    cell_count: i32,
}

impl GridAxis {
    pub fn new(axis_len: i16, cell_size: i16, footprint: i16) -> Result<Self, GridError> {
        if axis_len <= 0 {
            return Err(GridError::AxisLenNotPositive { axis_len });
        }
        if cell_size <= 0 {
            return Err(GridError::CellSizeNotPositive { cell_size });
        }
        if footprint <= 0 {
            return Err(GridError::FootprintNotPositive { footprint });
        }
        if axis_len % cell_size != 0 {
            return Err(GridError::AxisNotCellAligned { axis_len, cell_size });
        }
        let cell_count = i32::from(axis_len / cell_size);
        if cell_count > CELL_MASK_BITS as i32 {
            return Err(GridError::TooManyCells { cells: cell_count, max: CELL_MASK_BITS });
        }
        Ok(Self { axis_len, cell_size, footprint, cell_count })
    }

    pub fn axis_len(&self) -> i16 {
        self.axis_len
    }

    pub fn cell_count(&self) -> i32 {
        self.cell_count
    }

    /// Mask convention:
    /// - cells are walked in ascending index order, shifting the accumulator
    ///   left each step, so cell 0 lands in the most significant bit,
    /// - overlap is half-open on both sides; a footprint ending exactly on a
    ///   cell boundary does not claim the next cell.
    pub fn mask_for_anchor(&self, anchor: i16) -> u16 {
        let footprint_start = i32::from(anchor);
        let footprint_end = footprint_start + i32::from(self.footprint);

        let mut mask = 0u16;
        for cell_index in 0..self.cell_count {
            let cell_start = cell_index * i32::from(self.cell_size);
            let cell_end = cell_start + i32::from(self.cell_size);
            mask <<= 1;
            if footprint_start < cell_end && footprint_end > cell_start {
                mask |= 1;
            }
        }
        mask
    }

    pub fn position_masks(&self) -> AxisMaskTable {
        let masks = (0..self.axis_len)
            .map(|anchor| self.mask_for_anchor(anchor))
            .collect();
        AxisMaskTable { axis_len: self.axis_len, masks }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisMaskTable {
    axis_len: i16,
    masks: Vec<u16>,
}

impl AxisMaskTable {
    pub fn axis_len(&self) -> i16 {
        self.axis_len
    }

    pub fn mask_at(&self, anchor: i16) -> Option<u16> {
        if anchor < 0 || anchor >= self.axis_len {
            return None;
        }
        Some(self.masks[anchor as usize])
    }

    pub fn masks(&self) -> &[u16] {
        &self.masks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_axis() -> GridAxis {
        GridAxis::new(640, 40, 16).expect("640px axis with 40px cells")
    }

    fn y_axis() -> GridAxis {
        GridAxis::new(480, 30, 16).expect("480px axis with 30px cells")
    }

    #[test]
    fn anchor_zero_claims_the_most_significant_bit() {
        assert_eq!(x_axis().mask_for_anchor(0), 0x8000);
        assert_eq!(y_axis().mask_for_anchor(0), 0x8000);
    }

    #[test]
    fn footprint_crossing_a_boundary_claims_both_cells() {
        // Columns 39..=54 touch cell 0 and cell 1.
        assert_eq!(x_axis().mask_for_anchor(39), 0xC000);
        // Columns 25..=40 touch cell 0 and cell 1 of the 30px axis.
        assert_eq!(y_axis().mask_for_anchor(25), 0xC000);
    }

    #[test]
    fn footprint_ending_on_a_boundary_stays_in_one_cell() {
        // Columns 24..=39 end exactly where cell 1 begins.
        assert_eq!(x_axis().mask_for_anchor(24), 0x8000);
        assert_eq!(x_axis().mask_for_anchor(40), 0x4000);
    }

    #[test]
    fn last_cell_lands_in_the_least_significant_bit() {
        assert_eq!(x_axis().mask_for_anchor(624), 0x0001);
        assert_eq!(x_axis().mask_for_anchor(599), 0x0003);
        assert_eq!(y_axis().mask_for_anchor(464), 0x0001);
    }

    #[test]
    fn every_onscreen_anchor_claims_the_cells_its_span_covers() {
        let axis = x_axis();
        for anchor in 0..axis.axis_len() {
            let mask = axis.mask_for_anchor(anchor);
            let first_cell = i32::from(anchor) / 40;
            let last_cell = ((i32::from(anchor) + 15) / 40).min(axis.cell_count() - 1);
            let expected_cells = (last_cell - first_cell + 1) as u32;
            assert_eq!(
                mask.count_ones(),
                expected_cells,
                "anchor {anchor} should cover cells {first_cell}..={last_cell}"
            );
        }
    }

    #[test]
    fn mask_table_matches_direct_computation() {
        let axis = y_axis();
        let table = axis.position_masks();
        assert_eq!(table.axis_len(), 480);
        assert_eq!(table.masks().len(), 480);
        for anchor in [0i16, 25, 239, 240, 464, 479] {
            assert_eq!(table.mask_at(anchor), Some(axis.mask_for_anchor(anchor)));
        }
    }

    #[test]
    fn mask_lookup_outside_the_axis_is_none() {
        let table = x_axis().position_masks();
        assert_eq!(table.mask_at(-1), None);
        assert_eq!(table.mask_at(640), None);
        assert_eq!(table.mask_at(i16::MIN), None);
        assert!(table.mask_at(639).is_some());
    }

    #[test]
    fn misaligned_axis_is_rejected() {
        assert_eq!(
            GridAxis::new(640, 37, 16),
            Err(GridError::AxisNotCellAligned { axis_len: 640, cell_size: 37 })
        );
    }

    #[test]
    fn too_fine_a_grid_is_rejected() {
        assert_eq!(
            GridAxis::new(640, 20, 16),
            Err(GridError::TooManyCells { cells: 32, max: CELL_MASK_BITS })
        );
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert_eq!(
            GridAxis::new(0, 40, 16),
            Err(GridError::AxisLenNotPositive { axis_len: 0 })
        );
        assert_eq!(
            GridAxis::new(640, 0, 16),
            Err(GridError::CellSizeNotPositive { cell_size: 0 })
        );
        assert_eq!(
            GridAxis::new(640, 40, -1),
            Err(GridError::FootprintNotPositive { footprint: -1 })
        );
    }
}
