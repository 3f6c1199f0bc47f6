//! Precise block value: median of oversampled sub-cells.
//!
//! Each block is split into up to `OVERSAMPLE x OVERSAMPLE` sub-cells using the
//! same remainder rule as the block grid. Every sub-cell is reduced to its
//! mean luma and the block takes the median of those means, so a bright or
//! dark blemish confined to a few sub-cells cannot drag the block value the
//! way it drags a plain mean.

use super::super::partition::Partition;
use super::super::quantize::median;
use super::super::traits::{BlockValue, HashMethod};
use super::mean::mean_luma;
use crate::core::grid::PixelGrid;
use std::ops::Range;

/// Linear oversampling factor per block
pub const OVERSAMPLE: u32 = 4;

/// Median of sub-cell means within a block
#[derive(Debug, Clone, Copy)]
pub struct OversampledMedianBlockValue {
    factor: u32,
}

impl OversampledMedianBlockValue {
    pub fn new() -> Self {
        Self { factor: OVERSAMPLE }
    }

    /// Split a block span into at most `factor` non-empty sub-spans
    fn split(&self, span: Range<u32>) -> Option<Partition> {
        let cells = self.factor.min(span.len() as u32).max(1);
        Partition::over(span, cells)
    }
}

impl Default for OversampledMedianBlockValue {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockValue for OversampledMedianBlockValue {
    fn block_value(&self, grid: &PixelGrid, columns: Range<u32>, rows: Range<u32>) -> f64 {
        let (Some(column_cells), Some(row_cells)) =
            (self.split(columns.clone()), self.split(rows.clone()))
        else {
            return mean_luma(grid, columns, rows);
        };

        let mut cell_means = Vec::with_capacity((column_cells.len() * row_cells.len()) as usize);
        for cell_rows in row_cells.spans() {
            for cell_columns in column_cells.spans() {
                cell_means.push(mean_luma(grid, cell_columns, cell_rows.clone()));
            }
        }

        median(&mut cell_means)
    }

    fn method(&self) -> HashMethod {
        HashMethod::Precise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::PixelLayout;

    #[test]
    fn uniform_block_matches_mean() {
        let grid = PixelGrid::new(8, 8, PixelLayout::Luma, vec![77; 64]).unwrap();
        let value = OversampledMedianBlockValue::new().block_value(&grid, 0..8, 0..8);
        assert_eq!(value, 77.0);
    }

    #[test]
    fn local_outlier_is_suppressed() {
        // 8x8 block of 10s with a 2x2 bright blemish filling one sub-cell
        let mut samples = vec![10u8; 64];
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            samples[y * 8 + x] = 250;
        }
        let grid = PixelGrid::new(8, 8, PixelLayout::Luma, samples).unwrap();

        let precise = OversampledMedianBlockValue::new().block_value(&grid, 0..8, 0..8);
        assert_eq!(precise, 10.0);

        let mean = mean_luma(&grid, 0..8, 0..8);
        assert!(mean > precise);
    }

    #[test]
    fn narrow_block_uses_fewer_sub_cells() {
        // 2x1 block: two single-pixel sub-cells, median is their average
        let grid = PixelGrid::new(2, 1, PixelLayout::Luma, vec![0, 100]).unwrap();
        let value = OversampledMedianBlockValue::new().block_value(&grid, 0..2, 0..1);
        assert_eq!(value, 50.0);
    }

    #[test]
    fn method_is_precise() {
        assert_eq!(OversampledMedianBlockValue::new().method(), HashMethod::Precise);
    }
}
