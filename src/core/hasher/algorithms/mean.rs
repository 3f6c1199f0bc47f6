//! Quick block value: mean luma.
//!
//! Every pixel of the block contributes equally. One pass over the image in
//! total, no dependency between blocks.

use super::super::traits::{BlockValue, HashMethod};
use crate::core::grid::PixelGrid;
use std::ops::Range;

/// Mean luma of all pixels in a block
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanBlockValue;

impl MeanBlockValue {
    pub fn new() -> Self {
        Self
    }
}

/// Mean luma over `columns x rows`. Shared with the oversampled strategy.
pub(super) fn mean_luma(grid: &PixelGrid, columns: Range<u32>, rows: Range<u32>) -> f64 {
    let count = columns.len() as u64 * rows.len() as u64;
    if count == 0 {
        return 0.0;
    }

    let mut total: u64 = 0;
    for y in rows {
        for x in columns.clone() {
            total += grid.luma(x, y) as u64;
        }
    }

    total as f64 / count as f64
}

impl BlockValue for MeanBlockValue {
    fn block_value(&self, grid: &PixelGrid, columns: Range<u32>, rows: Range<u32>) -> f64 {
        mean_luma(grid, columns, rows)
    }

    fn method(&self) -> HashMethod {
        HashMethod::Quick
    }
}
