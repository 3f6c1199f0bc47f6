//! Trait and parameter definitions for block hashing.

use crate::core::grid::PixelGrid;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Block-value aggregation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashMethod {
    /// Mean luma of each block, single pass
    #[default]
    Quick,
    /// Median of oversampled sub-cell means, robust to local outliers
    Precise,
}

impl HashMethod {
    /// Get a human-readable description of the method
    pub fn description(&self) -> &'static str {
        match self {
            HashMethod::Quick => "Quick - mean brightness of each block",
            HashMethod::Precise => {
                "Precise - median of 4x4 sub-cell means per block, resists local artifacts"
            }
        }
    }
}

impl std::fmt::Display for HashMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashMethod::Quick => write!(f, "quick"),
            HashMethod::Precise => write!(f, "precise"),
        }
    }
}

/// Grid size and method for one hash computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParameters {
    /// Side length of the block grid; the fingerprint has `bits * bits` bits
    pub bits: u32,
    /// Block-value strategy
    pub method: HashMethod,
}

impl HashParameters {
    pub fn new(bits: u32, method: HashMethod) -> Self {
        Self { bits, method }
    }

    /// Number of bits in the resulting fingerprint
    pub fn fingerprint_len(&self) -> usize {
        self.bits as usize * self.bits as usize
    }
}

impl Default for HashParameters {
    fn default() -> Self {
        Self::new(16, HashMethod::Quick)
    }
}

/// Computes one scalar brightness value for a rectangular block
pub trait BlockValue: Send + Sync {
    /// Value of the block spanning `columns x rows`; both spans are non-empty
    fn block_value(&self, grid: &PixelGrid, columns: Range<u32>, rows: Range<u32>) -> f64;

    /// The method this strategy implements
    fn method(&self) -> HashMethod;
}
