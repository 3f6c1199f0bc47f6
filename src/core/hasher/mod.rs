//! # Hasher Module
//!
//! Computes block-hash fingerprints from decoded pixel grids.
//!
//! ## Methods
//! - **Quick** - mean brightness per block, fastest
//! - **Precise** - median of oversampled sub-cells, resists artifacts
//!
//! ## How It Works
//! 1. Split the image into a `bits x bits` grid of blocks (no resizing)
//! 2. Reduce each block to one brightness value
//! 3. Threshold each row of blocks against its own median
//! 4. Emit the bits in row-major block order
//!
//! ## Example
//! ```rust,ignore
//! use image_blockhash::core::hasher::{HasherConfig, HashMethod};
//!
//! let hasher = HasherConfig::new()
//!     .method(HashMethod::Precise)
//!     .bits(16)
//!     .build()?;
//!
//! let fingerprint = hasher.hash(&grid)?;
//! ```

mod algorithms;
mod partition;
mod quantize;
mod traits;

pub use algorithms::{MeanBlockValue, OversampledMedianBlockValue, OVERSAMPLE};
pub use partition::Partition;
pub use quantize::{median, quantize_rows};
pub use traits::{BlockValue, HashMethod, HashParameters};

use crate::core::decode::{self, DispatchConfig, ImageSource};
use crate::core::fingerprint::Fingerprint;
use crate::core::grid::PixelGrid;
use crate::error::{HashError, Result};
use tracing::debug;

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    params: HashParameters,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults (16x16, Quick)
    pub fn new() -> Self {
        Self {
            params: HashParameters::default(),
        }
    }

    /// Set the block grid side length
    ///
    /// The fingerprint has `bits * bits` bits.
    /// - 8: 64 bits, coarse
    /// - 16: 256 bits, the usual choice
    /// - 32: 1024 bits, needs images of at least 32x32
    pub fn bits(mut self, bits: u32) -> Self {
        self.params.bits = bits;
        self
    }

    /// Set the block-value method
    pub fn method(mut self, method: HashMethod) -> Self {
        self.params.method = method;
        self
    }

    /// Build the hasher
    pub fn build(self) -> std::result::Result<BlockHasher, HashError> {
        BlockHasher::new(self.params)
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Block hash engine bound to one set of parameters.
///
/// Stateless between calls; share freely across threads.
pub struct BlockHasher {
    params: HashParameters,
    strategy: Box<dyn BlockValue>,
}

impl BlockHasher {
    /// Create a hasher, rejecting a zero-sized block grid
    pub fn new(params: HashParameters) -> std::result::Result<Self, HashError> {
        if params.bits == 0 {
            return Err(HashError::ZeroBits);
        }

        let strategy: Box<dyn BlockValue> = match params.method {
            HashMethod::Quick => Box::new(MeanBlockValue::new()),
            HashMethod::Precise => Box::new(OversampledMedianBlockValue::new()),
        };

        Ok(Self { params, strategy })
    }

    pub fn params(&self) -> HashParameters {
        self.params
    }

    /// Fingerprint a decoded grid
    pub fn hash(&self, grid: &PixelGrid) -> std::result::Result<Fingerprint, HashError> {
        let (width, height) = (grid.width(), grid.height());
        if width == 0 || height == 0 {
            return Err(HashError::EmptyImage { width, height });
        }

        let bits = self.params.bits;
        let empty_blocks = HashError::EmptyBlocks {
            bits,
            width,
            height,
        };
        let columns = Partition::new(width, bits).ok_or_else(|| empty_blocks.clone())?;
        let rows = Partition::new(height, bits).ok_or(empty_blocks)?;

        let mut values = Vec::with_capacity(self.params.fingerprint_len());
        for row_span in rows.spans() {
            for column_span in columns.spans() {
                values.push(self.strategy.block_value(grid, column_span, row_span.clone()));
            }
        }

        let fingerprint = Fingerprint::from_bits(quantize_rows(&values, bits as usize));
        debug!(
            width,
            height,
            bits,
            method = %self.strategy.method(),
            "computed block hash"
        );

        Ok(fingerprint)
    }

    /// Decode a path or buffer and fingerprint its first frame
    pub fn hash_source(
        &self,
        source: &ImageSource,
        config: &DispatchConfig,
    ) -> Result<Fingerprint> {
        let decoded = decode::load(source, config)?;
        Ok(self.hash(&decoded.grid)?)
    }
}

/// Fingerprint `grid` with a `bits x bits` block grid
pub fn compute_hash(
    grid: &PixelGrid,
    bits: u32,
    method: HashMethod,
) -> std::result::Result<Fingerprint, HashError> {
    BlockHasher::new(HashParameters::new(bits, method))?.hash(grid)
}
