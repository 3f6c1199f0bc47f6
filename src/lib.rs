//! # Image Blockhash
//!
//! Perceptual fingerprints for near-duplicate image detection.
//!
//! An image is split into a `bits x bits` grid of blocks, each block is
//! reduced to one brightness value, and every row of blocks is thresholded
//! against its own median. Visually similar images end up a small Hamming
//! distance apart; unrelated images differ in many bits.
//!
//! ## Architecture
//! - `core` - Hash engine, fingerprint type, comparator, decode boundary
//! - `events` - Progress reporting for batch runs
//! - `error` - Error types
//!
//! ## Example
//! ```rust,ignore
//! use image_blockhash::core::{compute_hash, hamming_distance, HashMethod};
//!
//! let a = compute_hash(&grid_a, 16, HashMethod::Quick)?;
//! let b = compute_hash(&grid_b, 16, HashMethod::Quick)?;
//! println!("{} bits apart", hamming_distance(&a, &b)?);
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::{
    compute_hash, hamming_distance, Fingerprint, HashMethod, HasherConfig, PixelGrid,
};
pub use error::{BlockhashError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` over
/// `warn`. Calling this more than once keeps the first subscriber.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
