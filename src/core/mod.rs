//! # Core Module
//!
//! The fingerprinting engine.
//!
//! ## Modules
//! - `grid` - Decoded pixel grid contract
//! - `hasher` - Block hash engine
//! - `fingerprint` - Fingerprint value and hex form
//! - `comparator` - Hamming distance and match classification
//! - `decode` - Format dispatch and decoding
//! - `scanner` - Discovers image files in directories
//! - `pipeline` - Parallel batch hashing

pub mod comparator;
pub mod decode;
pub mod fingerprint;
pub mod grid;
pub mod hasher;
pub mod pipeline;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{hamming_distance, MatchResult, MatchType};
pub use decode::{ContainerFormat, DispatchConfig, ImageSource};
pub use fingerprint::Fingerprint;
pub use grid::{PixelGrid, PixelLayout};
pub use hasher::{compute_hash, BlockHasher, HashMethod, HashParameters, HasherConfig};
