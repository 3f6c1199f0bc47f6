//! # Pipeline Module
//!
//! Batch fingerprinting:
//! 1. **Scan** - expand input paths into image files
//! 2. **Hash** - decode and fingerprint each source in parallel
//!
//! Each source is independent; one failure never aborts the others.

mod executor;

pub use executor::{HashOutcome, Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};
