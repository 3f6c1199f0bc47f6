//! # Comparator Module
//!
//! Compares fingerprints by Hamming distance.
//!
//! ## How It Works
//! 1. Reject fingerprints of different lengths outright
//! 2. Count the bit positions that differ
//! 3. Classify the distance on a 64-bit scale so thresholds mean the same
//!    thing for every grid size
//!
//! ## Classification (64-bit scale)
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11+      | Different     |

mod traits;

pub use traits::{ComparisonStrategy, ThresholdStrategy};

use crate::core::fingerprint::Fingerprint;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};

/// Number of bits in the reference scale used for thresholds
pub const REFERENCE_BITS: u32 = 64;

/// Count differing bit positions. Lengths must match.
pub fn hamming_distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, CompareError> {
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    // Padding bits are always zero, so whole bytes can be XORed
    Ok(a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum())
}

/// Similarity as a percentage (0-100)
pub fn similarity(a: &Fingerprint, b: &Fingerprint) -> Result<f64, CompareError> {
    let distance = hamming_distance(a, b)?;
    if a.is_empty() {
        return Ok(100.0);
    }
    Ok((1.0 - distance as f64 / a.len() as f64) * 100.0)
}

/// Rescale a distance over `len` bits to the 64-bit reference scale
pub fn normalized_distance(distance: u32, len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    let scaled = distance as f64 * REFERENCE_BITS as f64 / len as f64;
    scaled.round() as u32
}

/// Like [`normalized_distance`], but any nonzero distance stays at least 1
pub fn scaled_distance(distance: u32, len: usize) -> u32 {
    if distance == 0 {
        return 0;
    }
    normalized_distance(distance, len).max(1)
}

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// No differing bits
    Exact,
    /// 1-4 bits on the 64-bit scale, virtually identical
    NearExact,
    /// 5-10 bits on the 64-bit scale, likely the same picture
    Similar,
    /// Anything further apart
    Different,
}

impl MatchType {
    /// Classify a distance already expressed on the 64-bit scale
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=10 => MatchType::Similar,
            _ => MatchType::Different,
        }
    }

    /// Classify a raw distance over a fingerprint of `len` bits
    pub fn classify(distance: u32, len: usize) -> Self {
        Self::from_distance(scaled_distance(distance, len))
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::Different => write!(f, "Different"),
        }
    }
}

/// Result of comparing two fingerprints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Hamming distance in bits
    pub distance: u32,
    /// Fingerprint length in bits
    pub bits: usize,
    /// Similarity as a percentage (0-100)
    pub similarity_percent: f64,
    /// Classification of the match
    pub match_type: MatchType,
    /// Verdict of the comparison strategy
    pub is_match: bool,
}

/// Compare two fingerprints under `strategy`
pub fn compare(
    a: &Fingerprint,
    b: &Fingerprint,
    strategy: &dyn ComparisonStrategy,
) -> Result<MatchResult, CompareError> {
    let distance = hamming_distance(a, b)?;
    let bits = a.len();

    Ok(MatchResult {
        distance,
        bits,
        similarity_percent: similarity(a, b)?,
        match_type: MatchType::classify(distance, bits),
        is_match: strategy.is_match(distance, bits),
    })
}
