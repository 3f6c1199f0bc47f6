//! Trait definitions for comparison strategies.

use super::{scaled_distance, MatchType, REFERENCE_BITS};
use crate::error::CompareError;

/// Strategy trait for deciding whether two fingerprints match
pub trait ComparisonStrategy: Send + Sync {
    /// Decide from a raw distance over a fingerprint of `bits` bits
    fn is_match(&self, distance: u32, bits: usize) -> bool;

    /// Classify the match type
    fn classify(&self, distance: u32, bits: usize) -> MatchType {
        MatchType::classify(distance, bits)
    }

    /// Get the threshold used, on the 64-bit scale
    fn threshold(&self) -> u32;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Simple threshold-based comparison strategy
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    /// Maximum distance on the 64-bit scale still counted as a match
    threshold: u32,
}

impl ThresholdStrategy {
    /// Create a new threshold strategy
    ///
    /// Recommended thresholds:
    /// - 5: Conservative, few false positives
    /// - 8: Balanced (default)
    /// - 10: Permissive, catches more near-duplicates
    pub fn new(threshold: u32) -> Result<Self, CompareError> {
        if threshold > REFERENCE_BITS {
            return Err(CompareError::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    /// Create a conservative strategy (threshold = 5)
    pub fn conservative() -> Self {
        Self { threshold: 5 }
    }

    /// Create a balanced strategy (threshold = 8)
    pub fn balanced() -> Self {
        Self { threshold: 8 }
    }

    /// Create a permissive strategy (threshold = 10)
    pub fn permissive() -> Self {
        Self { threshold: 10 }
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::balanced()
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_match(&self, distance: u32, bits: usize) -> bool {
        scaled_distance(distance, bits) <= self.threshold
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }

    fn description(&self) -> String {
        format!(
            "Threshold strategy: fingerprints within {} of 64 bits are considered matches",
            self.threshold
        )
    }
}
