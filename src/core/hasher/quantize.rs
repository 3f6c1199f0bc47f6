//! Reduction of block values to bits.
//!
//! Each row of blocks is thresholded against its own median: a block becomes
//! 1 when strictly brighter than the median of its row, 0 otherwise. This is
//! part of the fingerprint format; changing it breaks comparability with
//! previously stored fingerprints.

/// Median of `values`, averaging the middle pair for even lengths.
///
/// Reorders `values`. Returns 0.0 for an empty slice.
pub fn median(values: &mut [f64]) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }

    let mid = len / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;

    if len % 2 == 1 {
        return upper;
    }

    let lower = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (lower + upper) / 2.0
}

/// Threshold a `columns`-wide, row-major grid of block values.
pub fn quantize_rows(values: &[f64], columns: usize) -> Vec<bool> {
    let mut bits = Vec::with_capacity(values.len());
    let mut scratch = Vec::with_capacity(columns);

    for row in values.chunks(columns.max(1)) {
        scratch.clear();
        scratch.extend_from_slice(row);
        let threshold = median(&mut scratch);
        bits.extend(row.iter().map(|&value| value > threshold));
    }

    bits
}
