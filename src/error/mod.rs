//! # Error Module
//!
//! Error types for fingerprinting, comparison and image decoding.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, dimensions, what went wrong
//! - **Keep failures distinct** - a format mismatch is not a corrupt file

use crate::core::decode::ContainerFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum BlockhashError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Invalid input handed to the block hash engine.
///
/// Every variant is fatal to the call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Block grid size must be at least 1")]
    ZeroBits,

    #[error(
        "A {bits}x{bits} block grid does not fit a {width}x{height} image: \
         every block needs at least one pixel"
    )]
    EmptyBlocks { bits: u32, width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} samples, expected {expected}")]
    SampleCount { expected: usize, actual: usize },
}

/// Errors that occur when comparing fingerprints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Fingerprints have different lengths ({left} vs {right} bits)")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid threshold: {value} (must be 0-64)")]
    InvalidThreshold { value: u32 },
}

/// Errors that occur when parsing a serialized fingerprint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("Invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit { position: usize, found: char },

    #[error("Hex fingerprint has {actual} digits, expected {expected}")]
    HexLength { expected: usize, actual: usize },
}

/// Errors produced at the decode boundary
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported or unrecognized image format: {detail}")]
    Unsupported { detail: String },

    #[error("File extension .{extension} does not match detected content type {detected}")]
    FormatMismatch {
        extension: String,
        detected: ContainerFormat,
    },

    #[error("Failed to decode {format} image: {reason}")]
    Corrupt {
        format: ContainerFormat,
        reason: String,
    },

    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, BlockhashError>;
