use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Malformed trace: {0}")]
    TraceError(#[from] TraceError),

    #[error("Memory error: {0}")]
    MemoryError(#[from] MemoryError),
}

/// Errors in the cache geometry or run parameters
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "{level} size 2^{size_bits} cannot hold 2^{assoc_bits} ways of 2^{block_bits}-byte blocks"
    )]
    SetBitsUnderflow {
        level: &'static str,
        size_bits: usize,
        block_bits: usize,
        assoc_bits: usize,
    },

    #[error("{level} would hold 2^{line_bits} lines, the limit is 2^{max_bits}")]
    TooManyLines {
        level: &'static str,
        line_bits: usize,
        max_bits: usize,
    },

    #[error("{level} uses {block_bits} offset and {set_bits} set bits, leaving no tag bits")]
    AddressBitsExhausted {
        level: &'static str,
        block_bits: usize,
        set_bits: usize,
    },
}

/// Errors related to reading the trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("line {line}: expected '<op> <address>', {reason}")]
    FormatError { line: usize, reason: String },

    #[error("line {line}: unknown operation '{op}', expected 'r' or 'w'")]
    UnknownOperation { line: usize, op: char },

    #[error("line {line}: invalid hexadecimal address '{address}'")]
    InvalidAddress { line: usize, address: String },
}

/// Errors related to cache state
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Cache inconsistency detected for block {0:#x}: {1}")]
    CacheInconsistency(u64, String),
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
