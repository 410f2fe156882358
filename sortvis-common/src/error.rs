//! Common error types for sortvis
//!
//! Cancellation is deliberately absent from this taxonomy: a cancelled run is an
//! ordinary outcome (`RunOutcome::Cancelled`), never an error.

use thiserror::Error;
use uuid::Uuid;

/// Common result type for sortvis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the sortvis crates
#[derive(Error, Debug)]
pub enum Error {
    /// Out-of-range array access (programmer error, never produced by a correct algorithm)
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Array length at the time of the access
        len: usize,
    },

    /// Bar count, delay or other parameter outside its configured bounds
    ///
    /// Only strict validators produce this; the driver clamps instead.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Another run already owns the array
    #[error("A sort run is already active (run {0})")]
    RunActive(Uuid),

    /// Configuration file loading or parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (poisoned lock, worker thread panic)
    #[error("Internal error: {0}")]
    Internal(String),
}
