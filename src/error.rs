//! Error types for the tactix crate

use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: ({row}, {col}) is occupied or out of bounds")]
    InvalidMove { row: usize, col: usize },

    #[error("no move available: the board is full")]
    NoMoveAvailable,

    #[error("unknown agent '{name}'")]
    UnknownVariant { name: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
