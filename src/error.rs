/// Error types; only startup can fail
use thiserror::Error;

/// Top-level error reported by `main`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Reasons a duration argument is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is negative")]
    Negative(String),

    #[error("duration {0:?} is too long")]
    Overflow(String),
}

/// Problems with the embedded colour cycle.
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("malformed palette: {0}")]
    Json(#[from] serde_json::Error),

    #[error("palette has no colors")]
    Empty,

    #[error("unknown color {0:?}")]
    UnknownColor(String),
}
