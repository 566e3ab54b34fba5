use thiserror::Error;

use crate::flavor::ModelFlavor;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("fit error: {0}")]
    Fit(String),

    #[error("{flavor} model takes {expected} coefficients, got {got}")]
    Arity {
        flavor: ModelFlavor,
        expected: usize,
        got: usize,
    },

    #[error("unknown model flavor: {0} (expected simple, classic, full or extra)")]
    UnknownFlavor(String),

    #[error("unknown parameter {name} for {flavor} model")]
    UnknownParameter { flavor: ModelFlavor, name: String },

    #[error("singular position az={az} alt={alt}: zenith distance must lie strictly between 0 and 180 degrees")]
    Singular { az: f64, alt: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
