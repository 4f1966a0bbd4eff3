// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the library
#[derive(Error, Debug)]
pub enum SchemeError {
    #[error("field '{0}' is not defined in the scheme")]
    UnknownField(String),

    #[error("duplicate field '{0}' in scheme")]
    DuplicateField(String),

    #[error("invalid selector '{selector}' for {context}: {message}")]
    BadSelector {
        context: String,
        selector: String,
        message: String,
    },

    #[error("scheme has no season field '{0}'")]
    MissingSeasonField(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no season rows found in any source table")]
    NoSeasons,

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("season '{0}' not found in record")]
    UnknownSeason(String),
}

#[derive(Error, Debug)]
pub enum StatError {
    #[error("scheme error: {0}")]
    Scheme(#[from] SchemeError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("season selection failed: {0}")]
    Select(#[from] SelectError),
}
