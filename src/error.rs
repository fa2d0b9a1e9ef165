//! Error types of this crate
//!
//! None of them escape the [`Generator`](crate::generator::Generator) operations: they are turned into notifications.

use thiserror::Error;

/// Why a date string could not be normalized
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateParseError {
    #[error("empty date string")]
    Empty,

    #[error("unrecognized date format: {0}")]
    Unrecognized(String),
}

/// Why an assembled record could not be turned into its textual form
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid property name: {0:?}")]
    InvalidPropertyName(String),

    #[error("property {property} contains a forbidden character {character:?}")]
    ForbiddenCharacter { property: String, character: char },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
