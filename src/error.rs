use thiserror::Error;

/// Errors raised while normalizing a single placemark. Every kind is fatal to
/// the whole run; nothing is caught and retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    /// A required piece of structure is missing entirely, e.g. a placemark
    /// without a point or without extended data.
    #[error("structural error: {0}")]
    Structural(String),
    /// A value is present but does not match its required lexical pattern.
    #[error("format error: {0}")]
    Format(String),
    /// A well-formed value violates a domain constraint.
    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
