use thiserror::Error;

/// Errors raised by the helpers.
///
/// The cloner itself never fails; errors come from argument checks,
/// value construction and JSON export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid regular expression flag '{0}'")]
    InvalidFlag(char),
    #[error("duplicate regular expression flag '{0}'")]
    DuplicateFlag(char),
    #[error("time value out of range: {0}")]
    TimeOutOfRange(i64),
    #[error("converting circular structure to JSON")]
    CyclicValue,
}

pub type Result<T> = std::result::Result<T, Error>;
