use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Missing required field or a uniqueness conflict.
    #[error("{0}")]
    Validation(String),
    #[error("invalid provider id `{0}`: expected 24 hexadecimal characters")]
    MalformedId(String),
    #[error("{0}")]
    Db(String),
}
