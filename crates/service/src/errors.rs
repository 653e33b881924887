use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the provider service. Absence is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid provider id `{0}`: expected 24 hexadecimal characters")]
    MalformedId(String),
    #[error("{0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::MalformedId(raw) => Self::MalformedId(raw),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        models::provider::map_db_err(e).into()
    }
}
