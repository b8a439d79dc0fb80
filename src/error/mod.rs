use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not access transactions file")]
    FileError(#[from] std::io::Error),
    #[error("could not encode transactions as JSON")]
    JsonError(#[from] serde_json::Error),
    #[error("could not convert CSV rows to transactions")]
    CsvError(#[from] csv::Error),
    #[error("could not persist transactions")]
    StorageError(#[source] Box<Error>),
    #[error(transparent)]
    BusinessError(#[from] crate::domain::error::Error),
    #[error(transparent)]
    FormError(#[from] crate::domain::form::FormError),
}

pub type Result<T> = std::result::Result<T, Error>;
