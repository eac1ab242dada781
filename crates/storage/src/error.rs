use conference::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for DirectoryError {
    fn from(e: Error) -> Self {
        DirectoryError::new(e)
    }
}
