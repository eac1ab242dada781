//! Error types for conference authorization setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("policy error: {0}")]
    Policy(#[from] policy::Error),

    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

pub type Result<T> = std::result::Result<T, Error>;
