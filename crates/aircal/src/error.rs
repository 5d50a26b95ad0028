//! Error types for broadcast-calendar operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid count: {0}")]
    InvalidCount(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, CalError>;
