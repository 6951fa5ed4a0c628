//! Error types for Obscura Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input document is empty or whitespace-only")]
    EmptyInput,

    #[error("policy violation: {0}")]
    Policy(String),

    #[error("invalid category pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("crypto error: {0}")]
    Crypto(String),
}

pub type Result<T> = std::result::Result<T, Error>;
