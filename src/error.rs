//! Error handling and custom error types
//!
//! Provides unified error handling across the studio using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller omitted a required prompt or image. Raised before any remote call.
    #[error("{0}")]
    Input(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error: {0}")]
    AiProvider(String),

    /// The remote call succeeded but carried no usable payload.
    #[error("{0}")]
    EmptyResult(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the outbound call itself failed (network, auth, quota).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::AiProvider(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
