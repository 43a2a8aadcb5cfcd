//! User-facing error kinds

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Authentication required. {0}")]
    AuthRequired(&'static str),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),
}
