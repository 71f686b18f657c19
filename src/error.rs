use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),

    #[error("mention source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable {
        service: &'static str,
        message: String,
    },

    /// Model output that does not match the verdict contract, or a failed
    /// classification call.
    #[error("classification failed: {0}")]
    ClassificationFailure(String),
}

impl Error {
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
