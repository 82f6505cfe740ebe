use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurlError>;

#[derive(Debug, Error)]
pub enum CurlError {
    /// The trimmed input does not start with the `curl` keyword.
    #[error("invalid curl command: input must start with `curl`")]
    NotCurl,
    #[error("failed to read command: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize request: {0}")]
    Json(#[from] serde_json::Error),
}
