use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's `error` string when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Admin session missing or expired; run `portfolio-cli login` first")]
    SessionRequired,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
