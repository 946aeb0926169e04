use thiserror::Error;

#[derive(Error, Debug)]
pub enum PitstopError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
