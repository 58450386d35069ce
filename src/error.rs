use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpasError {
    #[error("github user not found: {0}")]
    UserNotFound(String),

    #[error("github rejected the credentials; check the configured token")]
    Unauthorized,

    #[error("github rate limit exceeded; set a token or retry later")]
    RateLimited,

    #[error("github api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GpasError>;
