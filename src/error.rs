use thiserror::Error;

#[derive(Error, Debug)]
pub enum YapError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("content is empty")]
    EmptyContent,

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unexpected response shape: {0}")]
    QueryShape(String),

    #[error("catalog snapshot unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("no records matched: {0}")]
    NoMatch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, YapError>;
