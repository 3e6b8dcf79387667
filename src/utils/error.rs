use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpRequestError {
    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Invalid url: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML configuration error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Path parameter error: {message}")]
    PathParamsError { message: String },

    #[error("{message}")]
    UnexpectedStatusCode { message: String },

    #[error("{message}")]
    ErrorsInResponse { message: String },
}

pub type Result<T> = std::result::Result<T, HttpRequestError>;
