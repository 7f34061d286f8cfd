use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("credentials not initialized")]
    NotInitialized,

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("object error: {0}")]
    Object(#[from] parse_object::ObjectError),

    #[error("value error: {0}")]
    Type(#[from] parse_types::TypeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
