use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("type query error: {0}")]
    TypeQuery(String),

    #[error("value fetch error: {0}")]
    ValueFetch(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DumpError>;
