pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Data(#[from] tipboard::Error),
    #[error("Dataset serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Watch error: {0}")]
    Watch(String),
}
