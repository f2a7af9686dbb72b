use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("page is missing {0}")]
    MissingElement(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
