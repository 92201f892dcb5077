use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown catalog entry: {0}")]
    UnknownEntry(String),
    #[error("no text for {id} in {locale}")]
    MissingText { id: String, locale: String },
    #[error("catalog index unavailable: {0}")]
    Index(String),
    #[error("fetch failed for {id}: {reason}")]
    Fetch { id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("catalog index unavailable: {0}")]
    Index(#[source] SourceError),
    #[error("every catalog entry failed to load ({0} attempted)")]
    Empty(usize),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for CacheError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
