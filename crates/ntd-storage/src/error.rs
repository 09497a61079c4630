use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A previous writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The write would push the stored bytes past the configured quota.
    #[error("quota exceeded writing {key:?} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    #[error("storage backend: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::Backend(Box::new(err))
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StorageError::Poisoned
    }
}
