/// Errors from blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No blob is stored under the given hash.
    #[error("blob not found: {0}")]
    NotFound(String),
    /// The backing store could not be reached or failed mid-operation.
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    /// The provided content hash could not be parsed.
    #[error("invalid content hash: {0}")]
    InvalidHash(String),
    /// The content exceeds the configured size limit.
    #[error("content exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
