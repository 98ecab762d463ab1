use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::hash::ContentHash;

/// Boxed async reader handed out for streaming downloads.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Content-addressed storage for document content.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes, returning the content hash that identifies them.
    async fn put(&self, data: &[u8]) -> Result<ContentHash, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(reader).await
    }

    /// Store data from an async reader, returning the content hash.
    async fn put_stream(&self, reader: BoxReader) -> Result<ContentHash, StorageError>;

    /// Read a blob fully into memory.
    async fn get(&self, hash: &ContentHash) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(hash).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Open a blob as a streaming reader.
    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError>;

    async fn exists(&self, hash: &ContentHash) -> Result<bool, StorageError>;

    /// Delete a blob. Returns `false` if it did not exist.
    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError>;

    /// Size of a stored blob in bytes.
    async fn size(&self, hash: &ContentHash) -> Result<u64, StorageError>;
}
