use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::hash::ContentHash;
use super::traits::{BlobStore, BoxReader};

/// Filesystem-backed blob store.
///
/// Layout is sharded by the first hex byte of the hash:
/// `{root}/{2 hex chars}/{62 hex chars}`. Writes go to a staging file under
/// `{root}/.staging` and are renamed into place, so a blob path either does
/// not exist or holds complete content.
pub struct FilesystemBlobStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    pub async fn open(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(root.join(".staging")).await?;
        Ok(Self { root, max_size })
    }

    fn blob_path(&self, hash: &ContentHash) -> PathBuf {
        let hex = hash.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    fn staging_path(&self) -> PathBuf {
        self.root
            .join(".staging")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Move a completed staging file into its content-addressed location.
    async fn commit(&self, staging: &Path, hash: &ContentHash) -> Result<(), StorageError> {
        let target = self.blob_path(hash);

        // Already stored: content-addressing makes the write a no-op.
        if fs::try_exists(&target).await? {
            let _ = fs::remove_file(staging).await;
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        if let Err(e) = fs::rename(staging, &target).await {
            let _ = fs::remove_file(staging).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put_stream(&self, mut reader: BoxReader) -> Result<ContentHash, StorageError> {
        let staging = self.staging_path();
        let mut file = fs::File::create(&staging).await?;
        let mut hasher = Sha256::new();
        let mut written: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024];

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(&staging).await;
                    return Err(e.into());
                }
            };

            written += n as u64;
            if written > self.max_size {
                drop(file);
                let _ = fs::remove_file(&staging).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: written,
                    limit: self.max_size,
                });
            }

            hasher.update(&buf[..n]);
            if let Err(e) = file.write_all(&buf[..n]).await {
                drop(file);
                let _ = fs::remove_file(&staging).await;
                return Err(e.into());
            }
        }

        file.flush().await?;
        drop(file);

        let hash = ContentHash::from_bytes(hasher.finalize().into());
        self.commit(&staging, &hash).await?;
        Ok(hash)
    }

    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.blob_path(hash)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(hash.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, hash: &ContentHash) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.blob_path(hash)).await?)
    }

    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError> {
        match fs::remove_file(self.blob_path(hash)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, hash: &ContentHash) -> Result<u64, StorageError> {
        match fs::metadata(self.blob_path(hash)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(hash.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
