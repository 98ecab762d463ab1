//! Content-addressed storage for document binary content.
//!
//! Documents reference their content by SHA-256 hash; the bytes themselves
//! live outside the metadata store. The registry owns the content
//! exclusively, so deleting a document may delete its blob.

mod error;
mod hash;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use hash::ContentHash;
pub use traits::{BlobStore, BoxReader};
