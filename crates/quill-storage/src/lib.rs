//! Quill Storage Library
//!
//! Blob store abstraction for uploaded assets and its local filesystem backend.
//!
//! # Path format
//!
//! Every asset is addressed by a path relative to the public asset root, for example
//! `uploads/orig_<id>.jpg`. The local backend also accepts the other forms found in stored
//! rows when deleting:
//!
//! - absolute paths, provided they lie beneath the public asset root;
//! - relative paths already starting with the root (`static/uploads/<name>`), resolved
//!   directly;
//! - relative paths with a directory component, rooted at the public asset root;
//! - bare file names, resolved beneath the default upload subdirectory.
//!
//! Paths containing `..` are always rejected.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{asset_key, new_asset_id};
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
