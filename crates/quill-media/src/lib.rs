//! Quill Media Library
//!
//! The media asset manager and the entity-level operations built on it:
//!
//! - [`MediaAssetManager`] stores originals, derives thumbnails and deletes files
//! - [`MediaAssetManager::reconcile`] diffs an entity's image list on edit
//! - [`AssetLifecycle`] releases assets when their owning entity goes away
//!
//! File deletion never fails the caller. Failures are logged and reported as `false`
//! (or a smaller removal count).

pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{MediaError, MediaResult};
pub use lifecycle::AssetLifecycle;
pub use manager::MediaAssetManager;
pub use reconcile::{partition_kept, Reconciliation};
