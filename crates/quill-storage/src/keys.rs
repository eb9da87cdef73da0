//! Asset key generation shared by the asset manager and the storage backends.
//!
//! Key format: `{subdir}/{prefix}{id}.{ext}` where `id` is a 128-bit random identifier,
//! hex encoded.

use uuid::Uuid;

/// Fresh collision-resistant asset identifier (32 lowercase hex characters).
pub fn new_asset_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Build the key of an asset beneath `subdir`. An empty `subdir` yields a bare file name.
pub fn asset_key(subdir: &str, prefix: &str, id: &str, ext: &str) -> String {
    let subdir = subdir.trim_matches('/');
    if subdir.is_empty() {
        format!("{}{}.{}", prefix, id, ext)
    } else {
        format!("{}/{}{}.{}", subdir, prefix, id, ext)
    }
}
