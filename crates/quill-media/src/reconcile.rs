//! Edit-time reconciliation of an entity's image list.

use quill_core::AssetList;
use std::collections::HashSet;

use crate::MediaAssetManager;

/// Outcome of reconciling a stored image list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Kept originals in their previous order, followed by the new uploads.
    pub paths: AssetList,
    /// Originals dropped from the list. Their files (and thumbnails) have been deleted.
    pub removed: Vec<String>,
}

impl Reconciliation {
    /// Column value to persist; `None` when the entity has no images left.
    pub fn to_column(&self) -> Option<String> {
        self.paths.to_column()
    }
}

/// Split `stored` into (kept, removed). An index is kept when its decimal string is in
/// `keep_indices`; kept entries retain their relative order.
pub fn partition_kept(
    stored: AssetList,
    keep_indices: &HashSet<String>,
) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::new();
    let mut removed = Vec::new();

    for (i, path) in stored.into_iter().enumerate() {
        if keep_indices.contains(&i.to_string()) {
            kept.push(path);
        } else {
            removed.push(path);
        }
    }

    (kept, removed)
}

impl MediaAssetManager {
    /// Reconcile a stored image list against the indices the editor kept and the
    /// uploads added in the same edit.
    ///
    /// Every dropped original is deleted together with its derived thumbnail. A malformed
    /// stored list counts as empty: nothing is deleted and the result is exactly
    /// `newly_uploaded`.
    #[tracing::instrument(
        skip(self, stored, newly_uploaded),
        fields(new_count = newly_uploaded.len())
    )]
    pub async fn reconcile(
        &self,
        stored: Option<&str>,
        keep_indices: &HashSet<String>,
        newly_uploaded: Vec<String>,
    ) -> Reconciliation {
        let previous = AssetList::parse(stored);
        let (mut kept, removed) = partition_kept(previous, keep_indices);

        let mut files_removed = 0;
        for path in &removed {
            files_removed += self.delete_with_thumbnail(path).await;
        }

        tracing::info!(
            kept = kept.len(),
            removed = removed.len(),
            files_removed = files_removed,
            added = newly_uploaded.len(),
            "Reconciled asset list"
        );

        kept.extend(newly_uploaded);

        Reconciliation {
            paths: AssetList::new(kept),
            removed,
        }
    }
}
