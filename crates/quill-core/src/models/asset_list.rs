//! Persisted multi-asset container.
//!
//! A post stores its ordered image list in a single column as a JSON array. Older rows
//! mix plain strings with `{"orig": ..., "thumb": ...}` objects; both decode into the
//! same normalized list and writes always emit plain strings.

use serde::{Deserialize, Serialize};

/// One entry of a persisted list as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAssetEntry {
    Path(String),
    Pair {
        orig: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumb: Option<String>,
    },
}

impl StoredAssetEntry {
    pub fn into_original(self) -> String {
        match self {
            StoredAssetEntry::Path(path) => path,
            StoredAssetEntry::Pair { orig, .. } => orig,
        }
    }
}

/// Ordered list of original paths owned by one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetList(Vec<String>);

impl AssetList {
    pub fn new(paths: Vec<String>) -> Self {
        Self(paths)
    }

    /// Parse a stored column value.
    ///
    /// `None`, empty text, `[]` and malformed blobs all yield an empty list. Malformed
    /// input is logged, never returned as an error.
    pub fn parse(stored: Option<&str>) -> Self {
        let Some(raw) = stored.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<StoredAssetEntry>>(raw) {
            Ok(entries) => Self(
                entries
                    .into_iter()
                    .map(StoredAssetEntry::into_original)
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    len = raw.len(),
                    "Malformed stored asset list, treating as empty"
                );
                Self::default()
            }
        }
    }

    /// Column value to persist: a JSON string array, or `None` when there are no assets.
    pub fn to_column(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        // Serializing a Vec<String> cannot fail.
        serde_json::to_string(&self.0).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for AssetList {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl FromIterator<String> for AssetList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AssetList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AssetList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
