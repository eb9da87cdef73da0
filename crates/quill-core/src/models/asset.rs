use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{
    AVATAR_PREFIX, FALLBACK_EXTENSION, ORIGINAL_PREFIX, STATIC_URL_PREFIX, THUMBNAIL_EXTENSION,
    THUMBNAIL_PREFIX, VOICE_PREFIX,
};

/// Owning-entity category of an asset. Fixes the filename prefix and whether a
/// thumbnail is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    PostImage,
    MessageImage,
    Avatar,
    Voice,
}

impl AssetKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AssetKind::PostImage | AssetKind::MessageImage => ORIGINAL_PREFIX,
            AssetKind::Avatar => AVATAR_PREFIX,
            AssetKind::Voice => VOICE_PREFIX,
        }
    }

    pub fn has_thumbnail(self) -> bool {
        matches!(self, AssetKind::PostImage | AssetKind::MessageImage)
    }

    pub fn is_voice(self) -> bool {
        matches!(self, AssetKind::Voice)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::PostImage => "post_image",
            AssetKind::MessageImage => "message_image",
            AssetKind::Avatar => "avatar",
            AssetKind::Voice => "voice",
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post_image" | "post" => Ok(AssetKind::PostImage),
            "message_image" | "message" => Ok(AssetKind::MessageImage),
            "avatar" => Ok(AssetKind::Avatar),
            "voice" => Ok(AssetKind::Voice),
            other => Err(format!("Unknown asset kind: {}", other)),
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of storing an upload. Both paths are relative to the public asset root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredAsset {
    #[schema(example = "uploads/orig_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.jpg")]
    pub original_path: String,
    #[schema(example = "uploads/thumb_3f2a9c0d4b1e4f6a8c7d2e1f0a9b8c7d.webp")]
    pub thumbnail_path: String,
}

impl StoredAsset {
    /// An asset with no separate thumbnail.
    pub fn original_only(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            thumbnail_path: path.clone(),
            original_path: path,
        }
    }

    pub fn has_distinct_thumbnail(&self) -> bool {
        self.thumbnail_path != self.original_path
    }
}

fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..=idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Derive the thumbnail path paired with an original path.
///
/// `uploads/orig_<id>.<ext>` becomes `uploads/thumb_<id>.webp`. Any basename that does
/// not start with `orig_` (legacy uploads, avatars, voice files, thumbnails) is returned
/// unchanged. Pure string transformation; never touches the filesystem.
pub fn derive_thumbnail_path(original_path: &str) -> String {
    let (dir, name) = split_dir(original_path);

    let Some(rest) = name.strip_prefix(ORIGINAL_PREFIX) else {
        return original_path.to_string();
    };

    let stem = match rest.rfind('.') {
        Some(idx) => &rest[..idx],
        None => rest,
    };

    format!("{dir}{THUMBNAIL_PREFIX}{stem}.{THUMBNAIL_EXTENSION}")
}

/// Lowercased extension of a declared filename, or `jpg` when it has none usable.
pub fn extension_or_fallback(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Public URL of a stored path.
///
/// Paths already rooted at `uploads/` are served directly; anything else lives under
/// the static prefix.
pub fn public_url(path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.starts_with("uploads/") {
        format!("/{}", path)
    } else {
        format!("{}/{}", STATIC_URL_PREFIX, path)
    }
}
