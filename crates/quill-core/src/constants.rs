//! Filename convention constants.

/// Prefix carried by every original image that has a derived thumbnail.
pub const ORIGINAL_PREFIX: &str = "orig_";

/// Prefix of derived thumbnails.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Extension of derived thumbnails (always re-encoded as WebP).
pub const THUMBNAIL_EXTENSION: &str = "webp";

/// Prefix of user avatars. Avatars are stored without a thumbnail.
pub const AVATAR_PREFIX: &str = "avatar_";

/// Prefix of comment voice attachments.
pub const VOICE_PREFIX: &str = "voice_";

/// Extension used when an upload's declared filename carries no usable extension.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// URL prefix under which the public asset root is served.
pub const STATIC_URL_PREFIX: &str = "/static";
