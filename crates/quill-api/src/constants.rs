//! API constants
//!
//! Versioned prefixes for the JSON endpoints. Upload serving lives outside the
//! versioned namespace so stored public URLs stay stable.

/// Versioned prefix for JSON endpoints
pub const API_PREFIX: &str = "/api/v1";

/// Prefix under which stored uploads are served
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Concurrent requests accepted before the server applies backpressure
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;
