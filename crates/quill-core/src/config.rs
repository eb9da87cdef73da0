//! Configuration module
//!
//! Configuration is read once from the environment (after loading `.env` via `dotenvy`)
//! and validated before the server starts. The media subsystem never reads the
//! environment itself: [`Config::media`] produces the explicit [`MediaConfig`] that the
//! asset manager is constructed with.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 5000;
const PUBLIC_ROOT: &str = "static";
const UPLOAD_SUBDIR: &str = "uploads";
const ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif";
const VOICE_ALLOWED_EXTENSIONS: &str = "webm,ogg,mp3,wav,m4a";
const MAX_CONTENT_LENGTH: usize = 500 * 1024 * 1024;
const THUMBNAIL_MAX_DIMENSION: u32 = 1200;
const THUMBNAIL_QUALITY: f32 = 80.0;

/// Settings consumed by the media asset manager.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    /// Public asset root; every stored path is relative to it.
    pub public_root: PathBuf,
    /// Default asset subdirectory beneath the root (flat, shared by all entity kinds).
    pub upload_subdir: String,
    pub thumbnail_max_dimension: u32,
    /// WebP quality, 1-100.
    pub thumbnail_quality: f32,
}

impl MediaConfig {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
            upload_subdir: UPLOAD_SUBDIR.to_string(),
            thumbnail_max_dimension: THUMBNAIL_MAX_DIMENSION,
            thumbnail_quality: THUMBNAIL_QUALITY,
        }
    }

    /// Absolute-or-relative filesystem directory that holds uploads.
    pub fn upload_dir(&self) -> PathBuf {
        self.public_root.join(&self.upload_subdir)
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub public_root: PathBuf,
    pub upload_subdir: String,
    pub allowed_extensions: Vec<String>,
    pub voice_allowed_extensions: Vec<String>,
    pub max_content_length: usize,
    pub thumbnail_max_dimension: u32,
    pub thumbnail_quality: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            public_root: PathBuf::from(PUBLIC_ROOT),
            upload_subdir: UPLOAD_SUBDIR.to_string(),
            allowed_extensions: parse_list(ALLOWED_EXTENSIONS),
            voice_allowed_extensions: parse_list(VOICE_ALLOWED_EXTENSIONS),
            max_content_length: MAX_CONTENT_LENGTH,
            thumbnail_max_dimension: THUMBNAIL_MAX_DIMENSION,
            thumbnail_quality: THUMBNAIL_QUALITY,
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Missing .env is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();

        let config = Config {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SERVER_PORT),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| parse_list(&s))
                .unwrap_or_else(|_| vec!["*".to_string()]),
            public_root: env::var("PUBLIC_ROOT")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(PUBLIC_ROOT)),
            upload_subdir: env::var("UPLOAD_SUBDIR").unwrap_or_else(|_| UPLOAD_SUBDIR.to_string()),
            allowed_extensions: parse_list(
                &env::var("ALLOWED_EXTENSIONS").unwrap_or_else(|_| ALLOWED_EXTENSIONS.to_string()),
            ),
            voice_allowed_extensions: parse_list(
                &env::var("VOICE_ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| VOICE_ALLOWED_EXTENSIONS.to_string()),
            ),
            max_content_length: env::var("MAX_CONTENT_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONTENT_LENGTH),
            thumbnail_max_dimension: env::var("THUMBNAIL_MAX_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(THUMBNAIL_MAX_DIMENSION),
            thumbnail_quality: env::var("THUMBNAIL_QUALITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(THUMBNAIL_QUALITY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_subdir.is_empty()
            || self.upload_subdir.contains('/')
            || self.upload_subdir.contains('\\')
            || self.upload_subdir.contains("..")
        {
            return Err(anyhow::anyhow!(
                "UPLOAD_SUBDIR must be a single directory name, got '{}'",
                self.upload_subdir
            ));
        }

        if self.thumbnail_max_dimension == 0 {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_MAX_DIMENSION must be greater than zero"
            ));
        }

        if !(1.0..=100.0).contains(&self.thumbnail_quality) {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_QUALITY must be between 1 and 100, got {}",
                self.thumbnail_quality
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }

        if self.voice_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "VOICE_ALLOWED_EXTENSIONS must not be empty"
            ));
        }

        if self.max_content_length == 0 {
            return Err(anyhow::anyhow!("MAX_CONTENT_LENGTH must be greater than zero"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Explicit configuration for the media asset manager.
    pub fn media(&self) -> MediaConfig {
        MediaConfig {
            public_root: self.public_root.clone(),
            upload_subdir: self.upload_subdir.clone(),
            thumbnail_max_dimension: self.thumbnail_max_dimension,
            thumbnail_quality: self.thumbnail_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowed_extensions, vec!["png", "jpg", "jpeg", "gif"]);
        assert_eq!(config.max_content_length, 500 * 1024 * 1024);
    }

    #[test]
    fn test_parse_list_normalizes() {
        assert_eq!(parse_list(" PNG, jpg ,,gif "), vec!["png", "jpg", "gif"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_validate_rejects_nested_upload_subdir() {
        let config = Config {
            upload_subdir: "../uploads".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            upload_subdir: "a/b".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_thumbnail_settings() {
        let config = Config {
            thumbnail_max_dimension: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            thumbnail_quality: 120.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let config = Config {
            environment: "Prod".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
        assert!(!Config::default().is_production());
    }

    #[test]
    fn test_media_config_from_config() {
        let config = Config {
            public_root: PathBuf::from("/srv/blog/static"),
            ..Config::default()
        };
        let media = config.media();
        assert_eq!(media.upload_dir(), PathBuf::from("/srv/blog/static/uploads"));
        assert_eq!(media.thumbnail_max_dimension, 1200);
    }
}
