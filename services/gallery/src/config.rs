//! Service configuration from environment variables

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use common::error::CatalogError;

/// Gallery service configuration
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Root directory of the event folder tree
    pub events_root: PathBuf,
    /// Public-facing base path for locally served media
    pub public_base_path: String,
    /// Fixed base URL prepended to remote media keys
    pub remote_base_url: String,
    /// Bounded timeout for remote listing calls, in seconds
    pub remote_timeout_secs: u64,
    /// Which remote listing backend is active, if any
    pub remote_backend: Option<RemoteBackendKind>,
}

/// Remote listing backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteBackendKind {
    S3,
    Drive,
}

impl GalleryConfig {
    /// Create a new GalleryConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:3001")
    /// - `EVENTS_ROOT`: event folder tree root (default: "app/data/events")
    /// - `PUBLIC_EVENTS_BASE`: public path for local media (default: "/events")
    /// - `MEDIA_BASE_URL`: base URL for remote media
    /// - `MEDIA_REMOTE_TIMEOUT_SECS`: remote call timeout (default: 10)
    /// - `MEDIA_REMOTE_BACKEND`: "s3", "drive", or unset for local-only
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let events_root: PathBuf = env::var("EVENTS_ROOT")
            .unwrap_or_else(|_| "app/data/events".to_string())
            .into();
        let public_base_path =
            env::var("PUBLIC_EVENTS_BASE").unwrap_or_else(|_| "/events".to_string());
        let remote_base_url = env::var("MEDIA_BASE_URL").unwrap_or_else(|_| {
            "https://bfs-website-gallery-images.s3.us-east-2.amazonaws.com".to_string()
        });
        let remote_timeout_secs = env::var("MEDIA_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let remote_backend = match env::var("MEDIA_REMOTE_BACKEND") {
            Ok(value) => match value.as_str() {
                "s3" => Some(RemoteBackendKind::S3),
                "drive" => Some(RemoteBackendKind::Drive),
                other => anyhow::bail!("Unknown MEDIA_REMOTE_BACKEND: {}", other),
            },
            Err(_) => None,
        };

        Ok(Self {
            bind_addr,
            events_root,
            public_base_path,
            remote_base_url,
            remote_timeout_secs,
            remote_backend,
        })
    }
}

/// S3 backend configuration
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket holding the gallery media
    pub bucket_name: String,
}

impl S3Config {
    /// Create a new S3Config from environment variables
    ///
    /// # Environment Variables
    /// - `MEDIA_BUCKET_NAME`: bucket name (default: "bfs-website-gallery-images")
    pub fn from_env() -> Result<Self> {
        let bucket_name = env::var("MEDIA_BUCKET_NAME")
            .unwrap_or_else(|_| "bfs-website-gallery-images".to_string());
        Ok(Self { bucket_name })
    }
}

/// Drive backend credentials
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl DriveConfig {
    /// Create a new DriveConfig from environment variables
    ///
    /// Entirely absent credentials while the drive backend is selected are a
    /// fatal configuration error, surfaced at startup rather than degrading
    /// every event at request time.
    ///
    /// # Environment Variables
    /// - `GOOGLE_DRIVE_CLIENT_ID`
    /// - `GOOGLE_DRIVE_CLIENT_SECRET`
    /// - `GOOGLE_DRIVE_REFRESH_TOKEN`
    pub fn from_env() -> Result<Self> {
        let client_id = require_env("GOOGLE_DRIVE_CLIENT_ID")?;
        let client_secret = require_env("GOOGLE_DRIVE_CLIENT_SECRET")?;
        let refresh_token = require_env("GOOGLE_DRIVE_REFRESH_TOKEN")?;

        Ok(Self {
            client_id,
            client_secret,
            refresh_token,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| CatalogError::Credentials(name.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_config_defaults() {
        let config = GalleryConfig::from_env().expect("Failed to create gallery config");
        assert_eq!(config.bind_addr, "0.0.0.0:3001");
        assert_eq!(config.public_base_path, "/events");
        assert_eq!(config.remote_timeout_secs, 10);
    }

    #[test]
    fn test_s3_config_defaults() {
        let config = S3Config::from_env().expect("Failed to create s3 config");
        assert_eq!(config.bucket_name, "bfs-website-gallery-images");
    }
}
