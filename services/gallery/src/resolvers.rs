//! Media resolution strategies
//!
//! Two interchangeable strategies behind the [`MediaResolver`] capability
//! trait, selected by which descriptor field is populated: a local
//! filesystem listing for events whose media lives next to the descriptor,
//! and a remote listing for events that carry a `mediaSourceRef`. Shared
//! code never branches on backend identity.

use async_trait::async_trait;
use common::error::CatalogResult;

use crate::models::{DiscoveredEvent, ResolvedMedia};

pub mod drive;
pub mod local;
pub mod remote;
pub mod s3;

pub use local::LocalResolver;
pub use remote::{ObjectLister, RemoteResolver};

/// A strategy for turning a discovered event into its media lists
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, event: &DiscoveredEvent) -> CatalogResult<ResolvedMedia>;
}

/// Image extensions the rendering layer displays natively
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Video extensions the rendering layer displays natively
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];

/// Container formats the rendering layer cannot display; dropped from remote
/// listings rather than converted
const UNSUPPORTED_EXTENSIONS: &[&str] = &["heic", "heif"];

fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

pub fn is_image_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_video_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_media_file(filename: &str) -> bool {
    is_image_file(filename) || is_video_file(filename)
}

pub fn is_unsupported_format(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| UNSUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_classification() {
        assert!(is_image_file("photo.JPG"));
        assert!(is_image_file("diagram.svg"));
        assert!(is_video_file("clip.MOV"));
        assert!(is_media_file("clip.webm"));
        assert!(!is_media_file("notes.txt"));
        assert!(!is_media_file("no_extension"));
    }

    #[test]
    fn test_unsupported_formats() {
        assert!(is_unsupported_format("raw.heic"));
        assert!(is_unsupported_format("raw.HEIF"));
        assert!(!is_unsupported_format("photo.jpg"));
    }
}
