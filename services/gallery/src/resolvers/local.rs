//! Local filesystem media strategy
//!
//! Lists files directly under the event's folder, keeps the fixed media
//! extension allow-list, and builds URLs from the public-facing base path.
//! No thumbnails are derivable locally, so `video_thumbnail_urls` stays
//! empty.

use async_trait::async_trait;
use common::error::{CatalogError, CatalogResult};
use tokio::fs;
use tracing::warn;

use crate::models::{DiscoveredEvent, ResolvedMedia};
use crate::resolvers::{MediaResolver, is_media_file};

/// Resolves media from static files next to the descriptor
pub struct LocalResolver {
    public_base_path: String,
}

impl LocalResolver {
    pub fn new(public_base_path: String) -> Self {
        Self { public_base_path }
    }

    /// Public URL prefix for an event folder
    fn url_prefix(&self, relative_path: &str) -> String {
        let base = self.public_base_path.trim_end_matches('/');
        if relative_path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, relative_path)
        }
    }
}

#[async_trait]
impl MediaResolver for LocalResolver {
    async fn resolve(&self, event: &DiscoveredEvent) -> CatalogResult<ResolvedMedia> {
        let mut read_dir =
            fs::read_dir(&event.folder)
                .await
                .map_err(|e| CatalogError::MediaResolution {
                    event: event.relative_path.clone(),
                    reason: e.to_string(),
                })?;

        let mut filenames = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let is_file = entry
                        .file_type()
                        .await
                        .map(|file_type| file_type.is_file())
                        .unwrap_or(false);
                    if !is_file {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if is_media_file(&name) {
                        filenames.push(name);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", event.folder.display(), e);
                    break;
                }
            }
        }

        // Consistent ordering; directory iteration order is
        // filesystem-dependent.
        filenames.sort();

        let prefix = self.url_prefix(&event.relative_path);
        let media_urls = filenames
            .iter()
            .map(|name| format!("{}/{}", prefix, name))
            .collect();

        Ok(ResolvedMedia {
            media_files: filenames,
            media_urls,
            video_thumbnail_urls: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDescriptor;
    use tempfile::TempDir;

    fn event_in(dir: &std::path::Path, relative_path: &str) -> DiscoveredEvent {
        DiscoveredEvent {
            relative_path: relative_path.to_string(),
            folder: dir.to_path_buf(),
            descriptor: EventDescriptor {
                event_name: "GIM 1".to_string(),
                date: "2025-02-20".to_string(),
                description: String::new(),
                media_source_ref: None,
            },
        }
    }

    #[tokio::test]
    async fn test_lists_media_with_local_urls() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "a.png", "clip.mp4", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let resolver = LocalResolver::new("/events".to_string());
        let media = resolver
            .resolve(&event_in(dir.path(), "fall-2025/gim_1"))
            .await
            .unwrap();

        assert_eq!(media.media_files, ["a.png", "b.jpg", "clip.mp4"]);
        assert_eq!(media.media_urls.len(), media.media_files.len());
        assert_eq!(media.media_urls[0], "/events/fall-2025/gim_1/a.png");
        // No thumbnail is derivable from local files
        assert!(media.video_thumbnail_urls.is_empty());
    }

    #[tokio::test]
    async fn test_subdirectories_are_not_listed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("top.jpg"), b"x").unwrap();

        let resolver = LocalResolver::new("/events".to_string());
        let media = resolver
            .resolve(&event_in(dir.path(), "gim_1"))
            .await
            .unwrap();

        assert_eq!(media.media_files, ["top.jpg"]);
    }

    #[tokio::test]
    async fn test_missing_folder_is_resolution_error() {
        let resolver = LocalResolver::new("/events".to_string());
        let event = event_in(std::path::Path::new("/definitely/not/here"), "gone");

        let err = resolver.resolve(&event).await.unwrap_err();
        assert!(!err.is_fatal());
    }
}
