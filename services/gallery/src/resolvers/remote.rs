//! Remote media strategy
//!
//! Lists object keys under `{mediaSourceRef}/` through an [`ObjectLister`]
//! backend (S3 bucket listing or drive API), then runs the shared filename
//! pipeline: trailing-component extraction, HTML-entity decoding, dropping
//! formats the rendering layer cannot display, and URL construction from a
//! fixed base URL with the filename percent-encoded.
//!
//! Successful listings are cached per media-source reference for the life of
//! the process (see [`common::cache::ListingCache`] for the staleness
//! trade-off). Failed listings are not cached; the event degrades to an
//! empty media list for that request.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::cache::ListingCache;
use common::error::{CatalogError, CatalogResult};
use tracing::info;

use crate::models::{DiscoveredEvent, ResolvedMedia};
use crate::resolvers::{MediaResolver, is_media_file, is_unsupported_format, is_video_file};

/// An object-listing backend: everything under a media-source prefix
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// List the object keys stored under `{source_ref}/`
    async fn list(&self, source_ref: &str) -> Result<Vec<String>>;
}

/// Resolves media from a remote object store or drive folder
pub struct RemoteResolver {
    lister: Arc<dyn ObjectLister>,
    cache: Arc<ListingCache<Vec<String>>>,
    base_url: String,
}

impl RemoteResolver {
    pub fn new(lister: Arc<dyn ObjectLister>, base_url: String) -> Self {
        Self::with_cache(lister, base_url, Arc::new(ListingCache::new()))
    }

    /// Create a resolver around an existing cache
    pub fn with_cache(
        lister: Arc<dyn ObjectLister>,
        base_url: String,
        cache: Arc<ListingCache<Vec<String>>>,
    ) -> Self {
        Self {
            lister,
            cache,
            base_url,
        }
    }

    /// Cached listing for a media-source reference; only successful listings
    /// are stored
    async fn listing(&self, source_ref: &str) -> CatalogResult<Arc<Vec<String>>> {
        if let Some(keys) = self.cache.get(source_ref).await {
            return Ok(keys);
        }

        let keys = self
            .lister
            .list(source_ref)
            .await
            .map_err(|e| CatalogError::MediaResolution {
                event: source_ref.to_string(),
                reason: e.to_string(),
            })?;

        info!("Listed {} remote objects under {}", keys.len(), source_ref);
        Ok(self.cache.insert(source_ref, keys).await)
    }
}

#[async_trait]
impl MediaResolver for RemoteResolver {
    async fn resolve(&self, event: &DiscoveredEvent) -> CatalogResult<ResolvedMedia> {
        let Some(source_ref) = event.descriptor.media_source_ref.as_deref() else {
            return Ok(ResolvedMedia::default());
        };

        let keys = self.listing(source_ref).await?;
        let base = self.base_url.trim_end_matches('/');

        let mut media = ResolvedMedia::default();
        for key in keys.iter() {
            let name = key.rsplit('/').next().unwrap_or(key);
            // Bucket listings may return entity-escaped names.
            let name = decode_html_entities(name);
            if name.is_empty() {
                // Folder-marker keys end in '/'.
                continue;
            }
            if is_unsupported_format(&name) || !is_media_file(&name) {
                continue;
            }

            let url = format!("{}/{}/{}", base, source_ref, urlencoding::encode(&name));
            if is_video_file(&name) {
                // No thumbnail endpoint exists, so the video URL stands in
                // for its own thumbnail. Known gap, not real frame
                // extraction.
                media.video_thumbnail_urls.push(url.clone());
            }
            media.media_files.push(name);
            media.media_urls.push(url);
        }

        Ok(media)
    }
}

/// Decode the HTML entity escapes that listing responses use in object names
pub(crate) fn decode_html_entities(name: &str) -> String {
    let mut decoded = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find(';') {
            // Entities are short; anything longer is a literal ampersand.
            Some(end) if end <= 8 => {
                let entity = &tail[1..end];
                match decode_entity(entity) {
                    Some(c) => decoded.push(c),
                    None => decoded.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            _ => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
