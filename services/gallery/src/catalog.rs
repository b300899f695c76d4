//! Catalog assembly and ordering
//!
//! Composes event discovery with media resolution and sorts the result
//! newest-first by descriptor date. Media-resolution failures degrade the
//! affected event to an empty media list; only an unreadable root fails the
//! whole catalog.

use std::path::PathBuf;

use common::error::{CatalogError, CatalogResult};
use tracing::error;

use crate::discovery::discover_events;
use crate::models::{DiscoveredEvent, EventRecord, ResolvedMedia};
use crate::resolvers::{LocalResolver, MediaResolver, RemoteResolver};

/// Builds the gallery catalog from the event folder tree
pub struct CatalogService {
    events_root: PathBuf,
    local: LocalResolver,
    remote: Option<RemoteResolver>,
}

impl CatalogService {
    pub fn new(
        events_root: PathBuf,
        local: LocalResolver,
        remote: Option<RemoteResolver>,
    ) -> Self {
        Self {
            events_root,
            local,
            remote,
        }
    }

    /// Build the full ordered catalog
    ///
    /// The catalog is recomputed from the filesystem and remote source on
    /// every call; the only state carried across calls is the remote listing
    /// cache inside the remote resolver.
    pub async fn build_catalog(&self) -> CatalogResult<Vec<EventRecord>> {
        let discovered = discover_events(&self.events_root).await?;

        let mut records = Vec::with_capacity(discovered.len());
        for event in discovered {
            let media = self.resolve_media(&event).await;
            records.push(EventRecord {
                name: event.relative_path.clone(),
                relative_path: event.relative_path,
                media_files: media.media_files,
                media_urls: media.media_urls,
                video_thumbnail_urls: media.video_thumbnail_urls,
                descriptor: event.descriptor,
            });
        }

        // Newest first; sort_by is stable so same-date events keep their
        // discovery order. Unparseable dates sort last.
        records.sort_by(|a, b| {
            b.descriptor
                .parsed_date()
                .cmp(&a.descriptor.parsed_date())
        });

        Ok(records)
    }

    /// Resolve media for one event, degrading to empty lists on failure
    async fn resolve_media(&self, event: &DiscoveredEvent) -> ResolvedMedia {
        let result = match (&event.descriptor.media_source_ref, &self.remote) {
            (Some(_), Some(remote)) => remote.resolve(event).await,
            (Some(_), None) => Err(CatalogError::MediaResolution {
                event: event.relative_path.clone(),
                reason: "no remote media backend configured".to_string(),
            }),
            (None, _) => self.local.resolve(event).await,
        };

        match result {
            Ok(media) => media,
            Err(e) => {
                // The event still appears in the catalog with its
                // descriptor fields intact.
                error!("{}", e);
                ResolvedMedia::default()
            }
        }
    }
}
