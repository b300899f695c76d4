//! Models for the gallery catalog
//!
//! `EventDescriptor` and `EventRecord` are the wire shapes consumed by the
//! rendering layer; field names are fixed (camelCase) for compatibility.
//! `DiscoveredEvent` and `ResolvedMedia` are internal to aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-event metadata descriptor, stored as `event-info.json` in each event
/// folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    /// Display name
    pub event_name: String,
    /// ISO calendar date (`YYYY-MM-DD`), used for ordering
    pub date: String,
    /// Free text
    pub description: String,
    /// Remote folder id or bucket key prefix; absence selects the local
    /// media strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_source_ref: Option<String>,
}

impl EventDescriptor {
    /// Parse the descriptor date as a plain calendar date
    ///
    /// The date string has no time-of-day component, so it must not go
    /// through a timestamp with timezone conversion; that shifts events by a
    /// day for viewers west of UTC.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// One event in the catalog response, rebuilt from the folder tree on every
/// request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// The folder's relative path (see DESIGN.md); callers must not assume
    /// whether this is the path or the descriptor's display name
    pub name: String,
    /// Folder path relative to the catalog root; unique, used for
    /// deep-linking
    pub relative_path: String,
    /// Discovered media filenames
    pub media_files: Vec<String>,
    /// Directly fetchable URL per entry of `media_files`; same length and
    /// order, or both empty
    pub media_urls: Vec<String>,
    /// One entry per video file with a derivable thumbnail
    pub video_thumbnail_urls: Vec<String>,
    pub descriptor: EventDescriptor,
}

/// An event folder found by discovery, before media resolution
#[derive(Debug, Clone)]
pub struct DiscoveredEvent {
    /// Folder path relative to the catalog root, with forward slashes
    pub relative_path: String,
    /// Absolute path of the event folder
    pub folder: PathBuf,
    pub descriptor: EventDescriptor,
}

/// Resolved media lists for one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMedia {
    pub media_files: Vec<String>,
    pub media_urls: Vec<String>,
    pub video_thumbnail_urls: Vec<String>,
}
