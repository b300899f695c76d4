//! Recursive event discovery
//!
//! Walks the events root depth-first looking for folders that carry an
//! `event-info.json` descriptor. A folder with a descriptor is a leaf event:
//! its children are not searched further. A folder without one produces no
//! record but its subfolders are still searched (descriptors are not
//! inherited). Symlink cycles are not handled.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::error::{CatalogError, CatalogResult};
use tokio::fs;
use tracing::warn;

use crate::models::{DiscoveredEvent, EventDescriptor};

/// Name of the per-folder metadata descriptor
pub const DESCRIPTOR_FILE: &str = "event-info.json";

/// Find every event folder under `root`
///
/// Folder-level failures (unreadable folder, malformed descriptor) are
/// logged and skip that folder only; siblings are unaffected. An unreadable
/// root is the one fatal case. A root with no descriptors anywhere yields an
/// empty list.
pub async fn discover_events(root: &Path) -> CatalogResult<Vec<DiscoveredEvent>> {
    // Only the root gets the fatal treatment; everything below degrades
    // per folder.
    fs::read_dir(root)
        .await
        .map_err(|e| CatalogError::RootUnreadable(format!("{}: {}", root.display(), e)))?;

    let mut events = Vec::new();

    // Depth-first worklist; children are pushed in reverse name order so
    // discovery order is deterministic regardless of filesystem order.
    let mut worklist: Vec<(PathBuf, String)> = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, relative)) = worklist.pop() {
        match read_descriptor(&dir).await {
            DescriptorLookup::Found(descriptor) => {
                // Leaf event; do not descend further.
                events.push(DiscoveredEvent {
                    relative_path: relative,
                    folder: dir,
                    descriptor,
                });
            }
            DescriptorLookup::Invalid => {
                // Already logged; skip this folder, keep its siblings.
            }
            DescriptorLookup::Absent => {
                let mut subdirs = subdirectories(&dir, &relative).await;
                subdirs.sort_by(|a, b| b.1.cmp(&a.1));
                worklist.extend(subdirs);
            }
        }
    }

    Ok(events)
}

enum DescriptorLookup {
    Found(EventDescriptor),
    Invalid,
    Absent,
}

async fn read_descriptor(dir: &Path) -> DescriptorLookup {
    let info_path = dir.join(DESCRIPTOR_FILE);
    let content = match fs::read_to_string(&info_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return DescriptorLookup::Absent,
        Err(e) => {
            warn!("Skipping {}: descriptor unreadable: {}", dir.display(), e);
            return DescriptorLookup::Invalid;
        }
    };

    match serde_json::from_str::<EventDescriptor>(&content) {
        Ok(descriptor) => DescriptorLookup::Found(descriptor),
        Err(e) => {
            let err = CatalogError::Descriptor {
                folder: dir.display().to_string(),
                reason: e.to_string(),
            };
            warn!("{}", err);
            DescriptorLookup::Invalid
        }
    }
}

/// Immediate subdirectories of `dir` with their catalog-relative paths
async fn subdirectories(dir: &Path, relative: &str) -> Vec<(PathBuf, String)> {
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Skipping {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut subdirs = Vec::new();
    loop {
        match read_dir.next_entry().await {
            Ok(Some(entry)) => {
                let is_dir = entry
                    .file_type()
                    .await
                    .map(|file_type| file_type.is_dir())
                    .unwrap_or(false);
                if !is_dir {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                // Forward slashes: relative paths double as URL segments.
                let child_relative = if relative.is_empty() {
                    name
                } else {
                    format!("{}/{}", relative, name)
                };
                subdirs.push((entry.path(), child_relative));
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                break;
            }
        }
    }

    subdirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_descriptor(dir: &Path, name: &str, date: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(
            dir.join(DESCRIPTOR_FILE),
            format!(
                r#"{{"eventName":"{}","date":"{}","description":"test event"}}"#,
                name, date
            ),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_finds_nested_events() {
        let root = TempDir::new().unwrap();
        write_descriptor(&root.path().join("fall-2025/gim_1"), "GIM 1", "2025-02-20");
        write_descriptor(
            &root.path().join("fall-2025/workshop"),
            "Workshop",
            "2025-03-01",
        );

        let events = discover_events(root.path()).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].relative_path, "fall-2025/gim_1");
        assert_eq!(events[1].relative_path, "fall-2025/workshop");
        assert_eq!(events[0].descriptor.event_name, "GIM 1");
    }

    #[tokio::test]
    async fn test_folder_without_descriptor_produces_no_record() {
        let root = TempDir::new().unwrap();
        // "fall-2025" has no descriptor, only its child does
        write_descriptor(&root.path().join("fall-2025/gim_1"), "GIM 1", "2025-02-20");

        let events = discover_events(root.path()).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].relative_path, "fall-2025/gim_1");
    }

    #[tokio::test]
    async fn test_no_descent_below_descriptor() {
        let root = TempDir::new().unwrap();
        write_descriptor(&root.path().join("gim_1"), "GIM 1", "2025-02-20");
        // A nested descriptor below an event folder must not be discovered
        write_descriptor(&root.path().join("gim_1/extra"), "Hidden", "2025-02-21");

        let events = discover_events(root.path()).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].relative_path, "gim_1");
    }

    #[tokio::test]
    async fn test_malformed_descriptor_skips_folder_only() {
        let root = TempDir::new().unwrap();
        let broken = root.path().join("broken");
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(broken.join(DESCRIPTOR_FILE), "{not json").unwrap();
        write_descriptor(&root.path().join("good"), "Good", "2025-02-20");

        let events = discover_events(root.path()).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].relative_path, "good");
    }

    #[tokio::test]
    async fn test_empty_root_yields_empty_catalog() {
        let root = TempDir::new().unwrap();

        let events = discover_events(root.path()).await.unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let err = discover_events(Path::new("/definitely/not/here"))
            .await
            .unwrap_err();

        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_discovery_order_is_name_sorted() {
        let root = TempDir::new().unwrap();
        write_descriptor(&root.path().join("zeta"), "Z", "2025-01-01");
        write_descriptor(&root.path().join("alpha"), "A", "2025-01-01");
        write_descriptor(&root.path().join("mid"), "M", "2025-01-01");

        let events = discover_events(root.path()).await.unwrap();

        let paths: Vec<&str> = events.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(paths, ["alpha", "mid", "zeta"]);
    }
}
