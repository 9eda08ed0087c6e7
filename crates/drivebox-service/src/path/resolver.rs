//! Canonical-path resolution.
//!
//! Walks the folder tree from a node to the root and produces the
//! root-first segment sequence, then renders it as the exact key prefix
//! the namespace store uses. The resolved string is never persisted; it is
//! recomputed from the live parent chain before every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::file::File;
use drivebox_entity::folder::{root_segment, Folder, PathSegment};
use drivebox_entity::store::FolderStore;

/// Upper bound on the parent-chain walk.
///
/// The chain of a healthy tree is short; hitting this bound means the
/// tree is corrupt (or absurdly deep) and the walk fails fast instead of
/// looping on bad data.
pub const MAX_TREE_DEPTH: usize = 64;

/// Resolves canonical paths from the live folder tree.
#[derive(Clone)]
pub struct PathResolver {
    folders: Arc<dyn FolderStore>,
}

impl PathResolver {
    /// Creates a new resolver over the given folder store.
    pub fn new(folders: Arc<dyn FolderStore>) -> Self {
        Self { folders }
    }

    /// Resolve the root-first segment sequence for a folder.
    ///
    /// Fails with `NotFound` if a parent reference points at a missing
    /// record (broken chain) and with `TreeCorrupt` on a cycle or a chain
    /// longer than [`MAX_TREE_DEPTH`].
    pub async fn resolve(&self, folder: &Folder) -> DriveResult<Vec<PathSegment>> {
        let mut segments = vec![PathSegment {
            id: folder.id,
            name: folder.name.clone(),
        }];
        let mut visited: HashSet<Uuid> = HashSet::from([folder.id]);
        let mut current = folder.clone();

        while let Some(parent_id) = current.parent_id {
            if segments.len() >= MAX_TREE_DEPTH {
                return Err(DriveError::TreeCorrupt {
                    folder_id: current.id,
                    reason: format!("parent chain exceeds {MAX_TREE_DEPTH} levels"),
                });
            }

            let parent = self
                .folders
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| {
                    DriveError::not_found(format!(
                        "parent folder {parent_id} of folder {} does not exist",
                        current.id
                    ))
                })?;

            if !visited.insert(parent.id) {
                return Err(DriveError::TreeCorrupt {
                    folder_id: parent.id,
                    reason: "cycle in parent chain".to_string(),
                });
            }

            segments.push(PathSegment {
                id: parent.id,
                name: parent.name.clone(),
            });
            current = parent;
        }

        segments.reverse();
        Ok(segments)
    }

    /// Resolve the segment sequence for a file: its folder's chain plus a
    /// final segment for the file itself.
    pub async fn resolve_file(&self, file: &File) -> DriveResult<Vec<PathSegment>> {
        let folder = self
            .folders
            .find_by_id(file.folder_id)
            .await?
            .ok_or_else(|| {
                DriveError::not_found(format!(
                    "folder {} of file {} does not exist",
                    file.folder_id, file.id
                ))
            })?;

        let mut segments = self.resolve(&folder).await?;
        segments.push(PathSegment {
            id: file.id,
            name: file.name.clone(),
        });
        Ok(segments)
    }

    /// Resolve a folder's canonical path string, the exact namespace key
    /// prefix, e.g. `root-{owner}/Docs/Reports`.
    pub async fn prefix_string(&self, folder: &Folder) -> DriveResult<String> {
        let segments = self.resolve(folder).await?;
        Ok(Self::render(&segments, folder.owner_id))
    }

    /// Render segments as a `/`-joined path, with the root segment
    /// replaced by the globally unique `root-{ownerId}` form.
    pub fn render(segments: &[PathSegment], owner_id: Uuid) -> String {
        segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                if i == 0 {
                    root_segment(owner_id)
                } else {
                    segment.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
