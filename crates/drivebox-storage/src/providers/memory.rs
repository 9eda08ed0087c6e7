//! In-memory namespace store.
//!
//! Models the external namespace the way the sync engine sees it: an owned
//! key-value map from canonical path to object identity. Used as the
//! development backend and by every engine test. Semantics mirror the
//! remote provider: folders are placeholders, objects keep their identity
//! until individually renamed, and a folder cannot be deleted while
//! objects still live under it.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use drivebox_core::traits::{NamespaceObject, NamespaceStore, UploadedObject};
use drivebox_core::{DriveError, DriveResult};

/// A stored object: path-shaped key plus bytes.
#[derive(Debug, Clone)]
struct StoredObject {
    path: String,
    mime_type: String,
    data: Bytes,
}

/// In-memory namespace store backed by concurrent maps.
#[derive(Debug, Default)]
pub struct MemoryNamespaceStore {
    /// Folder placeholders, keyed by canonical path.
    folders: DashMap<String, ()>,
    /// Objects, keyed by public id (the path at upload time).
    objects: DashMap<String, StoredObject>,
}

impl MemoryNamespaceStore {
    /// Create an empty in-memory namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored. Test observability.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether a folder placeholder exists at the given path.
    pub fn has_folder(&self, path: &str) -> bool {
        self.folders.contains_key(path)
    }

    /// The raw bytes of an object, if present.
    pub fn object_data(&self, public_id: &str) -> Option<Bytes> {
        self.objects.get(public_id).map(|o| o.data.clone())
    }

    fn object_url(path: &str) -> String {
        format!("memory://{path}")
    }
}

#[async_trait]
impl NamespaceStore for MemoryNamespaceStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> DriveResult<bool> {
        Ok(true)
    }

    async fn create_folder(&self, path: &str) -> DriveResult<()> {
        self.folders.insert(path.to_string(), ());
        debug!(path, "Created namespace folder");
        Ok(())
    }

    async fn delete_folder(&self, path: &str) -> DriveResult<()> {
        let prefix = format!("{path}/");
        let occupied = self
            .objects
            .iter()
            .any(|o| o.value().path.starts_with(&prefix));
        if occupied {
            return Err(DriveError::external(format!(
                "folder '{path}' still contains objects"
            )));
        }

        self.folders
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        debug!(path, "Deleted namespace folder");
        Ok(())
    }

    async fn rename_folder(&self, old_path: &str, new_path: &str) -> DriveResult<()> {
        if !self.folders.contains_key(old_path) {
            return Err(DriveError::external(format!(
                "no namespace folder at '{old_path}'"
            )));
        }

        let old_prefix = format!("{old_path}/");
        let moved: Vec<String> = self
            .folders
            .iter()
            .map(|e| e.key().clone())
            .filter(|key| key == old_path || key.starts_with(&old_prefix))
            .collect();

        for key in moved {
            self.folders.remove(&key);
            let renamed = if key == old_path {
                new_path.to_string()
            } else {
                format!("{new_path}/{}", &key[old_prefix.len()..])
            };
            self.folders.insert(renamed, ());
        }

        debug!(old_path, new_path, "Renamed namespace folder");
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> DriveResult<Vec<NamespaceObject>> {
        let mut listed: Vec<NamespaceObject> = self
            .objects
            .iter()
            .filter(|o| o.value().path.starts_with(prefix))
            .map(|o| NamespaceObject {
                public_id: o.key().clone(),
                path: o.value().path.clone(),
                size_bytes: Some(o.value().data.len() as u64),
            })
            .collect();
        listed.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(listed)
    }

    async fn upload(&self, path: &str, mime_type: &str, data: Bytes) -> DriveResult<UploadedObject> {
        let public_id = path.to_string();
        self.objects.insert(
            public_id.clone(),
            StoredObject {
                path: path.to_string(),
                mime_type: mime_type.to_string(),
                data,
            },
        );
        debug!(path, "Uploaded object");
        Ok(UploadedObject {
            url: Self::object_url(path),
            public_id,
        })
    }

    async fn delete_object(&self, public_id: &str) -> DriveResult<()> {
        match self.objects.remove(public_id) {
            Some(_) => {
                debug!(public_id, "Deleted object");
                Ok(())
            }
            None => Err(DriveError::external(format!(
                "no object with public id '{public_id}'"
            ))),
        }
    }

    async fn rename_object(&self, public_id: &str, new_path: &str) -> DriveResult<UploadedObject> {
        let (_, old) = self.objects.remove(public_id).ok_or_else(|| {
            DriveError::external(format!("no object with public id '{public_id}'"))
        })?;

        let new_public_id = new_path.to_string();
        self.objects.insert(
            new_public_id.clone(),
            StoredObject {
                path: new_path.to_string(),
                mime_type: old.mime_type,
                data: old.data,
            },
        );
        debug!(public_id, new_path, "Renamed object");
        Ok(UploadedObject {
            url: Self::object_url(new_path),
            public_id: new_public_id,
        })
    }
}
