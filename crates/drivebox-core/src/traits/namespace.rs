//! Namespace-store trait for the external object-storage provider.
//!
//! The provider exposes a flat namespace keyed by path-shaped strings
//! (`root-{owner}/Docs/a.pdf`). Every call is individually atomic and
//! independently failing; it either reports success or an explicit error,
//! never silent partial success. The sync engine owns ordering and
//! verification across calls; retries are deliberately not part of this
//! contract.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::DriveResult;

/// Identity of an object accepted by the provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadedObject {
    /// Publicly reachable URL for the object's bytes.
    pub url: String,
    /// The provider's immutable handle for the object. Used for delete
    /// and rename calls.
    pub public_id: String,
}

/// An object listed under a namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NamespaceObject {
    /// The provider's handle for the object.
    pub public_id: String,
    /// Full path-shaped key of the object.
    pub path: String,
    /// Size in bytes, when the provider reports it.
    pub size_bytes: Option<u64>,
}

/// Trait for the external object-storage namespace.
///
/// Implementations exist for the remote asset provider (HTTP) and an
/// in-memory map used for development and tests. The trait is defined
/// here in `drivebox-core` and implemented in `drivebox-storage`.
#[async_trait]
pub trait NamespaceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> DriveResult<bool>;

    /// Create an (empty) namespace folder at the given path. Creating a
    /// folder that already exists is not an error.
    async fn create_folder(&self, path: &str) -> DriveResult<()>;

    /// Delete the namespace folder at the given path, including any empty
    /// sub-folders. Fails if objects still live under the path.
    async fn delete_folder(&self, path: &str) -> DriveResult<()>;

    /// Rename a namespace folder. Only the folder placeholders move;
    /// objects under the old prefix keep their identities and must be
    /// renamed individually.
    async fn rename_folder(&self, old_path: &str, new_path: &str) -> DriveResult<()>;

    /// List every object whose path starts with the given prefix.
    async fn list_by_prefix(&self, prefix: &str) -> DriveResult<Vec<NamespaceObject>>;

    /// Upload bytes to the given path and return the stored identity.
    async fn upload(&self, path: &str, mime_type: &str, data: Bytes) -> DriveResult<UploadedObject>;

    /// Delete a single object by its public id. The provider's explicit
    /// success indicator is checked; anything else is surfaced as an error.
    async fn delete_object(&self, public_id: &str) -> DriveResult<()>;

    /// Rename (move) a single object to a new path, returning its updated
    /// identity.
    async fn rename_object(&self, public_id: &str, new_path: &str) -> DriveResult<UploadedObject>;
}
