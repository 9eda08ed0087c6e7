//! Metadata-store contracts.
//!
//! The relational tree is an external collaborator: the sync engine only
//! ever talks to it through these traits. `drivebox-database` provides the
//! PostgreSQL implementations; tests use in-memory fakes. No cross-entity
//! transaction primitive is assumed; the engine's ordering policy is the
//! only consistency mechanism.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use drivebox_core::DriveResult;

use crate::file::{CreateFile, File};
use crate::folder::{CreateFolder, Folder};
use crate::share::{CreateShareLink, ShareLink};

/// Folder records and parent/child links.
#[async_trait]
pub trait FolderStore: Send + Sync + 'static {
    /// Find a folder by id.
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<Folder>>;

    /// Find an owner's root folder (the one with no parent).
    async fn find_root(&self, owner_id: Uuid) -> DriveResult<Option<Folder>>;

    /// Find a direct child by name, for sibling-scoped uniqueness checks.
    async fn find_by_parent_and_name(
        &self,
        parent_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<Folder>>;

    /// List the direct children of a folder.
    async fn list_children(&self, parent_id: Uuid) -> DriveResult<Vec<Folder>>;

    /// List every descendant of a folder (excluding the folder itself),
    /// parents before children.
    async fn list_descendants(&self, folder_id: Uuid) -> DriveResult<Vec<Folder>>;

    /// Insert a new folder row.
    async fn create(&self, data: &CreateFolder) -> DriveResult<Folder>;

    /// Update a folder's name.
    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<Folder>;

    /// Update a folder's parent.
    async fn reparent(&self, id: Uuid, new_parent_id: Uuid) -> DriveResult<Folder>;

    /// Delete a folder and its entire metadata subtree (descendant folders
    /// and files). Returns `true` if the folder existed.
    async fn delete_subtree(&self, id: Uuid) -> DriveResult<bool>;
}

/// File metadata records.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Find a file by id.
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<File>>;

    /// Find a file by folder and name, for sibling-scoped uniqueness checks.
    async fn find_by_folder_and_name(
        &self,
        folder_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<File>>;

    /// List the files directly inside a folder.
    async fn list_by_folder(&self, folder_id: Uuid) -> DriveResult<Vec<File>>;

    /// Insert a new file row.
    async fn create(&self, data: &CreateFile) -> DriveResult<File>;

    /// Update a file's name. The external object is untouched.
    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<File>;

    /// Update a file's folder reference together with its external identity.
    async fn relocate(
        &self,
        id: Uuid,
        new_folder_id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File>;

    /// Rewrite a file's external identity in place (rename/move cascade).
    async fn update_location(
        &self,
        id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File>;

    /// Delete a file row. Returns `true` if it existed.
    async fn delete(&self, id: Uuid) -> DriveResult<bool>;
}

/// Share-link records.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Find a link by id (= public token).
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<ShareLink>>;

    /// List links issued by a user.
    async fn list_by_creator(&self, user_id: Uuid) -> DriveResult<Vec<ShareLink>>;

    /// Insert a new link row.
    async fn create(&self, data: &CreateShareLink) -> DriveResult<ShareLink>;

    /// Delete a link row. Returns `true` if it existed.
    async fn delete(&self, id: Uuid) -> DriveResult<bool>;

    /// Delete every link with `expires_at <= now`, returning how many rows
    /// were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> DriveResult<u64>;
}
