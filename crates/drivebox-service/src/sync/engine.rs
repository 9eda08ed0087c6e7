//! Engine state, provisioning, and read-side operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::traits::NamespaceStore;
use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::file::File;
use drivebox_entity::folder::{root_segment, CreateFolder, Folder, PathSegment, ROOT_FOLDER_NAME};
use drivebox_entity::store::{FileStore, FolderStore};

use crate::context::RequestContext;
use crate::path::{ConflictGuard, PathResolver};

/// Orchestrates every structural mutation across the external namespace
/// store and the relational metadata store.
///
/// Ordering policy: the riskier external step runs first, the metadata
/// commit second. A crash between the two leaves at worst an orphan
/// external object, which is invisible to users and reconcilable offline.
/// The reverse order could leave metadata pointing at bytes that do not
/// exist.
///
/// Concurrency: name-conflict checks are read-then-write without a lock,
/// so two simultaneous requests for the same name can both pass the check.
/// The database's sibling uniqueness constraint rejects the second insert;
/// its external object becomes an orphan.
pub struct NamespaceSyncEngine {
    pub(crate) folders: Arc<dyn FolderStore>,
    pub(crate) files: Arc<dyn FileStore>,
    pub(crate) namespace: Arc<dyn NamespaceStore>,
    pub(crate) resolver: PathResolver,
    pub(crate) guard: ConflictGuard,
}

impl NamespaceSyncEngine {
    /// Creates a new engine over the given stores.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        namespace: Arc<dyn NamespaceStore>,
    ) -> Self {
        let resolver = PathResolver::new(folders.clone());
        let guard = ConflictGuard::new(folders.clone(), files.clone());
        Self {
            folders,
            files,
            namespace,
            resolver,
            guard,
        }
    }

    /// Provision an owner's root folder in both stores.
    ///
    /// Idempotent: if the metadata root already exists it is returned
    /// as-is. Otherwise the external `root-{owner}` folder is created
    /// first (creating an existing namespace folder is not an error),
    /// then the metadata row.
    pub async fn provision_root(&self, owner_id: Uuid) -> DriveResult<Folder> {
        if let Some(existing) = self.folders.find_root(owner_id).await? {
            return Ok(existing);
        }

        let path = root_segment(owner_id);
        self.namespace.create_folder(&path).await?;

        let root = self
            .folders
            .create(&CreateFolder {
                owner_id,
                parent_id: None,
                name: ROOT_FOLDER_NAME.to_string(),
            })
            .await?;

        info!(owner_id = %owner_id, folder_id = %root.id, "Provisioned root folder");
        Ok(root)
    }

    /// The requesting user's root folder.
    pub async fn root_folder(&self, ctx: &RequestContext) -> DriveResult<Folder> {
        self.folders
            .find_root(ctx.user_id)
            .await?
            .ok_or_else(|| DriveError::not_found("root folder"))
    }

    /// Direct subfolders of a folder the user owns.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
    ) -> DriveResult<Vec<Folder>> {
        let parent = self.require_owned_folder(ctx, parent_id).await?;
        self.folders.list_children(parent.id).await
    }

    /// Files directly inside a folder the user owns.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> DriveResult<Vec<File>> {
        let folder = self.require_owned_folder(ctx, folder_id).await?;
        self.files.list_by_folder(folder.id).await
    }

    /// Root-first breadcrumb segments for a folder the user owns.
    pub async fn folder_path(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> DriveResult<Vec<PathSegment>> {
        let folder = self.require_owned_folder(ctx, folder_id).await?;
        self.resolver.resolve(&folder).await
    }

    /// The download URL of a file the user owns.
    pub async fn download_url(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> DriveResult<String> {
        let (file, _) = self.require_owned_file(ctx, file_id).await?;
        Ok(file.url)
    }

    /// Fetch a folder and verify the requesting user owns it.
    ///
    /// A folder owned by someone else reads as `NotFound`, never as a
    /// distinct "forbidden": ids must not leak existence across owners.
    pub(crate) async fn require_owned_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> DriveResult<Folder> {
        match self.folders.find_by_id(folder_id).await? {
            Some(folder) if folder.owner_id == ctx.user_id => Ok(folder),
            _ => Err(DriveError::not_found(format!("folder {folder_id}"))),
        }
    }

    /// Fetch a file and its folder, verifying ownership through the folder.
    ///
    /// A missing or foreign containing folder reads as the file not being
    /// found; any other store error propagates unchanged.
    pub(crate) async fn require_owned_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> DriveResult<(File, Folder)> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| DriveError::not_found(format!("file {file_id}")))?;
        let folder = match self.require_owned_folder(ctx, file.folder_id).await {
            Ok(folder) => folder,
            Err(DriveError::NotFound(_)) => {
                return Err(DriveError::not_found(format!("file {file_id}")));
            }
            Err(other) => return Err(other),
        };
        Ok((file, folder))
    }
}

/// Validate and normalize a user-supplied folder or file name.
///
/// Surrounding whitespace is trimmed. The result must be non-empty and
/// must not contain `/`, which is the namespace key separator.
pub(crate) fn normalized_name(raw: &str) -> DriveResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DriveError::validation("name must not be empty"));
    }
    if name.contains('/') {
        return Err(DriveError::validation("name must not contain '/'"));
    }
    Ok(name.to_string())
}
