//! File mutations: upload, rename, move, delete.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use drivebox_core::DriveResult;
use drivebox_entity::file::{CreateFile, File};

use crate::context::RequestContext;
use crate::sync::engine::{normalized_name, NamespaceSyncEngine};

/// Request to upload a file into a folder.
#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    /// The destination folder.
    pub folder_id: Uuid,
    /// File name, including extension.
    pub name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// The file's bytes.
    pub data: Bytes,
}

/// Request to rename a file.
///
/// Carries the new name *stem*; the file's extension is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFileRequest {
    /// The file to rename.
    pub file_id: Uuid,
    /// The new name without extension.
    pub new_stem: String,
}

/// Request to move a file into another folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// The file to move.
    pub file_id: Uuid,
    /// The destination folder.
    pub new_folder_id: Uuid,
}

impl NamespaceSyncEngine {
    /// Upload a file's bytes to the external namespace, then record its
    /// metadata row.
    ///
    /// If the metadata insert fails after a successful upload the object
    /// stays behind as an orphan. Orphans are invisible to users (no row
    /// references them) and reconcilable offline, which is why this
    /// ordering is safe and the reverse is not.
    pub async fn upload_file(
        &self,
        ctx: &RequestContext,
        req: UploadFileRequest,
    ) -> DriveResult<File> {
        let name = normalized_name(&req.name)?;
        let folder = self.require_owned_folder(ctx, req.folder_id).await?;
        self.guard
            .ensure_file_name_free(folder.id, &name, None)
            .await?;

        let prefix = self.resolver.prefix_string(&folder).await?;
        let path = format!("{prefix}/{name}");
        let size_bytes = req.data.len() as i64;
        let uploaded = self.namespace.upload(&path, &req.mime_type, req.data).await?;

        let created = self
            .files
            .create(&CreateFile {
                folder_id: folder.id,
                name,
                mime_type: req.mime_type,
                size_bytes,
                url: uploaded.url.clone(),
                public_id: uploaded.public_id.clone(),
            })
            .await;

        match created {
            Ok(file) => {
                info!(file_id = %file.id, path = %path, size_bytes, "Uploaded file");
                Ok(file)
            }
            Err(error) => {
                warn!(
                    path = %path,
                    public_id = %uploaded.public_id,
                    error = %error,
                    "File metadata insert failed after upload, orphan object left for reconciliation"
                );
                Err(error)
            }
        }
    }

    /// Rename a file in metadata only.
    ///
    /// The external object keeps its path and public id: the provider's
    /// handle is immutable by policy for plain renames, and the stored URL
    /// keeps serving the same bytes. Only the sibling-visible name changes.
    /// The extension is carried over from the current name.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        req: RenameFileRequest,
    ) -> DriveResult<File> {
        let stem = normalized_name(&req.new_stem)?;
        let (file, folder) = self.require_owned_file(ctx, req.file_id).await?;
        let new_name = file.with_stem(&stem);
        self.guard
            .ensure_file_name_free(folder.id, &new_name, Some(file.id))
            .await?;

        let renamed = self.files.rename(file.id, &new_name).await?;
        info!(file_id = %renamed.id, new_name = %renamed.name, "Renamed file");
        Ok(renamed)
    }

    /// Move a file into another folder, relocating its external object.
    ///
    /// The object rename runs first; if it fails, nothing has changed in
    /// either store and the error propagates. Only after the provider
    /// returns the object's new identity is the metadata row rewritten.
    pub async fn move_file(&self, ctx: &RequestContext, req: MoveFileRequest) -> DriveResult<File> {
        let (file, _) = self.require_owned_file(ctx, req.file_id).await?;
        let target = self.require_owned_folder(ctx, req.new_folder_id).await?;
        self.guard
            .ensure_file_name_free(target.id, &file.name, None)
            .await?;

        let target_prefix = self.resolver.prefix_string(&target).await?;
        let new_path = format!("{target_prefix}/{}", file.name);

        let moved = self.namespace.rename_object(&file.public_id, &new_path).await?;
        let relocated = self
            .files
            .relocate(file.id, target.id, &moved.url, &moved.public_id)
            .await?;

        info!(file_id = %relocated.id, new_path = %new_path, "Moved file");
        Ok(relocated)
    }

    /// Delete a file from both stores.
    ///
    /// The external object is deleted first and must succeed (the provider's
    /// explicit success indicator is checked); only then is the metadata
    /// row removed. A failed external delete leaves the file fully intact
    /// and retryable.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> DriveResult<()> {
        let (file, _) = self.require_owned_file(ctx, file_id).await?;

        self.namespace.delete_object(&file.public_id).await?;
        self.files.delete(file.id).await?;

        info!(file_id = %file.id, public_id = %file.public_id, "Deleted file");
        Ok(())
    }
}
