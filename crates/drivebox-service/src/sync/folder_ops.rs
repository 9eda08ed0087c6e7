//! Folder mutations: create, rename, move, delete.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;
use crate::sync::engine::{normalized_name, NamespaceSyncEngine};

/// Request to create a subfolder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// The parent folder.
    pub parent_id: Uuid,
    /// Name of the new folder.
    pub name: String,
}

/// Request to rename a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFolderRequest {
    /// The folder to rename.
    pub folder_id: Uuid,
    /// Its new name.
    pub new_name: String,
}

/// Request to move a folder under a new parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// The folder to move.
    pub folder_id: Uuid,
    /// The destination parent folder.
    pub new_parent_id: Uuid,
}

impl NamespaceSyncEngine {
    /// Create a subfolder in both stores.
    ///
    /// The external namespace folder is created first; the metadata row
    /// follows. If the metadata insert fails, the external folder is left
    /// behind (it is empty and harmless) and the error propagates.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> DriveResult<Folder> {
        let name = normalized_name(&req.name)?;
        let parent = self.require_owned_folder(ctx, req.parent_id).await?;
        self.guard
            .ensure_folder_name_free(parent.id, &name, None)
            .await?;

        let parent_prefix = self.resolver.prefix_string(&parent).await?;
        let path = format!("{parent_prefix}/{name}");
        self.namespace.create_folder(&path).await?;

        let created = self
            .folders
            .create(&CreateFolder {
                owner_id: ctx.user_id,
                parent_id: Some(parent.id),
                name,
            })
            .await;

        match created {
            Ok(folder) => {
                info!(folder_id = %folder.id, path = %path, "Created folder");
                Ok(folder)
            }
            Err(error) => {
                warn!(
                    path = %path,
                    error = %error,
                    "Folder metadata insert failed after namespace create, empty placeholder left for reconciliation"
                );
                Err(error)
            }
        }
    }

    /// Rename a folder and cascade the new prefix through the external
    /// namespace.
    ///
    /// The namespace folder is renamed first, then every descendant file
    /// object is renamed individually and its metadata URL rewritten, and
    /// only then is the folder's own metadata name committed. Per-file
    /// failures are collected rather than aborting the cascade; if any
    /// occurred the call returns `PartialCascadeFailure` after the rename
    /// itself has still been committed, so a retry only has the stragglers
    /// left to fix.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        req: RenameFolderRequest,
    ) -> DriveResult<Folder> {
        let new_name = normalized_name(&req.new_name)?;
        let folder = self.require_owned_folder(ctx, req.folder_id).await?;
        let Some(parent_id) = folder.parent_id else {
            return Err(DriveError::validation("the root folder cannot be renamed"));
        };
        self.guard
            .ensure_folder_name_free(parent_id, &new_name, Some(folder.id))
            .await?;

        let old_prefix = self.resolver.prefix_string(&folder).await?;
        let new_prefix = match old_prefix.rsplit_once('/') {
            Some((head, _)) => format!("{head}/{new_name}"),
            None => new_name.clone(),
        };

        self.namespace.rename_folder(&old_prefix, &new_prefix).await?;
        let failed = self
            .relocate_descendant_objects(&folder, &old_prefix, &new_prefix)
            .await?;

        let renamed = self.folders.rename(folder.id, &new_name).await?;
        info!(
            folder_id = %renamed.id,
            old_prefix = %old_prefix,
            new_prefix = %new_prefix,
            "Renamed folder"
        );

        if failed.is_empty() {
            Ok(renamed)
        } else {
            Err(DriveError::PartialCascadeFailure { failed })
        }
    }

    /// Move a folder under a new parent, cascading like a rename.
    ///
    /// Moving a folder into itself or into one of its own descendants is
    /// rejected before anything is mutated.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        req: MoveFolderRequest,
    ) -> DriveResult<Folder> {
        let folder = self.require_owned_folder(ctx, req.folder_id).await?;
        if folder.parent_id.is_none() {
            return Err(DriveError::validation("the root folder cannot be moved"));
        }
        if req.new_parent_id == folder.id {
            return Err(DriveError::validation("cannot move a folder into itself"));
        }
        let target = self.require_owned_folder(ctx, req.new_parent_id).await?;

        let target_chain = self.resolver.resolve(&target).await?;
        if target_chain.iter().any(|segment| segment.id == folder.id) {
            return Err(DriveError::validation(
                "cannot move a folder into one of its descendants",
            ));
        }

        self.guard
            .ensure_folder_name_free(target.id, &folder.name, None)
            .await?;

        let old_prefix = self.resolver.prefix_string(&folder).await?;
        let target_prefix = self.resolver.prefix_string(&target).await?;
        let new_prefix = format!("{target_prefix}/{}", folder.name);

        self.namespace.rename_folder(&old_prefix, &new_prefix).await?;
        let failed = self
            .relocate_descendant_objects(&folder, &old_prefix, &new_prefix)
            .await?;

        let moved = self.folders.reparent(folder.id, target.id).await?;
        info!(
            folder_id = %moved.id,
            old_prefix = %old_prefix,
            new_prefix = %new_prefix,
            "Moved folder"
        );

        if failed.is_empty() {
            Ok(moved)
        } else {
            Err(DriveError::PartialCascadeFailure { failed })
        }
    }

    /// Delete a folder, its subtree, and every external object under it.
    ///
    /// Two phases. First every object under the folder's prefix is deleted
    /// and the prefix is re-listed: if anything remains, the call fails
    /// with `DeleteIncomplete` and no metadata row is touched, so the
    /// operation can simply be retried. Only on a verified-empty listing
    /// are the namespace folder and the metadata subtree removed.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> DriveResult<()> {
        let folder = self.require_owned_folder(ctx, folder_id).await?;
        if folder.parent_id.is_none() {
            return Err(DriveError::validation("the root folder cannot be deleted"));
        }

        let prefix = self.resolver.prefix_string(&folder).await?;
        let object_prefix = format!("{prefix}/");

        let objects = self.namespace.list_by_prefix(&object_prefix).await?;
        for object in &objects {
            if let Err(error) = self.namespace.delete_object(&object.public_id).await {
                warn!(
                    public_id = %object.public_id,
                    error = %error,
                    "Object deletion failed during folder delete"
                );
            }
        }

        let remaining = self.namespace.list_by_prefix(&object_prefix).await?;
        if !remaining.is_empty() {
            return Err(DriveError::DeleteIncomplete {
                prefix,
                remaining: remaining.len(),
            });
        }

        self.namespace.delete_folder(&prefix).await?;
        self.folders.delete_subtree(folder.id).await?;

        info!(folder_id = %folder.id, prefix = %prefix, "Deleted folder subtree");
        Ok(())
    }

    /// Rename every file object under `folder` (itself included) from
    /// `old_prefix` to `new_prefix`, rewriting each file's stored URL and
    /// public id. Returns the ids of files whose object rename or metadata
    /// rewrite failed.
    ///
    /// Runs against pre-commit metadata: the folder's own rename/reparent
    /// has not landed yet, so resolving each descendant still yields its
    /// old prefix, which is then rebased onto the new one.
    pub(crate) async fn relocate_descendant_objects(
        &self,
        folder: &Folder,
        old_prefix: &str,
        new_prefix: &str,
    ) -> DriveResult<Vec<Uuid>> {
        let mut affected = vec![folder.clone()];
        affected.extend(self.folders.list_descendants(folder.id).await?);

        let mut failed = Vec::new();
        for node in &affected {
            let node_old_prefix = self.resolver.prefix_string(node).await?;
            let node_new_prefix =
                format!("{new_prefix}{}", &node_old_prefix[old_prefix.len()..]);

            for file in self.files.list_by_folder(node.id).await? {
                let new_path = format!("{node_new_prefix}/{}", file.name);
                match self.namespace.rename_object(&file.public_id, &new_path).await {
                    Ok(moved) => {
                        if let Err(error) = self
                            .files
                            .update_location(file.id, &moved.url, &moved.public_id)
                            .await
                        {
                            warn!(
                                file_id = %file.id,
                                error = %error,
                                "URL rewrite failed after object rename"
                            );
                            failed.push(file.id);
                        }
                    }
                    Err(error) => {
                        warn!(
                            file_id = %file.id,
                            new_path = %new_path,
                            error = %error,
                            "Object rename failed during cascade"
                        );
                        failed.push(file.id);
                    }
                }
            }
        }

        Ok(failed)
    }
}
