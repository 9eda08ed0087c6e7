//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::folder::{CreateFolder, Folder};
use drivebox_entity::store::FolderStore;

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to find folder", e))
    }

    async fn find_root(&self, owner_id: Uuid) -> DriveResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to find root folder", e))
    }

    async fn find_by_parent_and_name(
        &self,
        parent_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE parent_id = $1 AND name = $2")
            .bind(parent_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to find folder by name", e))
    }

    async fn list_children(&self, parent_id: Uuid) -> DriveResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to list children", e))
    }

    async fn list_descendants(&self, folder_id: Uuid) -> DriveResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE tree AS ( \
                SELECT id, owner_id, parent_id, name, created_at, 0 AS lvl \
                  FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.owner_id, f.parent_id, f.name, f.created_at, t.lvl + 1 \
                  FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT id, owner_id, parent_id, name, created_at \
               FROM tree WHERE id != $1 ORDER BY lvl ASC, name ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to list descendants", e))
    }

    async fn create(&self, data: &CreateFolder) -> DriveResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (owner_id, parent_id, name) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.parent_id)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to create folder", e))
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to rename folder", e))
    }

    async fn reparent(&self, id: Uuid, new_parent_id: Uuid) -> DriveResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to reparent folder", e))
    }

    async fn delete_subtree(&self, id: Uuid) -> DriveResult<bool> {
        // ON DELETE CASCADE removes descendant folders and files with the row.
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}
