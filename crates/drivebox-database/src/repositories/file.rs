//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::store::FileStore;

/// Repository for file metadata CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to find file", e))
    }

    async fn find_by_folder_and_name(
        &self,
        folder_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE folder_id = $1 AND name = $2")
            .bind(folder_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to find file by name", e))
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> DriveResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE folder_id = $1 ORDER BY name ASC")
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to list files", e))
    }

    async fn create(&self, data: &CreateFile) -> DriveResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (folder_id, name, mime_type, size_bytes, url, public_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.url)
        .bind(&data.public_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to create file", e))
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<File> {
        sqlx::query_as::<_, File>("UPDATE files SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(new_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to rename file", e))
    }

    async fn relocate(
        &self,
        id: Uuid,
        new_folder_id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET folder_id = $2, url = $3, public_id = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_folder_id)
        .bind(new_url)
        .bind(new_public_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to relocate file", e))
    }

    async fn update_location(
        &self,
        id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET url = $2, public_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_url)
        .bind(new_public_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to update file location", e))
    }

    async fn delete(&self, id: Uuid) -> DriveResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
