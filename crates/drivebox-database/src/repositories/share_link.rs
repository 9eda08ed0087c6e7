//! Share-link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::share::{CreateShareLink, ShareLink};
use drivebox_entity::store::LinkStore;

/// Repository for share-link CRUD and expiry sweeps.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share-link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for ShareLinkRepository {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to find share link", e))
    }

    async fn list_by_creator(&self, user_id: Uuid) -> DriveResult<Vec<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to list share links", e))
    }

    async fn create(&self, data: &CreateShareLink) -> DriveResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (target_kind, target_id, created_by, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.target_kind)
        .bind(data.target_id)
        .bind(data.created_by)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DriveError::database_with_source("Failed to create share link", e))
    }

    async fn delete(&self, id: Uuid) -> DriveResult<bool> {
        let result = sqlx::query("DELETE FROM share_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to delete share link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DriveResult<u64> {
        let result = sqlx::query("DELETE FROM share_links WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DriveError::database_with_source("Failed to sweep expired links", e))?;
        Ok(result.rows_affected())
    }
}
