//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Relational name of the per-owner root folder.
///
/// The root is the only folder with no parent. It is created once, at
/// registration time, and renders as `root-{ownerId}` in the external
/// namespace so that roots of different owners never collide.
pub const ROOT_FOLDER_NAME: &str = "root";

/// A folder in the hierarchy.
///
/// Note there is deliberately no `path` column: canonical paths are always
/// recomputed from the live parent chain before use in a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder ID (null only for the per-owner root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the per-owner root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None only for the root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
}
