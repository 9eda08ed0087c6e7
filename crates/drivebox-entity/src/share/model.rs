//! Share-link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind of resource a share link points at.
///
/// A link is scoped to exactly one kind; resolving with the wrong declared
/// kind fails even if the id happens to match a record of the other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_target_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShareTargetKind {
    /// The link grants read access to a folder.
    Folder,
    /// The link grants read access to a file.
    File,
}

impl std::fmt::Display for ShareTargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A time-bounded public token granting read access to one folder or file.
///
/// The id doubles as the public token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique link identifier; used directly as the public token.
    pub id: Uuid,
    /// What kind of resource the link targets.
    pub target_kind: ShareTargetKind,
    /// Id of the targeted folder or file.
    pub target_id: Uuid,
    /// The user who issued the link.
    pub created_by: Uuid,
    /// Absolute expiry timestamp, computed at issue time.
    pub expires_at: DateTime<Utc>,
    /// When the link was issued.
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    /// Whether the link has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Data required to create a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// Target kind.
    pub target_kind: ShareTargetKind,
    /// Target id.
    pub target_id: Uuid,
    /// Issuing user.
    pub created_by: Uuid,
    /// Absolute expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
