//! Unified application error types for Drivebox.
//!
//! All crates map their internal errors into [`DriveError`] for consistent
//! propagation through the ? operator. Unlike an opaque kind/message pair,
//! the variants that describe a two-store consistency failure carry enough
//! structure (affected ids, remaining object counts) for a caller to retry
//! narrowly instead of re-driving the whole operation.

use thiserror::Error;
use uuid::Uuid;

/// The unified application error used throughout Drivebox.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The referenced folder, file, or share link is absent, or a parent
    /// chain points at a record that no longer exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// A sibling with the same name already exists under the same parent.
    #[error("name conflict: '{name}' already exists under folder {parent_id}")]
    NameConflict {
        /// The parent folder in which the collision occurred.
        parent_id: Uuid,
        /// The colliding name.
        name: String,
    },

    /// External deletion under a prefix could not be fully verified.
    ///
    /// Metadata is left untouched when this is returned, so the delete is
    /// safe to retry.
    #[error("external deletion incomplete under '{prefix}': {remaining} object(s) remain")]
    DeleteIncomplete {
        /// The canonical path prefix that was being cleared.
        prefix: String,
        /// Number of external objects still listed under the prefix.
        remaining: usize,
    },

    /// A rename/move succeeded for the folder itself but failed for one or
    /// more descendant files. Carries the ids of the files whose external
    /// object or stored URL could not be updated.
    #[error("cascade partially failed for {} descendant file(s)", failed.len())]
    PartialCascadeFailure {
        /// Ids of the files left with a stale external path.
        failed: Vec<Uuid>,
    },

    /// Opaque failure reported by the object-storage provider.
    #[error("external store error: {0}")]
    ExternalStore(String),

    /// The share link exists but its expiry timestamp has passed.
    #[error("share link has expired")]
    Expired,

    /// The share link targets a resource of a different kind than the one
    /// declared by the caller.
    #[error("share link targets a {actual}, not a {requested}")]
    WrongKind {
        /// The kind the caller asked for.
        requested: String,
        /// The kind the link actually points at.
        actual: String,
    },

    /// The folder tree contains a cycle or exceeds the maximum supported
    /// depth. Surfaced as corruption, never silently repaired.
    #[error("folder tree corrupt at {folder_id}: {reason}")]
    TreeCorrupt {
        /// The folder at which the walk gave up.
        folder_id: Uuid,
        /// What the walk observed.
        reason: String,
    },

    /// Input validation failed before any store was touched.
    #[error("validation error: {0}")]
    Validation(String),

    /// A relational-store error occurred.
    #[error("database error: {message}")]
    Database {
        /// Human-readable description.
        message: String,
        /// Underlying driver error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DriveError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a name-conflict error.
    pub fn name_conflict(parent_id: Uuid, name: impl Into<String>) -> Self {
        Self::NameConflict {
            parent_id,
            name: name.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an external-store error.
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalStore(message.into())
    }

    /// Create a database error without an underlying cause.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a database error with an underlying cause.
    pub fn database_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Stable machine-readable code for logging and API mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::NameConflict { .. } => "NAME_CONFLICT",
            Self::DeleteIncomplete { .. } => "DELETE_INCOMPLETE",
            Self::PartialCascadeFailure { .. } => "PARTIAL_CASCADE_FAILURE",
            Self::ExternalStore(_) => "EXTERNAL_STORE",
            Self::Expired => "EXPIRED",
            Self::WrongKind { .. } => "WRONG_KIND",
            Self::TreeCorrupt { .. } => "TREE_CORRUPT",
            Self::Validation(_) => "VALIDATION",
            Self::Database { .. } => "DATABASE",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}

impl From<serde_json::Error> for DriveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON serialization error: {err}"))
    }
}

impl From<config::ConfigError> for DriveError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(format!("{err}"))
    }
}
