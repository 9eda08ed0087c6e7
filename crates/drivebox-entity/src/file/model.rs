//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file stored in the external namespace with its metadata row here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The folder this file lives in.
    pub folder_id: Uuid,
    /// File name, including extension. Unique among siblings.
    pub name: String,
    /// MIME type reported at upload time.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Publicly reachable URL of the object's bytes. Rewritten whenever a
    /// rename/move cascade changes the object's external path.
    pub url: String,
    /// The provider's handle for the object.
    pub public_id: String,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// The extension part of the name (without the dot), if any.
    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Rebuild a full file name from a new stem, preserving this file's
    /// extension. Renames never change the extension.
    pub fn with_stem(&self, stem: &str) -> String {
        match self.extension() {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The folder the file is uploaded into.
    pub folder_id: Uuid,
    /// File name including extension.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// URL returned by the namespace store.
    pub url: String,
    /// Public id returned by the namespace store.
    pub public_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_named(name: &str) -> File {
        File {
            id: Uuid::new_v4(),
            folder_id: Uuid::new_v4(),
            name: name.to_string(),
            mime_type: "application/octet-stream".to_string(),
            size_bytes: 0,
            url: String::new(),
            public_id: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_named("a.pdf").extension(), Some("pdf"));
        assert_eq!(file_named("archive.tar.gz").extension(), Some("gz"));
        assert_eq!(file_named("README").extension(), None);
        assert_eq!(file_named(".gitignore").extension(), None);
    }

    #[test]
    fn test_with_stem_preserves_extension() {
        assert_eq!(file_named("a.pdf").with_stem("report"), "report.pdf");
        assert_eq!(file_named("README").with_stem("NOTES"), "NOTES");
    }
}
