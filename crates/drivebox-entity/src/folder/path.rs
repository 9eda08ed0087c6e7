//! Canonical-path segments.
//!
//! A canonical path is the root-to-node sequence of names identifying a
//! folder or file's location in the external namespace. It is a derived
//! value: the resolver reconstructs it from the parent chain on every
//! mutation, and no cached path string is ever treated as authoritative.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of a canonical path, root-first.
///
/// The id is carried alongside the name so breadcrumb navigation can link
/// each segment back to its folder (or, for the final segment of a file
/// path, the file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Folder or file id this segment refers to.
    pub id: Uuid,
    /// Live name of the node.
    pub name: String,
}

/// External rendering of an owner's root folder.
///
/// The external namespace is flat and shared across owners, so a bare
/// literal `root` would collide; every owner's root renders as
/// `root-{ownerId}` instead.
pub fn root_segment(owner_id: Uuid) -> String {
    format!("root-{owner_id}")
}
