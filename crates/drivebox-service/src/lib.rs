//! # drivebox-service
//!
//! The hierarchical-namespace synchronization engine and its supporting
//! components. Every structural mutation of the drive (create, rename,
//! move, delete of folders and files) flows through
//! [`NamespaceSyncEngine`], which sequences the external namespace store
//! and the relational metadata store so a crash between the two always
//! leaves a recoverable state.
//!
//! Services follow constructor injection: all collaborators are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod path;
pub mod share;
pub mod sync;

#[cfg(test)]
mod testutil;

pub use context::RequestContext;
pub use path::{ConflictGuard, PathResolver};
pub use share::{IssueLinkRequest, ShareLinkIssuer, SharedTarget};
pub use sync::{
    CreateFolderRequest, MoveFileRequest, MoveFolderRequest, NamespaceSyncEngine,
    RenameFileRequest, RenameFolderRequest, UploadFileRequest,
};
