//! The namespace synchronization engine.
//!
//! Split by concern: [`engine`] holds the engine state, provisioning and
//! read paths, [`folder_ops`] the folder mutations with their cascades,
//! [`file_ops`] the file mutations.

pub mod engine;
pub mod file_ops;
pub mod folder_ops;

pub use engine::NamespaceSyncEngine;
pub use file_ops::{MoveFileRequest, RenameFileRequest, UploadFileRequest};
pub use folder_ops::{CreateFolderRequest, MoveFolderRequest, RenameFolderRequest};
