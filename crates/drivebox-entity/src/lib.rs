//! # drivebox-entity
//!
//! Domain entities for Drivebox: folders, files, and share links, plus the
//! metadata-store contracts they are persisted through. Path strings are
//! derived views over the folder tree and are never stored.

pub mod file;
pub mod folder;
pub mod share;
pub mod store;
