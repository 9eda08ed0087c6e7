//! Collaborator traits defined at the crate seams.

pub mod namespace;

pub use namespace::{NamespaceObject, NamespaceStore, UploadedObject};
