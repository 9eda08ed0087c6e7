//! Folder domain entities.

pub mod model;
pub mod path;

pub use model::{CreateFolder, Folder, ROOT_FOLDER_NAME};
pub use path::{root_segment, PathSegment};
