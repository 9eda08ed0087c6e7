//! Concrete metadata-store implementations backed by PostgreSQL.

pub mod file;
pub mod folder;
pub mod share_link;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use share_link::ShareLinkRepository;
