//! Canonical-path resolution and sibling-name conflict checks.

pub mod conflict;
pub mod resolver;

pub use conflict::ConflictGuard;
pub use resolver::{PathResolver, MAX_TREE_DEPTH};
