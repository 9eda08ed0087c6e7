//! Share-link domain entities.

pub mod expiry;
pub mod model;

pub use expiry::{expires_after, ExpiryUnit};
pub use model::{CreateShareLink, ShareLink, ShareTargetKind};
