//! Time-bounded public share links.

pub mod service;

pub use service::{IssueLinkRequest, ShareLinkIssuer, SharedTarget};
