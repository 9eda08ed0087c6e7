//! # drivebox-storage
//!
//! [`NamespaceStore`] providers for Drivebox: the remote asset-provider
//! HTTP client used in production and an in-memory map used for
//! development and tests.
//!
//! [`NamespaceStore`]: drivebox_core::traits::NamespaceStore

pub mod providers;

#[cfg(feature = "memory")]
pub use providers::memory::MemoryNamespaceStore;
#[cfg(feature = "remote")]
pub use providers::remote::RemoteNamespaceStore;
