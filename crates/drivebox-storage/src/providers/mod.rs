//! Namespace-store provider implementations.

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "remote")]
pub mod remote;
