//! # drivebox-core
//!
//! Core crate for Drivebox. Contains the namespace-store trait,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Drivebox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::DriveError;
pub use result::DriveResult;
