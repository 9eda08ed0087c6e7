//! # drivebox-database
//!
//! PostgreSQL connection management and the concrete metadata-store
//! implementations for Drivebox entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
