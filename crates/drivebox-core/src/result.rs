//! Convenience result type alias for Drivebox.

use crate::error::DriveError;

/// A specialized `Result` type for Drivebox operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, DriveError>` explicitly.
pub type DriveResult<T> = Result<T, DriveError>;
