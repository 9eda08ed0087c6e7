//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted by the transport layer and passed into every service method
/// so each operation knows *who* is acting and *when* the request arrived.
/// The request time is the reference instant for share-link expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for a request arriving now.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Creates a context with an explicit request time.
    pub fn at(user_id: Uuid, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }
}
