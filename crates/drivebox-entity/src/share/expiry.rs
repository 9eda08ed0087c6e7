//! Share-link expiry computation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Unit for a share-link duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryUnit {
    /// Duration counted in hours.
    Hours,
    /// Duration counted in days.
    Days,
}

/// Compute the absolute expiry timestamp for a link issued at `now`.
///
/// The expiry is stored as an absolute instant rather than a raw duration,
/// so a link's validity never depends on when it is re-read.
pub fn expires_after(now: DateTime<Utc>, duration: i64, unit: ExpiryUnit) -> DateTime<Utc> {
    match unit {
        ExpiryUnit::Hours => now + Duration::hours(duration),
        ExpiryUnit::Days => now + Duration::days(duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_hours() {
        let now = Utc::now();
        assert_eq!(expires_after(now, 3, ExpiryUnit::Hours), now + Duration::hours(3));
    }

    #[test]
    fn test_expires_after_days() {
        let now = Utc::now();
        assert_eq!(expires_after(now, 2, ExpiryUnit::Days), now + Duration::days(2));
    }
}
