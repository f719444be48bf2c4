//! Association between an issued code and the identity it was derived from.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Identity, VerificationCode};

/// Default lifetime of an association (10 minutes)
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// Time-bounded record linking a code back to its source identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// The 6-digit code
    pub code: VerificationCode,

    /// Identity the code was derived from
    pub identity: Identity,

    /// Timestamp when the association was recorded
    pub created_at: DateTime<Utc>,
}

impl Association {
    /// Creates an association recorded at `created_at`
    pub fn new(code: VerificationCode, identity: Identity, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            identity,
            created_at,
        }
    }

    /// Instant from which the association is expired, saturating at the
    /// latest representable instant
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.created_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Active while `now - created_at < ttl`
    pub fn is_active_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) < ttl
    }

    /// Negation of [`Association::is_active_at`]
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.is_active_at(now, ttl)
    }

    /// Time left before expiry, zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>, ttl: Duration) -> Duration {
        let remaining = self.expires_at(ttl) - now;
        if remaining > Duration::zero() {
            remaining
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn association_at(created_at: DateTime<Utc>) -> Association {
        Association::new(
            VerificationCode::parse("176613").unwrap(),
            Identity::new("b696b260-03ec-46b7-855a-bb2ab3da1976").unwrap(),
            created_at,
        )
    }

    #[test]
    fn test_active_window_is_half_open() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let ttl = Duration::minutes(DEFAULT_CODE_TTL_MINUTES);
        let association = association_at(created);

        assert!(association.is_active_at(created, ttl));
        assert!(association.is_active_at(created + ttl - Duration::milliseconds(1), ttl));
        assert!(association.is_expired_at(created + ttl, ttl));
        assert!(association.is_expired_at(created + ttl + Duration::hours(1), ttl));
    }

    #[test]
    fn test_expires_at() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let association = association_at(created);
        assert_eq!(
            association.expires_at(Duration::minutes(10)),
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 10, 0).unwrap()
        );
    }

    #[test]
    fn test_expires_at_saturates_instead_of_overflowing() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let association = association_at(created);
        let ttl = Duration::seconds(9_000_000_000_000);

        assert_eq!(association.expires_at(ttl), DateTime::<Utc>::MAX_UTC);
        assert!(association.is_active_at(created + Duration::days(365), ttl));
    }

    #[test]
    fn test_time_until_expiration() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let ttl = Duration::minutes(10);
        let association = association_at(created);

        assert_eq!(
            association.time_until_expiration(created + Duration::minutes(4), ttl),
            Duration::minutes(6)
        );
        assert_eq!(
            association.time_until_expiration(created + Duration::minutes(11), ttl),
            Duration::zero()
        );
    }

    #[test]
    fn test_clock_behind_creation_counts_as_active() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let association = association_at(created);
        assert!(association.is_active_at(created - Duration::seconds(5), Duration::minutes(10)));
    }
}
