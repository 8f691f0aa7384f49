use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Carries the authenticated user's identity and account status together with
/// the standard issued-at and expiry timestamps. The token is self-contained:
/// verification never requires a store lookup, which also means the embedded
/// status can be stale if the account was suspended after issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Account status at issuance (e.g. "ACTIVE")
    pub status: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user session expiring `ttl_seconds` from now.
    pub fn new(user_id: impl ToString, status: impl ToString, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self::at(user_id, status, now.timestamp(), ttl_seconds)
    }

    /// Create claims with an explicit issued-at timestamp.
    pub fn at(
        user_id: impl ToString,
        status: impl ToString,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            status: status.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Remaining validity as a `Duration` (negative once expired).
    pub fn remaining(&self, current_timestamp: i64) -> Duration {
        Duration::seconds(self.exp - current_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user123", "ACTIVE", 3600);

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.status, "ACTIVE");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_at_explicit_timestamps() {
        let claims = Claims::at("user123", "INACTIVE", 1_000_000, 600);

        assert_eq!(claims.iat, 1_000_000);
        assert_eq!(claims.exp, 1_000_600);
        assert_eq!(claims.status, "INACTIVE");
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::at("user123", "ACTIVE", 0, 1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_remaining() {
        let claims = Claims::at("user123", "ACTIVE", 0, 1000);

        assert_eq!(claims.remaining(400), Duration::seconds(600));
        assert_eq!(claims.remaining(1200), Duration::seconds(-200));
    }
}
