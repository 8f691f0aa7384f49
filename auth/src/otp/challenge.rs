use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::Rng;

/// Outcome of validating a submitted recovery code.
///
/// The three cases are deliberately distinct: a wrong code and an expired code
/// produce different user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpValidation {
    /// Code matches and the expiry is still in the future.
    Valid,
    /// Code does not match the issued one.
    InvalidCode,
    /// Code matches but the expiry has passed.
    Expired,
}

/// A short-lived numeric code issued for password recovery.
///
/// The code and its expiry always travel together; a challenge cannot exist
/// with one but not the other. Single use is enforced by the caller: after a
/// successful validation the stored challenge must be cleared in the same
/// update that applies the recovery action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Issue a new challenge valid for `ttl` from `now`.
    ///
    /// The code is a uniformly drawn 4-digit number in 1000..=9999, so leading
    /// zeros are excluded by construction. Unpredictability requirements are
    /// modest; swapping in a CSPRNG would not change behavior.
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        let code = rand::thread_rng().gen_range(1000..=9999);
        Self {
            code: code.to_string(),
            expires_at: now + ttl,
        }
    }

    /// Validate a submitted code against this challenge at time `now`.
    ///
    /// The match is checked before the expiry, so a wrong code never reveals
    /// whether a live challenge exists.
    pub fn validate(&self, submitted: &str, now: DateTime<Utc>) -> OtpValidation {
        if self.code != submitted {
            return OtpValidation::InvalidCode;
        }
        if now > self.expires_at {
            return OtpValidation::Expired;
        }
        OtpValidation::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_issue_four_digit_code() {
        for _ in 0..100 {
            let challenge = OtpChallenge::issue(t0(), Duration::minutes(10));
            let value: u32 = challenge.code.parse().expect("code is numeric");
            assert!((1000..=9999).contains(&value), "code {} out of range", value);
            assert_eq!(challenge.expires_at, t0() + Duration::minutes(10));
        }
    }

    #[test]
    fn test_validate_correct_code() {
        let challenge = OtpChallenge::issue(t0(), Duration::minutes(10));
        let code = challenge.code.clone();

        // One second before expiry is still valid
        let just_in_time = t0() + Duration::minutes(9) + Duration::seconds(59);
        assert_eq!(challenge.validate(&code, just_in_time), OtpValidation::Valid);
    }

    #[test]
    fn test_validate_wrong_code() {
        let challenge = OtpChallenge {
            code: "1234".to_string(),
            expires_at: t0() + Duration::minutes(10),
        };

        assert_eq!(challenge.validate("4321", t0()), OtpValidation::InvalidCode);
    }

    #[test]
    fn test_validate_expired_code() {
        let challenge = OtpChallenge {
            code: "1234".to_string(),
            expires_at: t0() + Duration::minutes(10),
        };

        let too_late = t0() + Duration::minutes(10) + Duration::seconds(1);
        assert_eq!(challenge.validate("1234", too_late), OtpValidation::Expired);
    }

    #[test]
    fn test_validate_exactly_at_expiry() {
        let challenge = OtpChallenge {
            code: "1234".to_string(),
            expires_at: t0() + Duration::minutes(10),
        };

        // Expiry is inclusive: valid at the boundary instant
        let at_expiry = t0() + Duration::minutes(10);
        assert_eq!(challenge.validate("1234", at_expiry), OtpValidation::Valid);
    }

    #[test]
    fn test_wrong_code_after_expiry_reports_invalid() {
        let challenge = OtpChallenge {
            code: "1234".to_string(),
            expires_at: t0(),
        };

        // Mismatch wins over expiry
        let later = t0() + Duration::hours(1);
        assert_eq!(challenge.validate("9999", later), OtpValidation::InvalidCode);
    }
}
