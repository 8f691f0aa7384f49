use std::fmt;
use std::str::FromStr;

use auth::OtpChallenge;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::MobileNumberError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserStatusError;

/// User account aggregate.
///
/// The credential is stored only as a one-way digest; the recovery challenge
/// holds code and expiry together so they are either both set or both absent.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub mobile_number: MobileNumber,
    pub password_hash: String,
    pub address: Option<Address>,
    pub status: UserStatus,
    pub otp: Option<OtpChallenge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full name used when addressing the user in emails.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A first or last name, 2 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Create a validated name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    /// * `TooLong` - More than 50 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PersonNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using an RFC 5322 compliant parser. Stored and
/// compared case-sensitively, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mobile number with country code, 10 to 15 characters.
///
/// Must contain only digits once `+`, `-`, and spaces are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileNumber(String);

impl MobileNumber {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 15;

    /// Create a validated mobile number.
    ///
    /// # Errors
    /// * `InvalidLength` - Outside 10..=15 characters
    /// * `InvalidCharacters` - Non-digit content after stripping separators
    pub fn new(number: String) -> Result<Self, MobileNumberError> {
        let length = number.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(MobileNumberError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let cleaned: String = number
            .chars()
            .filter(|c| *c != '+' && *c != '-' && *c != ' ')
            .collect();
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(MobileNumberError::InvalidCharacters);
        }

        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Postal address embedded in the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Account status.
///
/// New accounts are created `Active` immediately; there is no email
/// verification step that would start them as `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Suspended,
    Inactive,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Suspended => "SUSPENDED",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(UserStatus::Active),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            "INACTIVE" => Ok(UserStatus::Inactive),
            "BLOCKED" => Ok(UserStatus::Blocked),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

/// Command to register a new user with domain types.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub mobile_number: MobileNumber,
    pub password: String,
    pub address: Option<Address>,
}

/// A user together with the session token issued for it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
}

/// Per-field update marker distinguishing "leave unchanged" from "write this
/// value", where the value itself may be null.
///
/// `Patch::Set(None)` on an optional field clears it; `Patch::Keep` leaves the
/// stored value alone. An absent field can therefore never be confused with an
/// explicit null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }
}

/// Explicit partial update of the mutable user fields.
///
/// Every write through this structure also bumps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password_hash: Patch<String>,
    pub status: Patch<UserStatus>,
    pub otp: Patch<Option<OtpChallenge>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        !self.password_hash.is_set() && !self.status.is_set() && !self.otp.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_bounds() {
        assert!(PersonName::new("Jo".to_string()).is_ok());
        assert!(matches!(
            PersonName::new("J".to_string()),
            Err(PersonNameError::TooShort { .. })
        ));
        assert!(matches!(
            PersonName::new("x".repeat(51)),
            Err(PersonNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_mobile_number_accepts_separators() {
        assert!(MobileNumber::new("+91-98765 4321".to_string()).is_ok());
        assert!(MobileNumber::new("9876543210".to_string()).is_ok());
    }

    #[test]
    fn test_mobile_number_rejects_letters() {
        assert!(matches!(
            MobileNumber::new("98765abcde".to_string()),
            Err(MobileNumberError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_mobile_number_rejects_bad_length() {
        assert!(matches!(
            MobileNumber::new("12345".to_string()),
            Err(MobileNumberError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_user_status_round_trip() {
        for status in [
            UserStatus::Active,
            UserStatus::Suspended,
            UserStatus::Inactive,
            UserStatus::Blocked,
        ] {
            assert_eq!(status.as_str().parse::<UserStatus>().unwrap(), status);
        }
        assert!("PENDING".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_patch_default_is_keep() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert!(!patch.otp.is_set());
    }

    #[test]
    fn test_patch_set_none_is_distinct_from_keep() {
        let clear_otp = UserPatch {
            otp: Patch::Set(None),
            ..Default::default()
        };
        assert!(!clear_otp.is_empty());
        assert_ne!(clear_otp.otp, Patch::Keep);
    }
}
