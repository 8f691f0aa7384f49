use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::user::errors::MailerError;
use crate::user::errors::UserError;

/// Port for the authentication flows the HTTP layer drives.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue a session token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password could not be hashed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError>;

    /// Replace the password of an authenticated user.
    ///
    /// The caller has already proven possession of a valid session token; the
    /// old password is still required to verify against the stored digest.
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `InvalidOldPassword` - Old password does not verify
    /// * `Password` - New password could not be hashed
    /// * `DatabaseError` - Store operation failed
    async fn reset_password(
        &self,
        user_id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), UserError>;

    /// Issue a recovery code for the account and email it to the user.
    ///
    /// The code is persisted before dispatch. If dispatch fails the code stays
    /// persisted but the flow reports failure; retrying delivery is the
    /// mailer's concern, not this service's.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `EmailDispatch` - Code persisted but the email could not be sent
    /// * `DatabaseError` - Store operation failed
    async fn forget_password(&self, email: &str) -> Result<(), UserError>;

    /// Reset the password using a previously issued recovery code.
    ///
    /// On success the code is consumed in the same update that writes the new
    /// digest, so it cannot be replayed.
    ///
    /// # Errors
    /// * `PasswordMismatch` - new_password != confirm_password
    /// * `NotFound` - No user with this email
    /// * `InvalidOtp` - No live code, wrong code, or code already consumed
    /// * `OtpExpired` - Code matches but its expiry has passed
    /// * `DatabaseError` - Store operation failed
    async fn reset_password_with_otp(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Email uniqueness is enforced by the store: of two concurrent inserts
    /// with the same email exactly one succeeds.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Apply a partial update atomically and return the updated user.
    ///
    /// Returns `None` if the id does not exist. Fields marked `Patch::Keep`
    /// are untouched; `updated_at` is always bumped.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn update_fields(&self, id: &UserId, patch: UserPatch)
        -> Result<Option<User>, UserError>;

    /// Apply a partial update only if the stored recovery code still equals
    /// `expected_code`.
    ///
    /// Returns `false` when no row matched, i.e. the code was already consumed
    /// by a concurrent request or the user is gone. This is the atomic
    /// validate-then-invalidate step that makes recovery codes single use.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn consume_otp(
        &self,
        id: &UserId,
        expected_code: &str,
        patch: UserPatch,
    ) -> Result<bool, UserError>;
}

/// Outbound email dispatch.
///
/// Fire-and-forget from the service's perspective: failures are surfaced, not
/// retried here.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Email the password recovery code to the user.
    ///
    /// Subject, wording, and formatting are the adapter's concern; the domain
    /// only supplies the recipient and the code.
    ///
    /// # Errors
    /// * `InvalidAddress` - Recipient address could not be parsed
    /// * `BuildFailed` - Message could not be assembled
    /// * `SendFailed` - Transport-level delivery failure
    async fn send_otp_email(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), MailerError>;
}

/// Time source, injected so expiry logic is testable without sleeping.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
