use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::OtpChallenge;
use auth::OtpValidation;
use chrono::Duration;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Patch;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::models::UserStatus;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::Clock;
use crate::user::ports::Mailer;
use crate::user::ports::UserRepository;

/// Domain service orchestrating the authentication flows.
///
/// Delegates hashing and token issuance to the auth library and persists via
/// the injected repository. Holds no mutable state of its own; every flow is
/// a pure request/response interaction with the collaborators.
pub struct UserService<R, M, C>
where
    R: UserRepository,
    M: Mailer,
    C: Clock,
{
    repository: Arc<R>,
    mailer: Arc<M>,
    clock: C,
    authenticator: Arc<Authenticator>,
    token_ttl_seconds: i64,
    otp_ttl: Duration,
}

impl<R, M, C> UserService<R, M, C>
where
    R: UserRepository,
    M: Mailer,
    C: Clock,
{
    /// Create a new service with injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `mailer` - Outbound email dispatch implementation
    /// * `clock` - Time source for token and OTP expiry
    /// * `authenticator` - Shared hashing/token coordinator
    /// * `token_ttl_seconds` - Session token lifetime
    /// * `otp_ttl_minutes` - Recovery code lifetime
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        clock: C,
        authenticator: Arc<Authenticator>,
        token_ttl_seconds: i64,
        otp_ttl_minutes: i64,
    ) -> Self {
        Self {
            repository,
            mailer,
            clock,
            authenticator,
            token_ttl_seconds,
            otp_ttl: Duration::minutes(otp_ttl_minutes),
        }
    }

    fn claims_for(&self, user: &User) -> Claims {
        Claims::at(
            user.id,
            user.status,
            self.clock.now().timestamp(),
            self.token_ttl_seconds,
        )
    }
}

#[async_trait]
impl<R, M, C> AuthServicePort for UserService<R, M, C>
where
    R: UserRepository,
    M: Mailer,
    C: Clock,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let now = self.clock.now();
        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            mobile_number: command.mobile_number,
            password_hash,
            address: command.address,
            status: UserStatus::Active,
            otp: None,
            created_at: now,
            updated_at: now,
        };

        // Uniqueness races are resolved by the store: a concurrent insert with
        // the same email surfaces here as EmailAlreadyExists.
        let user = self.repository.insert(user).await?;

        let access_token = self.authenticator.generate_token(&self.claims_for(&user))?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthSession { user, access_token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound)?;

        let claims = self.claims_for(&user);
        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                auth::AuthenticationError::PasswordError(err) => UserError::Password(err),
                auth::AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            user,
            access_token: result.access_token,
        })
    }

    async fn reset_password(
        &self,
        user_id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if !self
            .authenticator
            .verify_password(old_password, &user.password_hash)?
        {
            return Err(UserError::InvalidOldPassword);
        }

        let password_hash = self.authenticator.hash_password(new_password)?;
        let patch = UserPatch {
            password_hash: Patch::Set(password_hash),
            ..Default::default()
        };

        self.repository
            .update_fields(user_id, patch)
            .await?
            .ok_or(UserError::NotFound)?;

        tracing::info!(user_id = %user_id, "Password reset successful");
        Ok(())
    }

    async fn forget_password(&self, email: &str) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound)?;

        let challenge = OtpChallenge::issue(self.clock.now(), self.otp_ttl);

        let patch = UserPatch {
            otp: Patch::Set(Some(challenge.clone())),
            ..Default::default()
        };
        self.repository
            .update_fields(&user.id, patch)
            .await?
            .ok_or(UserError::NotFound)?;

        // The code is already persisted at this point. A dispatch failure
        // leaves it in place and reports the failure to the caller.
        if let Err(e) = self
            .mailer
            .send_otp_email(email, &user.full_name(), &challenge.code)
            .await
        {
            tracing::error!(user_id = %user.id, error = %e, "Failed to send OTP email");
            return Err(UserError::EmailDispatch(e.to_string()));
        }

        tracing::info!(user_id = %user.id, "OTP issued and sent");
        Ok(())
    }

    async fn reset_password_with_otp(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), UserError> {
        if new_password != confirm_password {
            return Err(UserError::PasswordMismatch);
        }

        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound)?;

        let challenge = user.otp.as_ref().ok_or(UserError::InvalidOtp)?;
        match challenge.validate(otp, self.clock.now()) {
            OtpValidation::InvalidCode => return Err(UserError::InvalidOtp),
            OtpValidation::Expired => return Err(UserError::OtpExpired),
            OtpValidation::Valid => {}
        }

        let password_hash = self.authenticator.hash_password(new_password)?;
        let patch = UserPatch {
            password_hash: Patch::Set(password_hash),
            otp: Patch::Set(None),
            ..Default::default()
        };

        // Conditional write keyed on the code: if a concurrent request already
        // consumed it, no row matches and the reset is rejected.
        let consumed = self.repository.consume_otp(&user.id, otp, patch).await?;
        if !consumed {
            return Err(UserError::InvalidOtp);
        }

        tracing::info!(user_id = %user.id, "Password reset via OTP successful");
        Ok(())
    }
}
