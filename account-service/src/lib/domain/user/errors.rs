use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonNameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for MobileNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MobileNumberError {
    #[error("Mobile number must be {min} to {max} characters, got {actual}")]
    InvalidLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Mobile number must contain only digits (with optional +, - and spaces)")]
    InvalidCharacters,
}

/// Error for UserStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStatusError {
    #[error("Unknown user status: {0}")]
    Unknown(String),
}

/// Error for email dispatch operations
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email message: {0}")]
    BuildFailed(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid mobile number: {0}")]
    InvalidMobileNumber(#[from] MobileNumberError),

    #[error("Invalid user status: {0}")]
    InvalidStatus(#[from] UserStatusError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    #[error("User not found")]
    NotFound,

    #[error("User with this email already exist")]
    EmailAlreadyExists(String),

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Old password does not match")]
    InvalidOldPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP Expired")]
    OtpExpired,

    // Infrastructure errors
    #[error("Failed to send OTP email")]
    EmailDispatch(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        UserError::Token(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
