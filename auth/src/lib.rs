//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the account service:
//! - Password hashing (Argon2id)
//! - Session token generation and validation (JWT)
//! - One-time password generation and validation for account recovery
//! - Authentication coordination (verify credentials, then issue a token)
//!
//! The service defines its own ports and adapts these implementations, so the
//! domain layer stays decoupled from the concrete crypto stack.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new("user123", "ACTIVE", 3600);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## One-Time Passwords
//! ```
//! use auth::{OtpChallenge, OtpValidation};
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let challenge = OtpChallenge::issue(now, Duration::minutes(10));
//! let code = challenge.code.clone();
//! assert_eq!(challenge.validate(&code, now), OtpValidation::Valid);
//! assert_eq!(challenge.validate("wrong", now), OtpValidation::InvalidCode);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::new("user123", "ACTIVE", 3600);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.status, "ACTIVE");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod otp;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use otp::OtpChallenge;
pub use otp::OtpValidation;
pub use password::PasswordError;
pub use password::PasswordHasher;
