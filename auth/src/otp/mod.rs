pub mod challenge;

pub use challenge::OtpChallenge;
pub use challenge::OtpValidation;
