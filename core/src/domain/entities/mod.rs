//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use token::{Claims, IssuedToken, JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_HOURS};
pub use user::User;
pub use verification_code::{
    IssueOutcome, VerificationCode, VerifyOutcome, CODE_LENGTH, CODE_TTL_SECONDS,
};
