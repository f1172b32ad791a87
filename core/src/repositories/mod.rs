pub mod user;
pub mod verification_code;

pub use user::{InMemoryUserRepository, UserRepository};
pub use verification_code::{InMemoryVerificationCodeRepository, VerificationCodeRepository};
