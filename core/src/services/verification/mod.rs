//! Verification code dispatch and housekeeping
//!
//! - Issuing codes and handing them to a notifier without blocking the caller
//! - Checking submitted codes
//! - Periodic purge of dead codes

mod cleanup;
mod service;
mod traits;


pub use cleanup::{CodeCleanupConfig, CodeCleanupService};
pub use service::VerificationService;
pub use traits::CodeNotifier;
