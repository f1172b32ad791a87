//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Repository implementations for users and verification codes

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlUserRepository, MySqlVerificationCodeRepository};
