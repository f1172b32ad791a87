//! Authentication service module
//!
//! Phone number login and registration backed by one-time SMS codes.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
