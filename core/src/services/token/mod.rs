//! Token service module for JWT issuance

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
