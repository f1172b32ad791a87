//! Verification code delivery

pub mod console_notifier;

pub use console_notifier::ConsoleNotifier;
