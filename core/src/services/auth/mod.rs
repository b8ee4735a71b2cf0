//! Account flows built on the token lifecycle
//!
//! This module composes session issuance, verification tokens and the
//! account store into:
//! - Login, refresh, authentication and logout
//! - Account confirmation
//! - Password reset with global session revocation

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountSession, AuthService};
