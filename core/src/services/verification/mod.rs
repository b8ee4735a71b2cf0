//! Verification service module for one-time, code-paired tokens
//!
//! This module provides the account confirmation and password reset token
//! workflow:
//! - Token and code generation, stored under the token's hash with a TTL
//! - Two-factor check of raw token plus out-of-band code
//! - Single-use consumption

mod config;
mod service;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
