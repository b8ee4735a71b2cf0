//! Shared configuration and telemetry for SessionKeep server crates
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Tracing subscriber bootstrap

pub mod config;
pub mod telemetry;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    RefreshCookieConfig, VerificationConfig,
};
pub use telemetry::init_tracing;
