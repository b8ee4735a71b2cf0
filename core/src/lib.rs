//! # SessionKeep Core
//!
//! Token lifecycle and domain layer for SessionKeep.
//! This crate contains domain entities, the session store and account
//! repository interfaces with in-memory implementations, the token and
//! verification services, and the error types shared by every layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
