//! Token service module for session lifecycle management
//!
//! This module handles all token-related operations including:
//! - Random token generation and one-way hashing for store keys
//! - HS256 access token signing and verification
//! - Session issuance, refresh-token rotation and revocation
//! - Account-wide revocation through `jwt_version`

mod codec;
mod config;
mod hasher;
mod random;
mod service;


pub use codec::AccessTokenCodec;
pub use config::TokenServiceConfig;
pub use hasher::hash_secret;
pub(crate) use hasher::digest_hint;
pub use random::{EntropySource, OsEntropy, TokenGenerator};
pub use service::{AccessVerifier, TokenService};
