//! Domain-specific error types and error handling.

mod types;


pub use types::{StoreError, TokenError, TokenRejection};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Errors the HTTP layer must answer with a uniform "unauthorized",
    /// without revealing which of them occurred.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::InvalidSession
                    | TokenError::SessionRevoked
                    | TokenError::InvalidAccessToken(_)
                    | TokenError::VerificationNotFound
            )
        )
    }

    /// Errors caused by a failing collaborator rather than by the request
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            DomainError::Store(_)
                | DomainError::Internal { .. }
                | DomainError::Token(
                    TokenError::EntropyUnavailable
                        | TokenError::SigningFailed
                        | TokenError::IssuanceFailed { .. }
                )
        )
    }

    /// Stable error code for logs and API bodies
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Token(e) => e.code(),
            DomainError::Store(e) => e.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
