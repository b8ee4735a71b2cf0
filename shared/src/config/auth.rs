//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{env_or, Environment};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Upper bound on any configured token lifetime (10 years)
pub const MAX_EXPIRY_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// JWT access token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret for HS256 signing
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: u64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 3600,     // 1 hour
            refresh_token_expiry: 604800,  // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: u64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: u64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// One-time verification token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Verification record lifetime in seconds
    pub token_expiry: u64,

    /// Random bytes in the raw verification token
    pub token_bytes: usize,

    /// Random bytes in the out-of-band code
    pub code_bytes: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            token_expiry: 1800,  // 30 minutes
            token_bytes: 32,
            code_bytes: 4,
        }
    }
}

/// Cookie used to transport the raw refresh token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshCookieConfig {
    /// Cookie name
    pub name: String,

    /// Cookie path
    pub path: String,

    /// HTTPS only
    pub secure: bool,

    /// Hidden from scripts
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// SameSite attribute ("Strict", "Lax" or "None")
    pub same_site: String,
}

impl Default for RefreshCookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            path: String::from("/"),
            secure: false,  // Set to true in production
            http_only: default_http_only(),
            same_site: String::from("Strict"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Verification token configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub cookie: RefreshCookieConfig,

    /// bcrypt cost used when storing reset passwords
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            verification: VerificationConfig::default(),
            cookie: RefreshCookieConfig::default(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl AuthConfig {
    /// Defaults for an environment; production forces secure cookies
    pub fn for_environment(env: Environment) -> Self {
        let mut config = Self::default();
        config.cookie.secure = env.is_production();
        config
    }

    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);

        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret),
                access_token_expiry: expiry_or(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    defaults.jwt.access_token_expiry,
                ),
                refresh_token_expiry: expiry_or(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    defaults.jwt.refresh_token_expiry,
                ),
            },
            verification: VerificationConfig {
                token_expiry: expiry_or(
                    "VERIFICATION_TOKEN_EXPIRY",
                    defaults.verification.token_expiry,
                ),
                ..defaults.verification
            },
            cookie: defaults.cookie,
            password_hash_cost: env_or("PASSWORD_HASH_COST", defaults.password_hash_cost),
        }
    }
}

/// Lifetime in seconds from the environment, capped at `MAX_EXPIRY_SECONDS`
fn expiry_or(key: &str, default: u64) -> u64 {
    env_or(key, default).min(MAX_EXPIRY_SECONDS)
}

fn default_http_only() -> bool {
    true
}

fn default_password_hash_cost() -> u32 {
    12
}
