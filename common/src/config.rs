//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BANK_JWT_SECRET`: shared token secret. Every service must be
//!   provisioned with the identical value, or cross-service verification
//!   fails every request with an invalid-token error. Defaults to a
//!   development-only value with a logged warning.
//! - `BANK_LISTEN_PORT`: port to listen on (per-service default).
//!
//! # Invariants
//!
//! - `jwt_secret` is never empty.
//! - `listen_port` is always a valid port number.

/// Environment variable holding the shared token secret.
pub const JWT_SECRET_ENV: &str = "BANK_JWT_SECRET";
/// Environment variable holding the listen port.
pub const LISTEN_PORT_ENV: &str = "BANK_LISTEN_PORT";
/// Development-only fallback secret, matching the original services.
pub const DEFAULT_JWT_SECRET: &str = "changeme-in-production";

/// Configuration for one service process.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Symmetric secret shared by all services for token signing and
    /// verification.
    pub jwt_secret: String,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `default_port` is the service's port when `BANK_LISTEN_PORT` is
    /// not set (8001 auth, 8002 accounts, 8003 transactions).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `BANK_JWT_SECRET` is set but empty
    /// - `BANK_LISTEN_PORT` is set but not a valid port number
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        let jwt_secret = Self::load_jwt_secret()?;
        let listen_port = Self::load_listen_port(default_port)?;

        Ok(Self {
            jwt_secret,
            listen_port,
        })
    }

    /// Load the shared secret, falling back to the development default.
    fn load_jwt_secret() -> Result<String, ConfigError> {
        match std::env::var(JWT_SECRET_ENV) {
            Ok(value) => validate_secret(&value),
            Err(_) => {
                tracing::warn!(
                    "{JWT_SECRET_ENV} not set, using the development default secret"
                );
                Ok(DEFAULT_JWT_SECRET.to_string())
            }
        }
    }

    /// Load the listen port, falling back to the service default.
    fn load_listen_port(default_port: u16) -> Result<u16, ConfigError> {
        match std::env::var(LISTEN_PORT_ENV) {
            Ok(value) => parse_port(&value),
            Err(_) => Ok(default_port),
        }
    }
}

/// Validate a configured secret value.
fn validate_secret(value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: JWT_SECRET_ENV.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

/// Parse a configured listen port value.
fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
        name: LISTEN_PORT_ENV.to_string(),
        message: format!("'{value}' is not a valid port number (must be 1-65535)"),
    })
}
