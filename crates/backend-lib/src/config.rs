// ============================
// sessiongate-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::path::Path;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::{DEFAULT_TOKEN_BYTES, MIN_TOKEN_BYTES};
use crate::error::AppError;

#[cfg(test)]
mod config_tests;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "sessiongate.toml";

/// Prefix of environment overrides, e.g. `SESSIONGATE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "SESSIONGATE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub hashing: HashingSettings,
    pub log: LogSettings,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Session and cookie settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Random bytes behind each session and CSRF token
    pub token_bytes: usize,
    /// Lifetime of the session and CSRF cookies
    pub cookie_ttl_secs: u64,
    /// Mark cookies `Secure` (HTTPS only)
    pub secure_cookies: bool,
}

/// Password hashing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Scrypt,
    Argon2,
}

/// Cost parameters for the password hasher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingSettings {
    pub algorithm: HashAlgorithm,
    pub scrypt_log_n: u8,
    pub scrypt_r: u32,
    pub scrypt_p: u32,
    /// Memory cost in KiB
    pub argon2_m_cost: u32,
    pub argon2_t_cost: u32,
    pub argon2_p_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_bytes: DEFAULT_TOKEN_BYTES,
            cookie_ttl_secs: 24 * 60 * 60,
            secure_cookies: false,
        }
    }
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Scrypt,
            scrypt_log_n: 17,
            scrypt_r: 8,
            scrypt_p: 1,
            argon2_m_cost: 19 * 1024,
            argon2_t_cost: 2,
            argon2_p_cost: 1,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from defaults, `sessiongate.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::figment(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load settings from an explicit file; the file must exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("config file {} does not exist", path.display());
        }
        Self::figment(path)
    }

    fn figment(path: &Path) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::Config("server.host must not be empty".to_string()));
        }
        if self.auth.token_bytes < MIN_TOKEN_BYTES {
            return Err(AppError::Config(
                format!("auth.token_bytes must be at least {MIN_TOKEN_BYTES}"),
            ));
        }
        if self.auth.cookie_ttl_secs == 0 {
            return Err(AppError::Config(
                "auth.cookie_ttl_secs must be positive".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "log.level must be one of {LOG_LEVELS:?}, got {:?}",
                self.log.level
            )));
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
