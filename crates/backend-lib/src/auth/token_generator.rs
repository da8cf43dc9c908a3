// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
/** Secure token generation for authentication
This module provides cryptographically secure token generation
for session tokens and CSRF tokens. */
use rand::{rngs::OsRng, TryRngCore};

use crate::error::AppError;

/// Default token size in bytes (32 bytes = 256 bits of entropy)
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Smallest token size accepted anywhere
pub const MIN_TOKEN_BYTES: usize = 16;

/** Generate a cryptographically secure random token with specified size
Every byte comes straight from the OS entropy source; nothing is derived
from a previous token.
# Arguments
* `bytes` - The size of the random token in bytes
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_token(bytes: usize) -> Result<String, AppError> {
    if bytes < MIN_TOKEN_BYTES {
        return Err(AppError::TokenGeneration(format!(
            "token size {bytes} is below the minimum of {MIN_TOKEN_BYTES} bytes"
        )));
    }
    let mut buffer = vec![0u8; bytes];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| AppError::TokenGeneration(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(buffer))
}

/// Issues opaque tokens of a fixed size
#[derive(Debug, Clone, Copy)]
pub struct TokenGenerator {
    bytes: usize,
}

impl TokenGenerator {
    /// Fails for sizes under `MIN_TOKEN_BYTES`
    pub fn new(bytes: usize) -> Result<Self, AppError> {
        if bytes < MIN_TOKEN_BYTES {
            return Err(AppError::Config(format!(
                "auth.token_bytes must be at least {MIN_TOKEN_BYTES}"
            )));
        }
        Ok(Self { bytes })
    }

    pub fn generate(&self) -> Result<String, AppError> {
        generate_token(self.bytes)
    }
}
