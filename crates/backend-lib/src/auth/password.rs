// ============================
// sessiongate-backend-lib/src/auth/password.rs
// ============================
//! Password hashing, verification and credential shape rules.
use argon2::Argon2;
use scrypt::{
    password_hash::{
        rand_core::{OsRng, RngCore},
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Scrypt,
};

use crate::config::{HashAlgorithm, HashingSettings};
use crate::error::AppError;

/// Minimum username length in bytes
pub const MIN_USERNAME_LENGTH: usize = 4;

/// Minimum password length in bytes
pub const MIN_PASSWORD_LENGTH: usize = 8;

const SALT_BYTES: usize = 16;
const HASH_OUTPUT_LEN: usize = 32;

#[derive(Debug, Clone)]
enum Algorithm {
    Scrypt(scrypt::Params),
    Argon2(argon2::Params),
}

/// Salted, slow, one-way password hasher producing PHC strings.
///
/// Hashing uses the configured algorithm; verification reads the algorithm and
/// cost from the stored hash, so hashes made under an earlier configuration
/// keep verifying.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    algorithm: Algorithm,
}

impl CredentialHasher {
    /// Build a hasher from the `[hashing]` settings, rejecting invalid costs
    pub fn from_settings(settings: &HashingSettings) -> Result<Self, AppError> {
        let algorithm = match settings.algorithm {
            HashAlgorithm::Scrypt => Algorithm::Scrypt(
                scrypt::Params::new(
                    settings.scrypt_log_n,
                    settings.scrypt_r,
                    settings.scrypt_p,
                    HASH_OUTPUT_LEN,
                )
                .map_err(|e| AppError::Config(format!("invalid scrypt parameters: {e}")))?,
            ),
            HashAlgorithm::Argon2 => Algorithm::Argon2(
                argon2::Params::new(
                    settings.argon2_m_cost,
                    settings.argon2_t_cost,
                    settings.argon2_p_cost,
                    Some(HASH_OUTPUT_LEN),
                )
                .map_err(|e| AppError::Config(format!("invalid argon2 parameters: {e}")))?,
            ),
        };
        Ok(Self { algorithm })
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| AppError::Hashing(format!("entropy source unavailable: {e}")))?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Hashing(e.to_string()))?;

        let hash = match &self.algorithm {
            Algorithm::Scrypt(params) => {
                Scrypt.hash_password_customized(plain.as_bytes(), None, None, params.clone(), &salt)
            },
            Algorithm::Argon2(params) => Argon2::new(
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                params.clone(),
            )
            .hash_password(plain.as_bytes(), &salt),
        }
        .map_err(|e| AppError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// Mismatch and an unparseable hash are both plain `false`.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        let argon2 = Argon2::default();
        let verifiers: [&dyn PasswordVerifier; 2] = [&argon2, &Scrypt];
        parsed_hash
            .verify_password(&verifiers, plain.as_bytes())
            .is_ok()
    }
}

/// Reject empty fields before any length rule is looked at
pub fn require_present(username: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::MissingFields);
    }
    Ok(())
}

/// Length rules for a new account, checked username first
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(AppError::Validation("username too short".to_string()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation("password too short".to_string()));
    }
    Ok(())
}
