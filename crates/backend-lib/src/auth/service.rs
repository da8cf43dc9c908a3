// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `AuthService` trait the HTTP layer talks to.
use async_trait::async_trait;
use zeroize::Zeroizing;

use super::SessionTokens;
use crate::error::AppError;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. The plaintext is wiped once it has been hashed.
    async fn register(&self, username: &str, password: Zeroizing<String>) -> Result<(), AppError>;

    /// Verify credentials and issue a fresh token pair, replacing any
    /// session the account already had.
    async fn login(
        &self,
        username: &str,
        password: Zeroizing<String>,
    ) -> Result<SessionTokens, AppError>;

    /// Read-only double-submit check
    fn authorize(&self, username: &str, session_token: &str, csrf_token: &str)
        -> Result<(), AppError>;

    /// Clear the token pair; only the current session may do so
    fn logout(&self, username: &str, session_token: &str, csrf_token: &str)
        -> Result<(), AppError>;

    /// Shape check of a credential pair without touching any account
    fn check_credentials(&self, username: &str, password: &str) -> Result<(), AppError>;
}
