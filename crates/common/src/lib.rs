// ================
// common/src/lib.rs
// ================
//! Request and response bodies exchanged between a `sessiongate` client and
//! the server. Requests arrive as `application/x-www-form-urlencoded` forms,
//! responses leave as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Name of the HTTP-only cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_token";

/// Name of the script-readable cookie carrying the CSRF token
pub const CSRF_COOKIE: &str = "csrf_token";

/// Header a client must echo the CSRF token back in
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Form body of `/register`, `/login` and `/signup`.
///
/// Missing fields decode as empty strings so they are rejected by the
/// credential rules instead of by the form decoder.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    /// Wiped from memory when the form is dropped
    #[serde(default)]
    pub password: Zeroizing<String>,
}

impl CredentialsForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Form body of `/protected` and `/logout`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UsernameForm {
    #[serde(default)]
    pub username: String,
}

/// Successful response body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response body: `{"error": {"code": ..., "message": ...}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `AUTH_001`
    pub code: String,
    pub message: String,
}
