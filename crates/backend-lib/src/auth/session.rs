// ============================
// sessiongate-backend-lib/src/auth/session.rs
// ============================
//! Session token pair and the double-submit check run on every guarded request.
//!
//! The browser attaches the session cookie to any request, including a forged
//! cross-site one, but only script running on the site can read the CSRF cookie
//! and copy it into the `X-CSRF-Token` header. A request is accepted only when
//! both values equal the pair stored on the account.
use std::fmt;

use crate::storage::Account;

/// Session and CSRF token issued together by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub session_token: String,
    pub csrf_token: String,
}

impl SessionTokens {
    pub fn new(session_token: String, csrf_token: String) -> Self {
        Self {
            session_token,
            csrf_token,
        }
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokens(<redacted>)")
    }
}

/// True only if the account has an active session and both presented values
/// match it. Empty values never match.
pub fn tokens_match(account: &Account, session_token: &str, csrf_token: &str) -> bool {
    let Some(active) = account.session() else {
        return false;
    };
    if session_token.is_empty() || csrf_token.is_empty() {
        return false;
    }

    // Evaluate both so timing does not reveal which one failed
    let session_ok = constant_time_eq(session_token.as_bytes(), active.session_token.as_bytes());
    let csrf_ok = constant_time_eq(csrf_token.as_bytes(), active.csrf_token.as_bytes());
    session_ok & csrf_ok
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Account {
        let mut account = Account::new("$scrypt$fake".to_string());
        account.start_session(SessionTokens::new("T1".to_string(), "T2".to_string()));
        account
    }

    #[test]
    fn test_matching_pair_is_accepted() {
        assert!(tokens_match(&logged_in(), "T1", "T2"));
    }

    #[test]
    fn test_any_wrong_value_is_rejected() {
        let account = logged_in();
        assert!(!tokens_match(&account, "T1", "wrong"));
        assert!(!tokens_match(&account, "wrong", "T2"));
        assert!(!tokens_match(&account, "", "T2"));
        assert!(!tokens_match(&account, "T1", ""));
        // Swapped values
        assert!(!tokens_match(&account, "T2", "T1"));
    }

    #[test]
    fn test_no_active_session_never_matches() {
        let account = Account::new("$scrypt$fake".to_string());
        assert!(!tokens_match(&account, "", ""));
        assert!(!tokens_match(&account, "T1", "T2"));

        let mut ended = logged_in();
        ended.end_session();
        assert!(!tokens_match(&ended, "T1", "T2"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let tokens = SessionTokens::new("secret-session".to_string(), "secret-csrf".to_string());
        let printed = format!("{tokens:?}");
        assert!(!printed.contains("secret"));
    }
}
