// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ACCOUNT_REGISTERED: &str = "auth.account.registered";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const AUTHORIZE_DENIED: &str = "auth.authorize.denied";
pub const LOGOUT: &str = "auth.logout";
