// ============================
// sessiongate-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

pub use password::{
    validate_credentials, CredentialHasher, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};
pub use session::{tokens_match, SessionTokens};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token_generator::{generate_token, TokenGenerator, DEFAULT_TOKEN_BYTES, MIN_TOKEN_BYTES};
