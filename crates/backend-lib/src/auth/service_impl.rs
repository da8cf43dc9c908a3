//! Default `AuthService` over any `AccountStore`.
use async_trait::async_trait;
use metrics::counter;
use tracing::{info, instrument, warn};
use zeroize::Zeroizing;

use super::{
    password::{require_present, validate_credentials, CredentialHasher},
    session::tokens_match,
    token_generator::TokenGenerator,
    AuthService, SessionTokens,
};
use crate::config::Settings;
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{Account, AccountStore};

/// Plaintext behind the decoy hash checked for unknown usernames
const DECOY_PASSWORD: &str = "sessiongate-decoy-password";

pub struct DefaultAuth<S> {
    store: S,
    hasher: CredentialHasher,
    tokens: TokenGenerator,
    /// Verified against when the username is unknown, so that path costs
    /// as much as a wrong password
    decoy_hash: String,
}

impl<S: AccountStore> DefaultAuth<S> {
    pub fn new(store: S, hasher: CredentialHasher, tokens: TokenGenerator) -> Result<Self, AppError> {
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            store,
            hasher,
            tokens,
            decoy_hash,
        })
    }

    /// Build from settings, running the same checks as `Settings::validate`
    pub fn from_settings(store: S, settings: &Settings) -> Result<Self, AppError> {
        settings.validate()?;
        let hasher = CredentialHasher::from_settings(&settings.hashing)?;
        let tokens = TokenGenerator::new(settings.auth.token_bytes)?;
        Self::new(store, hasher, tokens)
    }

    /// Run CPU-heavy hasher work on the blocking pool
    async fn with_hasher<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(CredentialHasher) -> T + Send + 'static,
        T: Send + 'static,
    {
        let hasher = self.hasher.clone();
        Ok(tokio::task::spawn_blocking(move || f(hasher)).await?)
    }
}

#[async_trait]
impl<S: AccountStore> AuthService for DefaultAuth<S> {
    #[instrument(skip(self, password))]
    async fn register(&self, username: &str, password: Zeroizing<String>) -> Result<(), AppError> {
        validate_credentials(username, &password)?;

        if self.store.exists(username) {
            warn!("registration rejected: username taken");
            return Err(AppError::Conflict("username taken".to_string()));
        }

        let hashed_password = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await??;

        // A concurrent registration may have claimed the name while hashing
        if !self.store.insert_new(username, Account::new(hashed_password)) {
            warn!("registration rejected: username taken");
            return Err(AppError::Conflict("username taken".to_string()));
        }

        counter!(keys::ACCOUNT_REGISTERED).increment(1);
        info!("account registered");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn login(
        &self,
        username: &str,
        password: Zeroizing<String>,
    ) -> Result<SessionTokens, AppError> {
        let stored_hash = self
            .store
            .get(username)
            .map(|account| account.hashed_password().to_owned());
        let known = stored_hash.is_some();
        let hash = stored_hash.unwrap_or_else(|| self.decoy_hash.clone());

        let verified = self
            .with_hasher(move |hasher| hasher.verify(&password, &hash))
            .await?;

        if !(known && verified) {
            counter!(keys::LOGIN_FAILED).increment(1);
            warn!("login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let tokens = SessionTokens::new(self.tokens.generate()?, self.tokens.generate()?);
        let issued = tokens.clone();
        self.store
            .update(username, move |account| account.start_session(issued))
            .ok_or(AppError::InvalidCredentials)?;

        counter!(keys::LOGIN_SUCCEEDED).increment(1);
        info!("session started");
        Ok(tokens)
    }

    #[instrument(skip(self, session_token, csrf_token))]
    fn authorize(
        &self,
        username: &str,
        session_token: &str,
        csrf_token: &str,
    ) -> Result<(), AppError> {
        let authorized = self
            .store
            .get(username)
            .is_some_and(|account| tokens_match(&account, session_token, csrf_token));

        if !authorized {
            counter!(keys::AUTHORIZE_DENIED).increment(1);
            warn!("authorization denied");
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    #[instrument(skip(self, session_token, csrf_token))]
    fn logout(
        &self,
        username: &str,
        session_token: &str,
        csrf_token: &str,
    ) -> Result<(), AppError> {
        // Check and clear under one lock so a newer login is never wiped
        let cleared = self
            .store
            .update(username, |account| {
                let current = tokens_match(account, session_token, csrf_token);
                if current {
                    account.end_session();
                }
                current
            })
            .unwrap_or(false);

        if !cleared {
            counter!(keys::AUTHORIZE_DENIED).increment(1);
            warn!("logout denied");
            return Err(AppError::Unauthorized);
        }

        counter!(keys::LOGOUT).increment(1);
        info!("session ended");
        Ok(())
    }

    fn check_credentials(&self, username: &str, password: &str) -> Result<(), AppError> {
        require_present(username, password)?;
        validate_credentials(username, password)
    }
}
