// ============================
// sessiongate-backend-lib/src/lib.rs
// ============================
//! Username/password authentication with cookie sessions and double-submit
//! CSRF protection.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod storage;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{AccountStore, MemoryAccountStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state over the given account store
    pub fn new<S: AccountStore>(store: S, settings: Settings) -> Result<Self, AppError> {
        let auth = Arc::new(DefaultAuth::from_settings(store, &settings)?);
        Ok(Self {
            auth,
            settings: Arc::new(settings),
        })
    }

    /// Create application state over a fresh in-memory store
    pub fn in_memory(settings: Settings) -> Result<Self, AppError> {
        Self::new(MemoryAccountStore::new(), settings)
    }
}
