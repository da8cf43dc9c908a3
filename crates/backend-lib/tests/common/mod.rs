//! Shared setup for the integration tests
#![allow(dead_code)]

use std::sync::Arc;

use backend_lib::{
    auth::DefaultAuth,
    config::{HashAlgorithm, Settings},
    storage::MemoryAccountStore,
    AppState,
};

/// Default settings with hashing costs low enough for debug builds
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.hashing.algorithm = HashAlgorithm::Scrypt;
    settings.hashing.scrypt_log_n = 10;
    settings.hashing.argon2_m_cost = 1024;
    settings.hashing.argon2_t_cost = 1;
    settings
}

/// Service over a fresh store, with the store handed back for inspection
pub fn test_auth() -> (Arc<DefaultAuth<MemoryAccountStore>>, MemoryAccountStore) {
    let store = MemoryAccountStore::new();
    let auth = DefaultAuth::from_settings(store.clone(), &test_settings())
        .expect("Failed to build auth service for test");
    (Arc::new(auth), store)
}

pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::in_memory(test_settings()).expect("Failed to create AppState for test"))
}
