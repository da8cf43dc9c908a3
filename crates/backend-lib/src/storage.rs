// ============================
// sessiongate-backend-lib/src/storage.rs
// ============================
//! Account storage abstraction with an in-memory implementation.
use std::{fmt, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::auth::SessionTokens;

/// Stored record for one registered username
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Account {
    hashed_password: String,
    /// Session and CSRF token are set and cleared as one value
    session: Option<SessionTokens>,
}

impl Account {
    /// New account with no active session
    pub fn new(hashed_password: String) -> Self {
        Self {
            hashed_password,
            session: None,
        }
    }

    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    pub fn session(&self) -> Option<&SessionTokens> {
        self.session.as_ref()
    }

    /// Empty when no session is active
    pub fn session_token(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.session_token.as_str())
    }

    /// Empty when no session is active
    pub fn csrf_token(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.csrf_token.as_str())
    }

    /// Install a fresh token pair. Any previous session is dropped, so the
    /// last login wins.
    pub fn start_session(&mut self, tokens: SessionTokens) {
        self.session = Some(tokens);
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("hashed_password", &"<redacted>")
            .field("session_active", &self.session.is_some())
            .finish()
    }
}

/// Storage for accounts keyed by username.
///
/// Implementations must make `insert_new` and `update` atomic per username
/// without serializing unrelated usernames against each other.
pub trait AccountStore: Send + Sync + 'static {
    /// Copy of the stored record
    fn get(&self, username: &str) -> Option<Account>;

    /// Full upsert
    fn put(&self, username: &str, account: Account);

    fn exists(&self, username: &str) -> bool;

    /// Insert only if the username is free. Returns whether it inserted.
    fn insert_new(&self, username: &str, account: Account) -> bool;

    /// Run `f` against the record while holding its lock. `None` if absent.
    fn update<T, F>(&self, username: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime store on a sharded concurrent map
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<DashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, username: &str) -> Option<Account> {
        self.accounts.get(username).map(|entry| entry.value().clone())
    }

    fn put(&self, username: &str, account: Account) {
        self.accounts.insert(username.to_owned(), account);
    }

    fn exists(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    fn insert_new(&self, username: &str, account: Account) -> bool {
        match self.accounts.entry(username.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(account);
                true
            },
        }
    }

    fn update<T, F>(&self, username: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T,
    {
        self.accounts
            .get_mut(username)
            .map(|mut entry| f(entry.value_mut()))
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}
