//! Persisted bearer tokens for the customer and admin sessions.

use crate::error::StorageError;
use crate::storage::KeyValueStore;

const CUSTOMER_TOKEN_KEY: &str = "techmart.customer_token";
const ADMIN_TOKEN_KEY: &str = "techmart.admin_token";

pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be read.
    pub fn customer_token(&self) -> Result<Option<String>, StorageError> {
        self.read(CUSTOMER_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be written.
    pub fn set_customer_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(CUSTOMER_TOKEN_KEY, token)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the stored token cannot be removed.
    pub fn clear_customer_token(&self) -> Result<(), StorageError> {
        self.storage.remove(CUSTOMER_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be read.
    pub fn admin_token(&self) -> Result<Option<String>, StorageError> {
        self.read(ADMIN_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the token cannot be written.
    pub fn set_admin_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(ADMIN_TOKEN_KEY, token)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the stored token cannot be removed.
    pub fn clear_admin_token(&self) -> Result<(), StorageError> {
        self.storage.remove(ADMIN_TOKEN_KEY)
    }

    /// Blank stored values count as signed out.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(key)?
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()))
    }
}
