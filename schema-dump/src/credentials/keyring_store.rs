use keyring::Entry;
use super::SecretStore;
use crate::{Result, SchemaDumpError};

/// Stores secrets in the credential store of the operating system.
///
/// The key is used as keyring service and the scope as keyring user.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
    fn entry(key: &str, scope: &str, action: &'static str) -> Result<Entry> {
        Entry::new(key, scope).map_err(|source| SchemaDumpError::SecretStoreError {
            action,
            key: key.to_string(),
            source,
        })
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, key: &str, scope: &str) -> Result<Option<String>> {
        match Self::entry(key, scope, "read")?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(source) => Err(SchemaDumpError::SecretStoreError {
                action: "read",
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, scope: &str, secret: &str) -> Result {
        Self::entry(key, scope, "store")?
            .set_password(secret)
            .map_err(|source| SchemaDumpError::SecretStoreError {
                action: "store",
                key: key.to_string(),
                source,
            })
    }
}
