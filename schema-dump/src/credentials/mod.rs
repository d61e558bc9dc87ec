use std::future::Future;
use tracing::{debug, info, instrument};
use crate::Result;

mod http_issuer;
mod keyring_store;

pub use http_issuer::*;
pub use keyring_store::*;

/// Secret store key of the cached api key.
pub const API_KEY_SECRET: &str = "apiKey";
/// Secret store key of the cached bearer token.
pub const TOKEN_SECRET: &str = "token";

/// A local store of secrets, addressed by key and scope.
pub trait SecretStore {
    /// Returns `None` when nothing is stored under `key` in `scope`.
    fn get(&self, key: &str, scope: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, scope: &str, secret: &str) -> Result;
}

/// The remote services handing out tokens and api keys.
pub trait CredentialIssuer {
    fn fetch_token(&self) -> impl Future<Output = Result<String>> + Send;

    fn fetch_api_key(&self, token: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Resolves the api key for the completion service, caching what it fetches.
///
/// Lookup goes api key, then token, then the remote issuer. Every value fetched
/// from the issuer is written to the store before it is used.
pub struct CredentialCache<S, I> {
    store: S,
    issuer: I,
    scope: String,
}

impl<S: SecretStore, I: CredentialIssuer> CredentialCache<S, I> {
    /// Creates a cache scoped to the current operating system name.
    pub fn new(store: S, issuer: I) -> Self {
        Self::with_scope(store, issuer, std::env::consts::OS)
    }

    pub fn with_scope(store: S, issuer: I, scope: &str) -> Self {
        Self {
            store,
            issuer,
            scope: scope.to_string(),
        }
    }

    #[instrument(skip_all)]
    pub async fn get_api_key(&self) -> Result<String> {
        if let Some(api_key) = self.store.get(API_KEY_SECRET, &self.scope)? {
            debug!("Using cached api key");
            return Ok(api_key);
        }

        let token = match self.store.get(TOKEN_SECRET, &self.scope)? {
            Some(token) => {
                debug!("Using cached token");
                token
            }
            None => {
                info!("No cached token, requesting a new one");
                let token = self.issuer.fetch_token().await?;
                self.store.set(TOKEN_SECRET, &self.scope, &token)?;
                token
            }
        };

        info!("Requesting a new api key");
        let api_key = self.issuer.fetch_api_key(&token).await?;
        self.store.set(API_KEY_SECRET, &self.scope, &api_key)?;

        Ok(api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::test;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Get(&'static str),
        Set(&'static str, String),
        FetchToken,
        FetchApiKey(String),
    }

    type EventLog = Arc<Mutex<Vec<Event>>>;

    fn static_key(key: &str) -> &'static str {
        match key {
            API_KEY_SECRET => API_KEY_SECRET,
            TOKEN_SECRET => TOKEN_SECRET,
            other => panic!("Unexpected secret key {other}"),
        }
    }

    struct RecordingStore {
        secrets: Mutex<HashMap<(String, String), String>>,
        events: EventLog,
    }

    impl SecretStore for RecordingStore {
        fn get(&self, key: &str, scope: &str) -> Result<Option<String>> {
            self.events.lock().unwrap().push(Event::Get(static_key(key)));
            Ok(self.secrets.lock().unwrap().get(&(key.to_string(), scope.to_string())).cloned())
        }

        fn set(&self, key: &str, scope: &str, secret: &str) -> Result {
            self.events.lock().unwrap().push(Event::Set(static_key(key), secret.to_string()));
            self.secrets.lock().unwrap().insert((key.to_string(), scope.to_string()), secret.to_string());
            Ok(())
        }
    }

    struct RecordingIssuer {
        events: EventLog,
    }

    impl CredentialIssuer for RecordingIssuer {
        async fn fetch_token(&self) -> Result<String> {
            self.events.lock().unwrap().push(Event::FetchToken);
            Ok("fresh-token".to_string())
        }

        async fn fetch_api_key(&self, token: &str) -> Result<String> {
            self.events.lock().unwrap().push(Event::FetchApiKey(token.to_string()));
            Ok(format!("key-for-{token}"))
        }
    }

    fn cache_with(secrets: &[(&str, &str)]) -> (CredentialCache<RecordingStore, RecordingIssuer>, EventLog) {
        let events = EventLog::default();
        let secrets = secrets
            .iter()
            .map(|(k, v)| ((k.to_string(), "linux".to_string()), v.to_string()))
            .collect();

        let cache = CredentialCache::with_scope(
            RecordingStore {
                secrets: Mutex::new(secrets),
                events: events.clone(),
            },
            RecordingIssuer {
                events: events.clone(),
            },
            "linux",
        );

        (cache, events)
    }

    #[test]
    async fn empty_cache_fetches_and_stores_in_order() {
        let (cache, events) = cache_with(&[]);

        let api_key = cache.get_api_key().await.unwrap();

        assert_eq!(api_key, "key-for-fresh-token");
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Event::Get(API_KEY_SECRET),
                Event::Get(TOKEN_SECRET),
                Event::FetchToken,
                Event::Set(TOKEN_SECRET, "fresh-token".to_string()),
                Event::FetchApiKey("fresh-token".to_string()),
                Event::Set(API_KEY_SECRET, "key-for-fresh-token".to_string()),
            ]
        );
    }

    #[test]
    async fn cached_token_skips_token_fetch() {
        let (cache, events) = cache_with(&[(TOKEN_SECRET, "old-token")]);

        let api_key = cache.get_api_key().await.unwrap();

        assert_eq!(api_key, "key-for-old-token");
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Event::Get(API_KEY_SECRET),
                Event::Get(TOKEN_SECRET),
                Event::FetchApiKey("old-token".to_string()),
                Event::Set(API_KEY_SECRET, "key-for-old-token".to_string()),
            ]
        );
    }

    #[test]
    async fn cached_api_key_makes_no_remote_calls() {
        let (cache, events) = cache_with(&[(API_KEY_SECRET, "cached-key")]);

        let api_key = cache.get_api_key().await.unwrap();

        assert_eq!(api_key, "cached-key");
        assert_eq!(*events.lock().unwrap(), vec![Event::Get(API_KEY_SECRET)]);
    }

    #[test]
    async fn second_lookup_is_served_from_cache() {
        let (cache, events) = cache_with(&[]);

        let first = cache.get_api_key().await.unwrap();
        events.lock().unwrap().clear();
        let second = cache.get_api_key().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(*events.lock().unwrap(), vec![Event::Get(API_KEY_SECRET)]);
    }
}
