use std::sync::Arc;

use serde_json::Value;

use crate::pack::{LanguageCode, PackIdentity};

/// Namespace holding every record this crate writes.
pub const NAMESPACE: &str = "languagePacks";

/// Key of the resolved download base URL.
pub const BASE_URL_KEY: &str = "baseUrl";

/// Errors that can occur when reading or writing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("language pack base URL not found; resolve a mirror first")]
    BaseUrlMissing,

    #[error("state store error: {0}")]
    Storage(String),
}

/// A persistent namespaced key-value registry.
///
/// Writes are last-write-wins. Implementations on shared storage should
/// serialize writes to the same key.
pub trait StateStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StateError>;

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StateError>;
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StateError> {
        (**self).get(namespace, key)
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StateError> {
        (**self).set(namespace, key, value)
    }
}

/// Typed access to the language pack records of a [`StateStore`].
///
/// Two timestamp shapes are kept apart: `{language}` marks a whole-language
/// update, `{language}-{module}` marks the last failed attempt of one pack.
pub trait PackState {
    fn base_url(&self) -> Result<Option<String>, StateError>;

    fn set_base_url(&self, url: &str) -> Result<(), StateError>;

    fn language_updated_at(&self, language: &LanguageCode) -> Result<Option<i64>, StateError>;

    fn mark_language_updated(&self, language: &LanguageCode, at: i64) -> Result<(), StateError>;

    fn pack_updated_at(&self, identity: &PackIdentity) -> Result<Option<i64>, StateError>;

    fn record_pack_attempt(&self, identity: &PackIdentity, at: i64) -> Result<(), StateError>;
}

impl<T: StateStore + ?Sized> PackState for T {
    fn base_url(&self) -> Result<Option<String>, StateError> {
        Ok(self
            .get(NAMESPACE, BASE_URL_KEY)?
            .and_then(|value| value.as_str().map(str::to_owned))
            .filter(|url| !url.is_empty()))
    }

    fn set_base_url(&self, url: &str) -> Result<(), StateError> {
        self.set(NAMESPACE, BASE_URL_KEY, Value::from(url))
    }

    fn language_updated_at(&self, language: &LanguageCode) -> Result<Option<i64>, StateError> {
        timestamp(self, language.as_str())
    }

    fn mark_language_updated(&self, language: &LanguageCode, at: i64) -> Result<(), StateError> {
        self.set(NAMESPACE, language.as_str(), Value::from(at))
    }

    fn pack_updated_at(&self, identity: &PackIdentity) -> Result<Option<i64>, StateError> {
        timestamp(self, &identity.record_key())
    }

    fn record_pack_attempt(&self, identity: &PackIdentity, at: i64) -> Result<(), StateError> {
        self.set(NAMESPACE, &identity.record_key(), Value::from(at))
    }
}

fn timestamp<T: StateStore + ?Sized>(store: &T, key: &str) -> Result<Option<i64>, StateError> {
    Ok(store.get(NAMESPACE, key)?.and_then(|value| value.as_i64()))
}

/// Current time as Unix epoch seconds.
pub fn now_epoch_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

/// Whole days elapsed since `timestamp`.
pub fn days_since(timestamp: i64) -> u64 {
    (now_epoch_secs().saturating_sub(timestamp).max(0) as u64) / 86400
}
