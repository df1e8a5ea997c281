use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use langpack::{StateError, StateStore};
use rusqlite::OptionalExtension;
use serde_json::Value;
use tracing::debug;

use crate::schema;

/// A SQLite-backed namespaced key-value registry that implements
/// `StateStore`. Values are stored as JSON text.
pub struct Registry {
    conn: Mutex<rusqlite::Connection>,
}

impl Registry {
    /// Open a registry backed by a file on disk, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Database(e.to_string()))?;
        }

        let conn =
            rusqlite::Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        debug!(path = %path.display(), "opened registry");
        Self::from_connection(conn)
    }

    /// Open an in-memory registry (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: rusqlite::Connection) -> Result<Self, StoreError> {
        schema::migrations()
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, rusqlite::Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Database(format!("registry lock poisoned: {e}")))
    }

    /// Read one value.
    pub fn value(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value_json FROM registry WHERE namespace = ?1 AND key = ?2",
                [namespace, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        raw.map(|json| serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(e.to_string())))
            .transpose()
    }

    /// Insert or replace one value.
    pub fn set_value(&self, namespace: &str, key: &str, value: &Value) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO registry (namespace, key, value_json) VALUES (?1, ?2, ?3)",
            rusqlite::params![namespace, key, json],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete one value. Returns whether anything was removed.
    pub fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let removed = conn
            .execute(
                "DELETE FROM registry WHERE namespace = ?1 AND key = ?2",
                [namespace, key],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(removed > 0)
    }

    /// Every key and value in `namespace`, ordered by key.
    pub fn entries(&self, namespace: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key, value_json FROM registry WHERE namespace = ?1 ORDER BY key")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([namespace], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, json) = row.map_err(|e| StoreError::Database(e.to_string()))?;
            let value = serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            entries.push((key, value));
        }
        Ok(entries)
    }
}

impl StateStore for Registry {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StateError> {
        Ok(self.value(namespace, key)?)
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StateError> {
        Ok(self.set_value(namespace, key, &value)?)
    }
}

/// Errors from the registry's database layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("stored value is not valid JSON: {0}")]
    Corrupt(String),
}

impl From<StoreError> for StateError {
    fn from(e: StoreError) -> Self {
        StateError::Storage(e.to_string())
    }
}
