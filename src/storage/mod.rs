//! Durable key-value persistence.
//!
//! The store persists each state table as a JSON document under its own
//! reserved key. The `Storage` trait is the seam between the game state
//! store and whatever holds the bytes - a directory of files in the app,
//! an in-memory map in tests.
//!
//! Every stored document is wrapped in a `Versioned` envelope so a future
//! format change can migrate old data instead of silently discarding it.
//! A document whose version is unknown is treated the same as one that
//! fails to parse: the reader substitutes defaults.

pub mod file;
pub mod keys;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Current schema version written into every persisted document.
pub const SCHEMA_VERSION: u32 = 1;

/// Persistence failure.
///
/// These never propagate past the game state store; they exist so the
/// storage layer itself can use `?` internally and so tests can exercise
/// the fallback policy.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String-keyed durable storage.
///
/// Values are opaque strings; the store layers JSON on top. Reads of a
/// missing key return `Ok(None)` rather than an error.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is ok.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Schema envelope wrapped around every persisted table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u32,
    pub data: T,
}

impl<T> Versioned<T> {
    /// Wrap a value with the current schema version.
    pub fn current(data: T) -> Self {
        Self {
            version: SCHEMA_VERSION,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_envelope_shape() {
        let doc = Versioned::current(vec![40, 40, 40, 40]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, "{\"version\":1,\"data\":[40,40,40,40]}");

        let parsed: Versioned<Vec<i64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_versioned_by_reference() {
        let data = vec![1, 2];
        let doc = Versioned::current(&data);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            "{\"version\":1,\"data\":[1,2]}"
        );
    }
}
