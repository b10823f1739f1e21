// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Abstract key-existence lookup against a backing store.
//!
//! Production jobs back this with an object-store client; the storage backend
//! itself is outside this core. The lookup call is the only point in the hot
//! path that may block on external I/O, and it is non-retrying at this layer:
//! retry is the host execution engine's policy.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::LookupError;

/// Capability: answer whether a storage key is present.
#[async_trait]
pub trait ExistenceLookup: Send + Sync {
    /// Check whether `path` exists in the backing store.
    ///
    /// Backing-store failures (network, permission) propagate as
    /// [`LookupError`]; the caller decides whether that fails the element or
    /// the job.
    async fn exists(&self, path: &str) -> Result<bool, LookupError>;
}

/// In-memory lookup over a set of known paths.
///
/// Stands in for a real object-store client in tests and local dry runs.
#[derive(Debug, Default)]
pub struct MemoryLookup {
    paths: Mutex<HashSet<String>>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as existing.
    pub fn insert(&self, path: impl Into<String>) {
        self.paths.lock().unwrap().insert(path.into());
    }

    pub fn remove(&self, path: &str) {
        self.paths.lock().unwrap().remove(path);
    }
}

#[async_trait]
impl ExistenceLookup for MemoryLookup {
    async fn exists(&self, path: &str) -> Result<bool, LookupError> {
        Ok(self.paths.lock().unwrap().contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_lookup_tracks_inserted_paths() {
        let lookup = MemoryLookup::new();
        lookup.insert("gs://bucket/in/a.ogg");

        assert!(lookup.exists("gs://bucket/in/a.ogg").await.unwrap());
        assert!(!lookup.exists("gs://bucket/in/b.ogg").await.unwrap());

        lookup.remove("gs://bucket/in/a.ogg");
        assert!(!lookup.exists("gs://bucket/in/a.ogg").await.unwrap());
    }
}
