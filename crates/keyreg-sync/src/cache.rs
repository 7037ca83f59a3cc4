//! # Local Accepted-Set Cache
//!
//! The only writable state this subsystem owns: the set of identifiers
//! currently believed accepted by the remote store. It exists to avoid
//! redundant remote queries and as an audit trail — correctness never
//! depends on it, because every mutating call is gated by a fresh
//! membership check.
//!
//! The cache used to be process-wide static state in an earlier design;
//! here it is an explicit value owned by the reconciler and moved through
//! an explicit [`CacheStore`] at process boundaries.
//!
//! ## Concurrency
//!
//! Only the reconciler mutates the set (the mutators are crate-private).
//! Readers outside the cycle get a copied [`snapshot`](AcceptedSet::snapshot),
//! never a shared reference to the underlying set.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use thiserror::Error;

use keyreg_core::KeyId;

/// Failure to load or persist the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem I/O failed.
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted payload is not a valid identifier list.
    #[error("cache payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable storage for the accepted set, keyed by identifier.
///
/// Presence is the signal; there is no per-identifier value. Invoked at
/// process boundaries only: `load` during registry initialization, `save`
/// when a cycle settles.
pub trait CacheStore: Send + Sync {
    /// Load the persisted identifier set; empty if none was saved yet.
    fn load(&self) -> Result<BTreeSet<KeyId>, CacheError>;

    /// Persist the identifier set.
    fn save(&self, set: &BTreeSet<KeyId>) -> Result<(), CacheError>;
}

/// File-backed [`CacheStore`]: one JSON array of canonical identifiers.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    /// Create a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store persists to.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Result<BTreeSet<KeyId>, CacheError> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }
        let payload = fs::read_to_string(&self.path)?;
        let ids: Vec<KeyId> = serde_json::from_str(&payload)?;
        Ok(ids.into_iter().collect())
    }

    fn save(&self, set: &BTreeSet<KeyId>) -> Result<(), CacheError> {
        let ids: Vec<&KeyId> = set.iter().collect();
        let payload = serde_json::to_string_pretty(&ids)?;
        // Write-then-rename so a crash mid-save never truncates the
        // previous cache.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory [`CacheStore`] for tests and persistence-free deployments.
///
/// Running without durable persistence is safe — the membership gate in
/// the reconciler re-derives correctness every cycle — just costlier in
/// remote queries after a restart.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    inner: RwLock<BTreeSet<KeyId>>,
}

impl MemoryCacheStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<BTreeSet<KeyId>, CacheError> {
        Ok(self.inner.read().clone())
    }

    fn save(&self, set: &BTreeSet<KeyId>) -> Result<(), CacheError> {
        *self.inner.write() = set.clone();
        Ok(())
    }
}

/// The in-process accepted-identifier set.
#[derive(Debug, Default)]
pub struct AcceptedSet {
    inner: RwLock<BTreeSet<KeyId>>,
}

impl AcceptedSet {
    /// Wrap an initial set, typically loaded from a [`CacheStore`].
    pub fn new(initial: BTreeSet<KeyId>) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Copied snapshot of the current set.
    pub fn snapshot(&self) -> BTreeSet<KeyId> {
        self.inner.read().clone()
    }

    /// Whether the identifier is currently tracked as accepted.
    pub fn contains(&self, id: &KeyId) -> bool {
        self.inner.read().contains(id)
    }

    /// Number of tracked identifiers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub(crate) fn insert(&self, id: KeyId) {
        self.inner.write().insert(id);
    }

    pub(crate) fn remove(&self, id: &KeyId) {
        self.inner.write().remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> KeyId {
        KeyId::from_bytes([byte; 32])
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("accepted.json"));

        assert!(store.load().unwrap().is_empty());

        let set: BTreeSet<KeyId> = [id(1), id(2)].into_iter().collect();
        store.save(&set).unwrap();
        assert_eq!(store.load().unwrap(), set);
    }

    #[test]
    fn test_file_store_overwrites_previous_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("accepted.json"));

        store.save(&[id(1)].into_iter().collect()).unwrap();
        store.save(&[id(2)].into_iter().collect()).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.contains(&id(1)));
        assert!(loaded.contains(&id(2)));
    }

    #[test]
    fn test_file_store_rejects_corrupt_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accepted.json");
        fs::write(&path, "not json").unwrap();
        let store = FileCacheStore::new(path);
        assert!(matches!(store.load(), Err(CacheError::Corrupt(_))));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let set = AcceptedSet::new([id(1)].into_iter().collect());
        let snap = set.snapshot();
        set.insert(id(2));
        assert_eq!(snap.len(), 1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCacheStore::new();
        let set: BTreeSet<KeyId> = [id(9)].into_iter().collect();
        store.save(&set).unwrap();
        assert_eq!(store.load().unwrap(), set);
    }
}
