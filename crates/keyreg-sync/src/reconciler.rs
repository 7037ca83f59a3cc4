//! # Reconciler — the Core Convergence State Machine
//!
//! Drives one reconciliation cycle:
//!
//! ```text
//! Fetching → Deriving → Diffing → Applying → Settled
//! ```
//!
//! re-entered on every trigger (periodic or on-demand), with no
//! cross-cycle state beyond the accepted-set cache.
//!
//! ## Lifecycle Typestate
//!
//! `KeyRegistry<Uninitialized> ──initialize()──▶ KeyRegistry<Ready>`
//!
//! `reconcile()` is only defined on `KeyRegistry<Ready>`; calling it on an
//! uninitialized registry is a compile error, so the "initialize once,
//! lazily, on first use" failure mode cannot exist here.
//!
//! ## Convergence Rules
//!
//! - Additions apply before removals: a full key rotation must never pass
//!   through a window with zero valid keys.
//! - Every mutating call is gated by a fresh membership check issued
//!   immediately before it. The remote store — not the cache — decides
//!   whether an operation is needed, so any cycle is safe to re-run after
//!   a crash at any point (at most one redundant call, idempotent in
//!   effect).
//! - Failures are isolated per identifier and retried next cycle simply
//!   by still being part of the diff.
//! - Cycles are mutually exclusive: a second `reconcile()` while one is
//!   in flight gets [`ReconcileError::InProgress`] and must not queue.

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use keyreg_core::KeyId;
use keyreg_crypto::IdentityHasher;

use crate::cache::{AcceptedSet, CacheError, CacheStore};
use crate::fetcher::{FetchError, KeySource};
use crate::store::{RemoteStore, StoreOp};

// ─── Lifecycle States ───────────────────────────────────────────────

/// Registry state: constructed but the durable cache is not loaded.
#[derive(Debug, Clone, Copy)]
pub struct Uninitialized;

/// Registry state: cache loaded, ready to reconcile.
#[derive(Debug, Clone, Copy)]
pub struct Ready;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Uninitialized {}
    impl Sealed for super::Ready {}
}

/// Marker trait for the two registry lifecycle states.
pub trait LifecycleState: private::Sealed + std::fmt::Debug {
    /// Canonical state name.
    fn name() -> &'static str;
}

impl LifecycleState for Uninitialized {
    fn name() -> &'static str {
        "UNINITIALIZED"
    }
}
impl LifecycleState for Ready {
    fn name() -> &'static str {
        "READY"
    }
}

// ─── Errors and Report ──────────────────────────────────────────────

/// Failure of a whole reconciliation cycle.
///
/// Per-identifier and per-key failures are *not* errors at this level —
/// they ride inside the [`ReconcileReport`].
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// A cycle is already in flight. Not fatal: try again later, never
    /// queue.
    #[error("a reconciliation cycle is already in flight")]
    InProgress,

    /// The key fetch failed; the cycle is deferred with no cache
    /// mutation.
    #[error("key fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// One mutating operation that failed this cycle.
#[derive(Debug, Clone, Serialize)]
pub struct FailedOperation {
    /// The identifier the operation targeted.
    pub id: KeyId,
    /// The intended operation (add or remove).
    pub op: StoreOp,
    /// Why it failed.
    pub reason: String,
}

/// One fetched key whose identifier could not be derived.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedKey {
    /// Source-assigned key identifier.
    pub kid: String,
    /// Why derivation failed.
    pub reason: String,
}

/// Outcome of one settled reconciliation cycle.
///
/// A cycle with zero successes and all failures is still a settled cycle
/// — it is reported and the process moves on to the next trigger.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// Identifiers newly tracked as accepted this cycle.
    pub added: BTreeSet<KeyId>,
    /// Identifiers dropped from the accepted set this cycle.
    pub removed: BTreeSet<KeyId>,
    /// Per-identifier store failures, eligible for retry next cycle.
    pub failed: Vec<FailedOperation>,
    /// Fetched keys skipped because their identifier could not be
    /// derived.
    pub skipped: Vec<SkippedKey>,
    /// Whether the settled cache was persisted.
    pub cache_persisted: bool,
    /// When the cycle settled.
    pub completed_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// Whether the cycle fully converged: no failures, no skipped keys.
    pub fn is_converged(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    /// Whether the cycle changed anything.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// ─── Registry ───────────────────────────────────────────────────────

/// The accepted-key registry reconciler.
///
/// Owns the accepted-set cache exclusively; everything else it touches
/// (key source, remote store, cache storage) is an injected collaborator
/// behind a trait.
#[derive(Debug)]
pub struct KeyRegistry<S: LifecycleState> {
    source: Arc<dyn KeySource>,
    store: Arc<dyn RemoteStore>,
    cache_store: Arc<dyn CacheStore>,
    hasher: IdentityHasher,
    accepted: AcceptedSet,
    inflight: tokio::sync::Mutex<()>,
    _state: PhantomData<S>,
}

impl<S: LifecycleState> KeyRegistry<S> {
    /// Canonical name of the current lifecycle state.
    pub fn state_name(&self) -> &'static str {
        S::name()
    }
}

impl std::fmt::Debug for dyn KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn KeySource")
    }
}
impl std::fmt::Debug for dyn RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn RemoteStore")
    }
}
impl std::fmt::Debug for dyn CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn CacheStore")
    }
}

impl KeyRegistry<Uninitialized> {
    /// Construct a registry over its three collaborators.
    pub fn new(
        source: Arc<dyn KeySource>,
        store: Arc<dyn RemoteStore>,
        cache_store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            source,
            store,
            cache_store,
            hasher: IdentityHasher::new(),
            accepted: AcceptedSet::default(),
            inflight: tokio::sync::Mutex::new(()),
            _state: PhantomData,
        }
    }

    /// Load the durable cache and transition to `Ready`.
    pub fn initialize(self) -> Result<KeyRegistry<Ready>, CacheError> {
        let initial = self.cache_store.load()?;
        tracing::info!(cached = initial.len(), "registry initialized");
        Ok(KeyRegistry {
            source: self.source,
            store: self.store,
            cache_store: self.cache_store,
            hasher: self.hasher,
            accepted: AcceptedSet::new(initial),
            inflight: self.inflight,
            _state: PhantomData,
        })
    }
}

impl KeyRegistry<Ready> {
    /// Copied snapshot of the accepted-set cache.
    ///
    /// Never hands out the underlying set — snapshot readers must not
    /// observe mid-cycle mutation.
    pub fn accepted_snapshot(&self) -> BTreeSet<KeyId> {
        self.accepted.snapshot()
    }

    /// Run one reconciliation cycle to completion.
    pub async fn reconcile(&self) -> Result<ReconcileReport, ReconcileError> {
        // Single-flight: cycles never overlap, and callers are told to
        // come back later rather than queued.
        let _guard = self
            .inflight
            .try_lock()
            .map_err(|_| ReconcileError::InProgress)?;

        // Fetching. A failure here defers the whole cycle untouched.
        let records = self.source.fetch_keys().await?;
        tracing::info!(keys = records.len(), "fetched current key set");

        // Deriving. Per-key failures are skipped, never fatal.
        let mut remote: BTreeSet<KeyId> = BTreeSet::new();
        let mut skipped = Vec::new();
        for record in &records {
            match self.hasher.derive(record) {
                Ok(id) => {
                    remote.insert(id);
                }
                Err(err) => {
                    tracing::warn!(kid = %record.kid, error = %err, "skipping underivable key");
                    skipped.push(SkippedKey {
                        kid: record.kid.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Diffing.
        let cached = self.accepted.snapshot();
        let to_add: Vec<KeyId> = remote.difference(&cached).copied().collect();
        let to_remove: Vec<KeyId> = cached.difference(&remote).copied().collect();
        tracing::info!(
            remote = remote.len(),
            cached = cached.len(),
            to_add = to_add.len(),
            to_remove = to_remove.len(),
            "computed reconciliation diff"
        );

        let mut added = BTreeSet::new();
        let mut removed = BTreeSet::new();
        let mut failed = Vec::new();

        // Applying: additions before removals, so a full rotation never
        // leaves a window with zero valid keys.
        for id in to_add {
            match self.apply_add(&id).await {
                Ok(()) => {
                    self.accepted.insert(id);
                    added.insert(id);
                }
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "add failed, will retry next cycle");
                    failed.push(FailedOperation {
                        id,
                        op: StoreOp::Add,
                        reason: err.to_string(),
                    });
                }
            }
        }

        for id in to_remove {
            match self.apply_remove(&id).await {
                Ok(()) => {
                    self.accepted.remove(&id);
                    removed.insert(id);
                }
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "remove failed, will retry next cycle");
                    failed.push(FailedOperation {
                        id,
                        op: StoreOp::Remove,
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Settled. Cache persistence failure degrades the next restart,
        // not this cycle's correctness.
        let cache_persisted = match self.cache_store.save(&self.accepted.snapshot()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist accepted-set cache");
                false
            }
        };

        let report = ReconcileReport {
            added,
            removed,
            failed,
            skipped,
            cache_persisted,
            completed_at: Utc::now(),
        };
        tracing::info!(
            added = report.added.len(),
            removed = report.removed.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "reconciliation cycle settled"
        );
        Ok(report)
    }

    /// Make `id` accepted, issuing an add only if the store does not
    /// already hold it.
    async fn apply_add(&self, id: &KeyId) -> Result<(), crate::store::StoreError> {
        if self.store.is_member(id).await? {
            tracing::debug!(id = %id, "already a member, recording without add");
            return Ok(());
        }
        self.store.add(id).await
    }

    /// Retire `id`, issuing a remove only if the store still holds it.
    ///
    /// The gate defends against double-removal races: if another actor
    /// already removed the key, the cache entry is simply dropped.
    async fn apply_remove(&self, id: &KeyId) -> Result<(), crate::store::StoreError> {
        if !self.store.is_member(id).await? {
            tracing::debug!(id = %id, "not a member, dropping from cache without remove");
            return Ok(());
        }
        self.store.remove(id).await
    }
}
