//! # keyreg-sync — Accepted-Key Reconciliation Engine
//!
//! Keeps a remote accepted-key registry converged against the key sets
//! currently published by one or more JWKS endpoints. One reconciliation
//! cycle runs:
//!
//! ```text
//! Fetching → Deriving → Diffing → Applying → Settled
//! ```
//!
//! - **Fetching** (`fetcher`): pull the current key records from every
//!   configured source. A fetch failure defers the whole cycle.
//! - **Deriving**: map each record to its canonical identifier via
//!   `keyreg-crypto`; per-key derivation failures are skipped and
//!   reported, never fatal.
//! - **Diffing**: set difference against the local accepted-set cache.
//! - **Applying**: additions before removals, each gated by a fresh
//!   membership check against the remote store so repeated or crashed
//!   cycles converge instead of double-applying.
//! - **Settled**: persist the cache; failures stay eligible for retry.
//!
//! ## Ground Truth
//!
//! The remote store decides whether an operation is needed. The local
//! [`cache::AcceptedSet`] is only an optimization and audit trail — every
//! cycle is safe to re-run after a crash at any point.
//!
//! ## Lifecycle
//!
//! [`reconciler::KeyRegistry`] is typestate-encoded:
//! `KeyRegistry<Uninitialized>` must be `initialize()`d (loading the
//! durable cache) before `reconcile()` exists at all. Silent lazy
//! reinitialization is unrepresentable.

pub mod cache;
pub mod fetcher;
pub mod reconciler;
pub mod store;

pub use cache::{AcceptedSet, CacheError, CacheStore, FileCacheStore, MemoryCacheStore};
pub use fetcher::{FetchError, JwksClient, KeySource, StaticKeySource};
pub use reconciler::{
    FailedOperation, KeyRegistry, Ready, ReconcileError, ReconcileReport, SkippedKey,
    Uninitialized,
};
pub use store::{InMemoryRemoteStore, RemoteStore, StoreCall, StoreError, StoreOp};
