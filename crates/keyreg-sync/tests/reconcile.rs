//! End-to-end reconciliation cycles against the in-memory store,
//! covering convergence, rotation ordering, failure isolation,
//! single-flight exclusion, and crash/restart recovery.

use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use tokio::sync::{Notify, Semaphore};

use keyreg_core::{KeyId, KeyRecord};
use keyreg_crypto::IdentityHasher;
use keyreg_sync::{
    FetchError, FileCacheStore, InMemoryRemoteStore, KeyRegistry, KeySource, MemoryCacheStore,
    Ready, ReconcileError, RemoteStore, StaticKeySource, StoreError, StoreOp,
};

fn record(kid: &str, modulus: u64) -> KeyRecord {
    KeyRecord::new(kid, BigUint::from(modulus), BigUint::from(65537u32))
}

fn id_of(rec: &KeyRecord) -> KeyId {
    IdentityHasher::new().derive(rec).unwrap()
}

fn registry_with(
    source: Arc<StaticKeySource>,
    store: Arc<InMemoryRemoteStore>,
) -> KeyRegistry<Ready> {
    KeyRegistry::new(source, store, Arc::new(MemoryCacheStore::new()))
        .initialize()
        .unwrap()
}

#[tokio::test]
async fn second_cycle_is_a_noop_with_zero_store_calls() {
    let source = Arc::new(StaticKeySource::new(vec![record("a", 101), record("b", 103)]));
    let store = Arc::new(InMemoryRemoteStore::new());
    let registry = registry_with(source, store.clone());

    let first = registry.reconcile().await.unwrap();
    assert_eq!(first.added.len(), 2);
    let calls_after_first = store.calls().len();

    let second = registry.reconcile().await.unwrap();
    assert!(second.is_noop());
    assert!(second.is_converged());
    // An empty diff touches the store not at all, membership checks
    // included.
    assert_eq!(store.calls().len(), calls_after_first);
}

#[tokio::test]
async fn rotation_issues_exactly_one_add_then_one_remove() {
    let a = record("a", 101);
    let b = record("b", 103);
    let c = record("c", 107);
    let (id_a, id_c) = (id_of(&a), id_of(&c));

    let source = Arc::new(StaticKeySource::new(vec![a.clone(), b.clone()]));
    let store = Arc::new(InMemoryRemoteStore::new());
    let registry = registry_with(source.clone(), store.clone());
    registry.reconcile().await.unwrap();

    // Publisher rotates a out, c in.
    source.set_keys(vec![b, c]);
    let before = store.calls().len();
    let report = registry.reconcile().await.unwrap();

    assert_eq!(report.added.iter().collect::<Vec<_>>(), vec![&id_c]);
    assert_eq!(report.removed.iter().collect::<Vec<_>>(), vec![&id_a]);

    // The mutating calls this cycle: add(c) strictly before remove(a),
    // so the store never passes through an empty accepted set.
    let mutations: Vec<_> = store.calls()[before..]
        .iter()
        .filter(|call| call.op != StoreOp::Membership)
        .cloned()
        .collect();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0].op, StoreOp::Add);
    assert_eq!(mutations[0].id, id_c);
    assert_eq!(mutations[1].op, StoreOp::Remove);
    assert_eq!(mutations[1].id, id_a);
}

#[tokio::test]
async fn one_failing_identifier_does_not_block_the_rest() {
    let a = record("a", 101);
    let b = record("b", 103);
    let (id_a, id_b) = (id_of(&a), id_of(&b));

    let source = Arc::new(StaticKeySource::new(vec![a, b]));
    let store = Arc::new(InMemoryRemoteStore::new());
    store.inject_failure(id_a);
    let registry = registry_with(source, store.clone());

    let report = registry.reconcile().await.unwrap();
    assert_eq!(report.added.iter().collect::<Vec<_>>(), vec![&id_b]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, id_a);
    assert_eq!(report.failed[0].op, StoreOp::Add);
    assert!(!registry.accepted_snapshot().contains(&id_a));
    assert!(store.members().contains(&id_b));

    // Once the store recovers, the next cycle picks the failure up
    // again with no extra bookkeeping.
    store.clear_failure(&id_a);
    let retry = registry.reconcile().await.unwrap();
    assert_eq!(retry.added.iter().collect::<Vec<_>>(), vec![&id_a]);
    assert!(retry.is_converged());
    assert!(store.members().contains(&id_a));
}

#[tokio::test]
async fn preexisting_member_is_adopted_without_a_mutating_call() {
    let a = record("a", 101);
    let id_a = id_of(&a);

    let source = Arc::new(StaticKeySource::new(vec![a]));
    let store = Arc::new(InMemoryRemoteStore::with_members([id_a]));
    let registry = registry_with(source, store.clone());

    let report = registry.reconcile().await.unwrap();
    assert!(report.added.contains(&id_a));
    assert_eq!(store.mutation_count(), 0);
    assert!(registry.accepted_snapshot().contains(&id_a));
}

#[tokio::test]
async fn externally_removed_member_is_dropped_without_a_mutating_call() {
    let a = record("a", 101);
    let b = record("b", 103);
    let id_a = id_of(&a);

    let source = Arc::new(StaticKeySource::new(vec![a, b.clone()]));
    let store = Arc::new(InMemoryRemoteStore::new());
    let registry = registry_with(source.clone(), store.clone());
    registry.reconcile().await.unwrap();

    // Another actor removes a behind our back; the publisher rotates it
    // out in the same window.
    store.remove(&id_a).await.unwrap();
    source.set_keys(vec![b]);

    let before_mutations = store.mutation_count();
    let report = registry.reconcile().await.unwrap();
    assert!(report.removed.contains(&id_a));
    // Only the membership gate ran; no second remove was issued.
    assert_eq!(store.mutation_count(), before_mutations);
    assert!(!registry.accepted_snapshot().contains(&id_a));
}

struct FailingSource;

#[async_trait]
impl KeySource for FailingSource {
    async fn fetch_keys(&self) -> Result<Vec<KeyRecord>, FetchError> {
        Err(FetchError::Malformed {
            url: "https://keys.example.test/jwks".into(),
            reason: "truncated body".into(),
        })
    }
}

#[tokio::test]
async fn fetch_failure_defers_the_cycle_untouched() {
    let store = Arc::new(InMemoryRemoteStore::with_members([KeyId::from_bytes(
        [7u8; 32],
    )]));
    let registry = KeyRegistry::new(
        Arc::new(FailingSource),
        store.clone(),
        Arc::new(MemoryCacheStore::new()),
    )
    .initialize()
    .unwrap();

    let err = registry.reconcile().await.unwrap_err();
    assert!(matches!(err, ReconcileError::Fetch(_)));
    // Nothing moved: no store calls, cache untouched.
    assert!(store.calls().is_empty());
    assert!(registry.accepted_snapshot().is_empty());
}

/// A store whose membership check parks until released, so a cycle can
/// be held in flight deterministically.
struct BlockingStore {
    entered: Notify,
    release: Semaphore,
}

impl BlockingStore {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }
}

#[async_trait]
impl RemoteStore for BlockingStore {
    async fn is_member(&self, _id: &KeyId) -> Result<bool, StoreError> {
        self.entered.notify_one();
        let _permit = self
            .release
            .acquire()
            .await
            .map_err(|_| StoreError::Unavailable {
                reason: "store closed".into(),
            })?;
        Ok(false)
    }

    async fn add(&self, _id: &KeyId) -> Result<(), StoreError> {
        Ok(())
    }

    async fn remove(&self, _id: &KeyId) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn overlapping_cycle_is_refused_not_queued() {
    let store = Arc::new(BlockingStore::new());
    let registry = Arc::new(
        KeyRegistry::new(
            Arc::new(StaticKeySource::new(vec![record("a", 101)])),
            store.clone(),
            Arc::new(MemoryCacheStore::new()),
        )
        .initialize()
        .unwrap(),
    );

    let running = registry.clone();
    let handle = tokio::spawn(async move { running.reconcile().await });

    // Wait until the first cycle is parked inside the store.
    store.entered.notified().await;

    let err = registry.reconcile().await.unwrap_err();
    assert!(matches!(err, ReconcileError::InProgress));

    store.release.add_permits(1);
    let report = handle.await.unwrap().unwrap();
    assert_eq!(report.added.len(), 1);

    // With the first cycle settled, reconciling works again.
    store.release.add_permits(1);
    assert!(registry.reconcile().await.is_ok());
}

#[tokio::test]
async fn restart_resumes_from_the_persisted_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("accepted.json");

    let a = record("a", 101);
    let b = record("b", 103);

    let source = Arc::new(StaticKeySource::new(vec![a.clone(), b.clone()]));
    let store = Arc::new(InMemoryRemoteStore::new());

    let registry = KeyRegistry::new(
        source.clone(),
        store.clone(),
        Arc::new(FileCacheStore::new(&cache_path)),
    )
    .initialize()
    .unwrap();
    registry.reconcile().await.unwrap();
    assert_eq!(store.members().len(), 2);
    drop(registry);

    // "Restart": a fresh registry over the same cache file and the same
    // remote store. The loaded cache makes the next cycle a pure no-op.
    let restarted = KeyRegistry::new(
        source,
        store.clone(),
        Arc::new(FileCacheStore::new(&cache_path)),
    )
    .initialize()
    .unwrap();
    assert_eq!(restarted.accepted_snapshot().len(), 2);

    let before = store.calls().len();
    let report = restarted.reconcile().await.unwrap();
    assert!(report.is_noop());
    assert_eq!(store.calls().len(), before);
}

#[tokio::test]
async fn crash_between_apply_and_persist_converges_on_rerun() {
    let a = record("a", 101);
    let id_a = id_of(&a);

    let source = Arc::new(StaticKeySource::new(vec![a]));
    // The store already holds the key, as if a previous run crashed
    // after add() but before the cache was persisted.
    let store = Arc::new(InMemoryRemoteStore::with_members([id_a]));
    let registry = registry_with(source, store.clone());

    let report = registry.reconcile().await.unwrap();
    assert!(report.added.contains(&id_a));
    // The membership gate absorbed the replay: no duplicate add.
    assert_eq!(store.mutation_count(), 0);
}
