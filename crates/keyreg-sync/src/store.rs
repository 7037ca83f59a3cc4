//! # Remote Store Seam
//!
//! The authoritative registry is an opaque, authenticated, possibly
//! slow remote ledger exposing exactly three operations: membership
//! check, add, remove. It is modeled as a trait so the reconciliation
//! engine is testable against an in-memory fake, and so a concrete
//! ledger client can be wired in without touching the engine.
//!
//! Calls may incur material latency and cost; the engine minimizes
//! spurious calls by gating every mutation behind a fresh membership
//! check, but duplicates are tolerated — the store is idempotent in
//! effect because a duplicate shows up as already-applied on the next
//! membership check.

use std::collections::BTreeSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use keyreg_core::KeyId;

/// Which of the three store operations failed or was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOp {
    /// Membership query.
    Membership,
    /// Append to the accepted set.
    Add,
    /// Delete from the accepted set.
    Remove,
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Membership => "membership",
            Self::Add => "add",
            Self::Remove => "remove",
        };
        f.write_str(s)
    }
}

/// Failure of a single remote store call.
///
/// Always scoped to one identifier and one operation — the engine never
/// lets a store failure leak across identifiers within a cycle. A
/// timeout is a failure to observe the outcome, not proof the operation
/// did not happen; the next cycle's membership check resolves it.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// The store rejected the operation.
    #[error("remote store rejected {op} for {id}: {reason}")]
    Rejected {
        /// The operation that was rejected.
        op: StoreOp,
        /// The identifier involved.
        id: KeyId,
        /// Store-provided reason.
        reason: String,
    },

    /// No outcome was observed within the per-call deadline.
    #[error("remote store timed out during {op} for {id}")]
    Timeout {
        /// The operation that timed out.
        op: StoreOp,
        /// The identifier involved.
        id: KeyId,
    },

    /// The store is unreachable altogether.
    #[error("remote store unavailable: {reason}")]
    Unavailable {
        /// Transport-level reason.
        reason: String,
    },
}

/// The three-operation remote registry interface.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Whether the identifier is currently a member of the accepted set.
    async fn is_member(&self, id: &KeyId) -> Result<bool, StoreError>;

    /// Append the identifier to the accepted set.
    async fn add(&self, id: &KeyId) -> Result<(), StoreError>;

    /// Delete the identifier from the accepted set.
    async fn remove(&self, id: &KeyId) -> Result<(), StoreError>;
}

/// One recorded call against [`InMemoryRemoteStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    /// The operation invoked.
    pub op: StoreOp,
    /// The identifier it targeted.
    pub id: KeyId,
}

#[derive(Debug, Default)]
struct InMemoryState {
    members: BTreeSet<KeyId>,
    calls: Vec<StoreCall>,
    failing: BTreeSet<KeyId>,
}

/// In-memory [`RemoteStore`].
///
/// The integration seam for a real ledger client and the fake the test
/// suites run against. Records every call and supports per-identifier
/// failure injection for mutating operations.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    state: RwLock<InMemoryState>,
}

impl InMemoryRemoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with members.
    pub fn with_members(members: impl IntoIterator<Item = KeyId>) -> Self {
        let store = Self::new();
        store.state.write().members = members.into_iter().collect();
        store
    }

    /// Make mutating calls for this identifier fail until cleared.
    pub fn inject_failure(&self, id: KeyId) {
        self.state.write().failing.insert(id);
    }

    /// Clear an injected failure.
    pub fn clear_failure(&self, id: &KeyId) {
        self.state.write().failing.remove(id);
    }

    /// Snapshot of the current membership.
    pub fn members(&self) -> BTreeSet<KeyId> {
        self.state.read().members.clone()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.read().calls.clone()
    }

    /// Number of mutating (add/remove) calls made so far.
    pub fn mutation_count(&self) -> usize {
        self.state
            .read()
            .calls
            .iter()
            .filter(|c| matches!(c.op, StoreOp::Add | StoreOp::Remove))
            .count()
    }

    fn record(&self, op: StoreOp, id: &KeyId) {
        self.state.write().calls.push(StoreCall { op, id: *id });
    }

    fn check_injected(&self, op: StoreOp, id: &KeyId) -> Result<(), StoreError> {
        if self.state.read().failing.contains(id) {
            return Err(StoreError::Rejected {
                op,
                id: *id,
                reason: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn is_member(&self, id: &KeyId) -> Result<bool, StoreError> {
        self.record(StoreOp::Membership, id);
        Ok(self.state.read().members.contains(id))
    }

    async fn add(&self, id: &KeyId) -> Result<(), StoreError> {
        self.record(StoreOp::Add, id);
        self.check_injected(StoreOp::Add, id)?;
        self.state.write().members.insert(*id);
        Ok(())
    }

    async fn remove(&self, id: &KeyId) -> Result<(), StoreError> {
        self.record(StoreOp::Remove, id);
        self.check_injected(StoreOp::Remove, id)?;
        self.state.write().members.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> KeyId {
        KeyId::from_bytes([byte; 32])
    }

    #[tokio::test]
    async fn test_membership_and_mutation() {
        let store = InMemoryRemoteStore::new();
        assert!(!store.is_member(&id(1)).await.unwrap());
        store.add(&id(1)).await.unwrap();
        assert!(store.is_member(&id(1)).await.unwrap());
        store.remove(&id(1)).await.unwrap();
        assert!(!store.is_member(&id(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_call_log_ordering() {
        let store = InMemoryRemoteStore::new();
        store.add(&id(1)).await.unwrap();
        let _ = store.is_member(&id(1)).await.unwrap();
        let calls = store.calls();
        assert_eq!(calls[0].op, StoreOp::Add);
        assert_eq!(calls[1].op, StoreOp::Membership);
        assert_eq!(store.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_blocks_mutation() {
        let store = InMemoryRemoteStore::new();
        store.inject_failure(id(2));
        let err = store.add(&id(2)).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { op: StoreOp::Add, .. }));
        assert!(!store.members().contains(&id(2)));

        store.clear_failure(&id(2));
        store.add(&id(2)).await.unwrap();
        assert!(store.members().contains(&id(2)));
    }
}
