//! # keyreg-core — Foundational Types for the Key Registry
//!
//! Defines the value types shared by every other crate in the workspace:
//! the canonical [`KeyId`] identifier and the [`KeyRecord`] decoded from a
//! published key set. This crate is the leaf of the dependency DAG — it
//! depends on no other `keyreg-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype for the identifier.** A `KeyId` is a validated 32-byte
//!    value with one canonical textual form (`0x` + 64 lowercase hex
//!    digits). No bare strings cross a crate boundary.
//!
//! 2. **Records are immutable values.** A `KeyRecord` is decoded once from
//!    a key-set document and never mutated afterwards.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod keyid;
pub mod record;

pub use keyid::{KeyId, KeyIdParseError, KEY_ID_BYTES};
pub use record::KeyRecord;
