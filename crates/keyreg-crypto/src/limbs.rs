//! # Fixed-Width Limb Encoding
//!
//! Decomposes an RSA modulus into the base-2^120, 18-limb representation
//! the downstream circuit consumes, together with the Barrett reduction
//! parameter `floor(2^(2·bitlen(n)) / n)` in the same geometry.
//!
//! ## Numeric Contract
//!
//! The encoding is exact or it is an error. A modulus wider than the
//! 2160-bit capacity fails with [`LimbError::Overflow`] — truncation would
//! silently corrupt the derived identifier and break circuit
//! compatibility. Limbs are little-endian: `limbs[0]` holds the least
//! significant 120 bits, and base-2^120 positional summation reconstructs
//! the modulus bit for bit.
//!
//! The reduction parameter of a `b`-bit modulus occupies `b + 1` or
//! `b + 2` bits, so moduli within one limb-width of capacity can overflow
//! on the reduction side even when the modulus itself fits; that case is
//! [`LimbError::RedcOverflow`], equally hard.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use thiserror::Error;

use crate::field::FieldElement;

/// Bits per limb.
pub const LIMB_BITS: u64 = 120;

/// Limbs per encoded integer.
pub const LIMB_COUNT: usize = 18;

/// Total representable width: 2160 bits.
pub const CAPACITY_BITS: u64 = LIMB_BITS * LIMB_COUNT as u64;

/// Failure to encode a modulus in the fixed limb geometry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimbError {
    /// The modulus needs more than [`LIMB_COUNT`] limbs.
    #[error("modulus of {bits} bits exceeds the {CAPACITY_BITS}-bit limb capacity")]
    Overflow {
        /// Bit length of the rejected modulus.
        bits: u64,
    },

    /// The reduction parameter needs more than [`LIMB_COUNT`] limbs.
    #[error("reduction parameter of {bits} bits exceeds the {CAPACITY_BITS}-bit limb capacity")]
    RedcOverflow {
        /// Bit length of the rejected reduction parameter.
        bits: u64,
    },

    /// A zero modulus has no reduction parameter.
    #[error("modulus must be non-zero")]
    ZeroModulus,
}

/// The fixed-width representation of one modulus.
///
/// Both sequences always hold exactly [`LIMB_COUNT`] elements, each
/// strictly below 2^120 (and therefore trivially canonical in the field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimbSet {
    /// Little-endian base-2^120 limbs of the modulus.
    pub limbs: [FieldElement; LIMB_COUNT],
    /// Little-endian base-2^120 limbs of the Barrett reduction parameter.
    pub redc_limbs: [FieldElement; LIMB_COUNT],
}

impl LimbSet {
    /// Encode a modulus into its limb representation.
    ///
    /// Pure function of the input — no I/O, no randomness.
    pub fn encode(modulus: &BigUint) -> Result<Self, LimbError> {
        if modulus.is_zero() {
            return Err(LimbError::ZeroModulus);
        }
        let bits = modulus.bits();
        if bits > CAPACITY_BITS {
            return Err(LimbError::Overflow { bits });
        }

        let redc = barrett_parameter(modulus);
        let redc_bits = redc.bits();
        if redc_bits > CAPACITY_BITS {
            return Err(LimbError::RedcOverflow { bits: redc_bits });
        }

        Ok(Self {
            limbs: decompose(modulus),
            redc_limbs: decompose(&redc),
        })
    }

    /// Reconstruct the modulus via base-2^120 positional summation.
    ///
    /// Inverse of the `limbs` half of [`encode`](Self::encode); the
    /// round-trip is exact for every in-capacity modulus.
    pub fn reconstruct(&self) -> BigUint {
        let mut acc = BigUint::zero();
        for (i, limb) in self.limbs.iter().enumerate() {
            acc += limb.as_biguint() << (LIMB_BITS * i as u64);
        }
        acc
    }
}

/// `floor(2^(2·bitlen(n)) / n)` — the Barrett reduction parameter.
fn barrett_parameter(modulus: &BigUint) -> BigUint {
    let shifted = BigUint::one() << (2 * modulus.bits());
    shifted / modulus
}

fn decompose(value: &BigUint) -> [FieldElement; LIMB_COUNT] {
    let mask = (BigUint::one() << LIMB_BITS) - BigUint::one();
    std::array::from_fn(|i| {
        let limb = (value >> (LIMB_BITS * i as u64)) & &mask;
        FieldElement::from_biguint(limb)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_modulus_round_trip() {
        let n = BigUint::from(0xdead_beef_u64);
        let set = LimbSet::encode(&n).unwrap();
        assert_eq!(set.reconstruct(), n);
        assert_eq!(set.limbs.len(), LIMB_COUNT);
        assert_eq!(set.redc_limbs.len(), LIMB_COUNT);
    }

    #[test]
    fn test_multi_limb_round_trip() {
        // 2048-bit modulus: all-ones, needs exactly 18 limbs.
        let n = (BigUint::one() << 2048u32) - BigUint::one();
        let set = LimbSet::encode(&n).unwrap();
        assert_eq!(set.reconstruct(), n);
        // Top limb holds the 8 bits above 17 * 120 = 2040.
        assert_eq!(*set.limbs[17].as_biguint(), BigUint::from(0xffu32));
    }

    #[test]
    fn test_overflow_boundary() {
        // 2161 bits: one limb too many.
        let too_wide = BigUint::one() << CAPACITY_BITS;
        assert_eq!(
            LimbSet::encode(&too_wide),
            Err(LimbError::Overflow {
                bits: CAPACITY_BITS + 1
            })
        );
    }

    #[test]
    fn test_redc_overflow_near_capacity() {
        // A full-capacity modulus fits, but its reduction parameter is one
        // bit wider and does not.
        let n = (BigUint::one() << CAPACITY_BITS) - BigUint::one();
        assert!(matches!(
            LimbSet::encode(&n),
            Err(LimbError::RedcOverflow { .. })
        ));
    }

    #[test]
    fn test_zero_modulus_rejected() {
        assert_eq!(
            LimbSet::encode(&BigUint::zero()),
            Err(LimbError::ZeroModulus)
        );
    }

    #[test]
    fn test_barrett_parameter_bit_length() {
        // For a b-bit modulus the parameter has b+1 or b+2 bits.
        let n = (BigUint::one() << 2048u32) - BigUint::from(12345u32);
        let redc = barrett_parameter(&n);
        assert!(redc.bits() == 2049 || redc.bits() == 2050);
    }

    #[test]
    fn test_limbs_are_below_limb_width() {
        let n = (BigUint::one() << 2048u32) - BigUint::one();
        let set = LimbSet::encode(&n).unwrap();
        let bound = BigUint::one() << LIMB_BITS;
        for limb in set.limbs.iter().chain(set.redc_limbs.iter()) {
            assert!(*limb.as_biguint() < bound);
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let n = (BigUint::one() << 2047u32) + BigUint::from(99u32);
        assert_eq!(LimbSet::encode(&n).unwrap(), LimbSet::encode(&n).unwrap());
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_lossless(bytes in proptest::collection::vec(any::<u8>(), 1..=256)) {
            let n = BigUint::from_bytes_be(&bytes);
            prop_assume!(!n.is_zero());
            let set = LimbSet::encode(&n).unwrap();
            prop_assert_eq!(set.reconstruct(), n);
        }
    }
}
