//! # BN254 Scalar Field Elements
//!
//! Arbitrary-precision arithmetic modulo the BN254 scalar field prime,
//! the field the downstream verification circuit operates over. Backed by
//! `num-bigint`; throughput is irrelevant here — a reconciliation cycle
//! hashes a handful of keys — so clarity wins over Montgomery form.
//!
//! ## Invariant
//!
//! A `FieldElement` is always fully reduced: its inner value is strictly
//! less than the field modulus. Every constructor enforces this.

use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::Lazy;

/// BN254 scalar field modulus, little-endian 32-bit limbs of
/// `0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001`.
const MODULUS_LIMBS: [u32; 8] = [
    0xf000_0001,
    0x43e1_f593,
    0x79b9_7091,
    0x2833_e848,
    0x8181_585d,
    0xb850_45b6,
    0xe131_a029,
    0x3064_4e72,
];

static MODULUS: Lazy<BigUint> = Lazy::new(|| BigUint::from_slice(&MODULUS_LIMBS));

/// One element of the BN254 scalar field, fully reduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// The field modulus.
    pub fn modulus() -> &'static BigUint {
        &MODULUS
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Construct from an arbitrary-precision integer, reducing mod p.
    pub fn from_biguint(value: BigUint) -> Self {
        Self(value % &*MODULUS)
    }

    /// Construct from an integer that must already be in canonical range.
    ///
    /// Returns `None` if `value >= p`. Used where an out-of-range input is
    /// a caller error rather than something to silently fold — the public
    /// exponent check relies on this.
    pub fn checked(value: BigUint) -> Option<Self> {
        if value < *MODULUS {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Construct from a small integer.
    pub fn from_u64(value: u64) -> Self {
        // u64 always fits below the 254-bit modulus.
        Self(BigUint::from(value))
    }

    /// Parse a lowercase hex string (no prefix), reducing is not allowed —
    /// the value must be canonical.
    pub fn from_hex(s: &str) -> Option<Self> {
        let v = BigUint::parse_bytes(s.as_bytes(), 16)?;
        Self::checked(v)
    }

    /// Modular addition.
    pub fn add(&self, other: &Self) -> Self {
        let mut sum = &self.0 + &other.0;
        if sum >= *MODULUS {
            sum -= &*MODULUS;
        }
        Self(sum)
    }

    /// Modular multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        Self((&self.0 * &other.0) % &*MODULUS)
    }

    /// Multiplication by a small scalar, for the fixed linear layers.
    pub fn mul_u64(&self, k: u64) -> Self {
        Self((&self.0 * k) % &*MODULUS)
    }

    /// The permutation s-box: x^5 mod p.
    pub fn pow5(&self) -> Self {
        let sq = (&self.0 * &self.0) % &*MODULUS;
        let quad = (&sq * &sq) % &*MODULUS;
        Self((quad * &self.0) % &*MODULUS)
    }

    /// Canonical 32-byte big-endian serialization, zero-padded.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Access the reduced inner integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}
