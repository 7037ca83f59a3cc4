//! # keyreg-crypto — Numeric Core for Key Identity Derivation
//!
//! Implements the pipeline that turns an RSA public key into its canonical
//! registry identifier:
//!
//! 1. **Limb encoding** (`limbs`): the arbitrary-precision modulus becomes
//!    18 limbs of 120 bits each, together with the Barrett reduction
//!    parameter in the same geometry. This representation is a fixed
//!    numeric contract with the downstream verification circuit — it is
//!    exact or it is an error, never truncated.
//!
//! 2. **Field arithmetic** (`field`): elements of the BN254 scalar field
//!    over `num-bigint`, the field the consuming circuit operates in.
//!
//! 3. **Sponge hash** (`poseidon2`, `constants`): a width-4 permutation
//!    with x^5 s-box, 8 external and 56 internal rounds, absorbed at
//!    rate 3 with a length-tagged initial state.
//!
//! 4. **Identity derivation** (`identity`): modulus limbs, then reduction
//!    limbs, then the exponent, absorbed in that fixed order and squeezed
//!    to a single [`keyreg_core::KeyId`].
//!
//! ## Determinism
//!
//! Everything in this crate is a pure function of its inputs. The same
//! `(modulus, exponent)` pair yields the same identifier on every run, on
//! every host. The golden vector test in `identity` pins the entire
//! pipeline, ordering and padding included.

mod constants;

pub mod field;
pub mod identity;
pub mod limbs;
pub mod poseidon2;

pub use field::FieldElement;
pub use identity::{IdentityError, IdentityHasher};
pub use limbs::{LimbError, LimbSet, LIMB_BITS, LIMB_COUNT};
pub use poseidon2::Poseidon2;
