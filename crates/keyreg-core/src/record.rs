//! # Fetched Key Records
//!
//! The decoded form of one entry from a published key set. Records are
//! produced by the fetcher, consumed by the identity deriver, and never
//! mutated in between.

use num_bigint::BigUint;

/// One RSA public key as published by a key source.
///
/// `kid` is the source-assigned identifier. It is only unique within a
/// single fetch of a single source — the derived [`KeyId`] is the global
/// identity, never the `kid`.
///
/// [`KeyId`]: crate::KeyId
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Source-assigned key identifier (the JWK `kid` field).
    pub kid: String,
    /// RSA modulus, decoded from the base64url `n` field.
    pub modulus: BigUint,
    /// RSA public exponent, decoded from the base64url `e` field.
    pub exponent: BigUint,
}

impl KeyRecord {
    /// Construct a record from already-decoded integers.
    pub fn new(kid: impl Into<String>, modulus: BigUint, exponent: BigUint) -> Self {
        Self {
            kid: kid.into(),
            modulus,
            exponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_holds_decoded_values() {
        let r = KeyRecord::new("kid-1", BigUint::from(7u32), BigUint::from(65537u32));
        assert_eq!(r.kid, "kid-1");
        assert_eq!(r.exponent, BigUint::from(65537u32));
    }
}
