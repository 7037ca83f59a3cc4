//! # Canonical Key Identifier
//!
//! The derived identifier of one accepted signing key: a single element of
//! the scalar field, carried as 32 big-endian bytes and rendered as `0x`
//! followed by exactly 64 lowercase hex digits, zero-padded.
//!
//! ## Security Invariant
//!
//! There is exactly one textual form per identifier. Parsing rejects
//! missing prefixes, wrong lengths, and uppercase digits, so an identifier
//! that round-trips through storage or the wire cannot silently alias a
//! different one.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Width of a key identifier in bytes.
pub const KEY_ID_BYTES: usize = 32;

/// A derived key identifier — one field element, 32 big-endian bytes.
///
/// Ordered so identifier sets can live in `BTreeSet` with a stable
/// iteration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId([u8; KEY_ID_BYTES]);

/// Error parsing the canonical textual form of a [`KeyId`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyIdParseError {
    /// The `0x` prefix is missing.
    #[error("key identifier must start with 0x")]
    MissingPrefix,

    /// The hex body is not exactly 64 characters.
    #[error("key identifier body must be 64 hex characters, got {0}")]
    BadLength(usize),

    /// A character outside `[0-9a-f]` appeared in the body.
    #[error("key identifier contains non-canonical character {0:?}")]
    BadCharacter(char),
}

impl KeyId {
    /// Wrap raw big-endian bytes as an identifier.
    pub fn from_bytes(bytes: [u8; KEY_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Access the raw big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_ID_BYTES] {
        &self.0
    }

    /// Render the canonical textual form: `0x` + 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(2 + 2 * KEY_ID_BYTES);
        out.push_str("0x");
        for b in &self.0 {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }

    /// Parse the canonical textual form.
    ///
    /// Strict: requires the `0x` prefix, exactly 64 hex digits, and
    /// lowercase letters. Uppercase input is rejected rather than folded
    /// so that every stored identifier has a single representation.
    pub fn parse(s: &str) -> Result<Self, KeyIdParseError> {
        let body = s.strip_prefix("0x").ok_or(KeyIdParseError::MissingPrefix)?;
        if body.len() != 2 * KEY_ID_BYTES {
            return Err(KeyIdParseError::BadLength(body.len()));
        }
        let mut bytes = [0u8; KEY_ID_BYTES];
        for (i, chunk) in body.as_bytes().chunks(2).enumerate() {
            let hi = hex_nibble(chunk[0] as char)?;
            let lo = hex_nibble(chunk[1] as char)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_nibble(c: char) -> Result<u8, KeyIdParseError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        other => Err(KeyIdParseError::BadCharacter(other)),
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.to_hex())
    }
}

impl FromStr for KeyId {
    type Err = KeyIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for KeyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for KeyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}
