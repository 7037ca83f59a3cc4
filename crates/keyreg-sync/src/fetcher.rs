//! # Key Fetching
//!
//! Retrieves the currently published key set from JWKS endpoints and
//! decodes each entry into a [`KeyRecord`]. Pure I/O: no retries (the
//! scheduler owns retry policy by re-running the cycle) and no local
//! state.
//!
//! ## Strictness
//!
//! An endpoint publishing zero keys is a valid, empty set. Anything else
//! short of a well-formed document is a [`FetchError`]: unreachable host,
//! non-2xx status, non-JSON body, entries missing `n`/`e`, or field
//! values that are not base64url. A malformed source fails the fetch as a
//! whole — a partially decoded key set must never drive removals.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use num_bigint::BigUint;
use parking_lot::RwLock;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use keyreg_core::KeyRecord;

/// Default per-request timeout for key source fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure to obtain the current key set.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build key source client: {source}")]
    Client {
        /// Underlying client construction error.
        #[source]
        source: reqwest::Error,
    },

    /// A source endpoint was unreachable or returned a failure status.
    #[error("key source {url} unreachable: {source}")]
    Unreachable {
        /// The endpoint that failed.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A source returned a payload that is not a valid key-set document.
    #[error("key source {url} returned a malformed document: {reason}")]
    Malformed {
        /// The endpoint that returned the payload.
        url: String,
        /// What made the document unusable.
        reason: String,
    },

    /// A key entry carried a field that does not decode as base64url.
    #[error("key {kid} from {url} has a non-base64url {field} field")]
    BadEncoding {
        /// The endpoint that returned the key.
        url: String,
        /// Source-assigned key identifier.
        kid: String,
        /// The offending field name.
        field: &'static str,
    },
}

/// A source of currently published key records.
///
/// Implemented by [`JwksClient`] in production and by
/// [`StaticKeySource`] in tests and fixtures.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Fetch the current key set, aggregated across all endpoints.
    async fn fetch_keys(&self) -> Result<Vec<KeyRecord>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

/// One JWKS entry. `n` and `e` are required — a key without them cannot
/// be identified and fails the whole document.
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// HTTP client over one or more JWKS endpoints.
#[derive(Debug, Clone)]
pub struct JwksClient {
    client: reqwest::Client,
    endpoints: Vec<Url>,
}

impl JwksClient {
    /// Build a client for the given endpoints.
    pub fn new(endpoints: Vec<Url>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|source| FetchError::Client { source })?;
        Ok(Self { client, endpoints })
    }

    async fn fetch_endpoint(&self, url: &Url) -> Result<Vec<KeyRecord>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| FetchError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        let doc: JwksDocument =
            response
                .json()
                .await
                .map_err(|source| FetchError::Malformed {
                    url: url.to_string(),
                    reason: source.to_string(),
                })?;

        doc.keys
            .into_iter()
            .map(|jwk| decode_jwk(url.as_str(), jwk))
            .collect()
    }
}

#[async_trait]
impl KeySource for JwksClient {
    async fn fetch_keys(&self) -> Result<Vec<KeyRecord>, FetchError> {
        let mut records = Vec::new();
        for url in &self.endpoints {
            let mut batch = self.fetch_endpoint(url).await?;
            tracing::debug!(url = %url, keys = batch.len(), "fetched key set");
            records.append(&mut batch);
        }
        Ok(records)
    }
}

fn decode_jwk(url: &str, jwk: Jwk) -> Result<KeyRecord, FetchError> {
    let n = decode_field(url, &jwk.kid, "n", &jwk.n)?;
    let e = decode_field(url, &jwk.kid, "e", &jwk.e)?;
    Ok(KeyRecord::new(
        jwk.kid,
        BigUint::from_bytes_be(&n),
        BigUint::from_bytes_be(&e),
    ))
}

fn decode_field(
    url: &str,
    kid: &str,
    field: &'static str,
    value: &str,
) -> Result<Vec<u8>, FetchError> {
    let bad = || FetchError::BadEncoding {
        url: url.to_string(),
        kid: kid.to_string(),
        field,
    };
    if value.is_empty() {
        return Err(bad());
    }
    URL_SAFE_NO_PAD.decode(value).map_err(|_| bad())
}

/// A fixed, in-memory key source.
///
/// The test double for [`KeySource`]; the key set can be swapped between
/// cycles to model publisher-side rotation.
#[derive(Debug, Default)]
pub struct StaticKeySource {
    keys: RwLock<Vec<KeyRecord>>,
}

impl StaticKeySource {
    /// Create a source publishing the given records.
    pub fn new(keys: Vec<KeyRecord>) -> Self {
        Self {
            keys: RwLock::new(keys),
        }
    }

    /// Replace the published key set.
    pub fn set_keys(&self, keys: Vec<KeyRecord>) {
        *self.keys.write() = keys;
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn fetch_keys(&self) -> Result<Vec<KeyRecord>, FetchError> {
        Ok(self.keys.read().clone())
    }
}
