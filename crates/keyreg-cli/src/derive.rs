//! # Derive Subcommand
//!
//! Offline identifier derivation: raw RSA public key in, canonical
//! identifier out. Accepts the modulus either as hex or as the
//! base64url `n` field lifted straight out of a JWKS document.

use anyhow::{bail, Context};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clap::Args;
use num_bigint::BigUint;

use keyreg_crypto::IdentityHasher;

/// Arguments for the derive subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// RSA modulus as hex, with or without a 0x prefix.
    #[arg(long, conflicts_with = "modulus_b64")]
    pub modulus_hex: Option<String>,

    /// RSA modulus as base64url (the JWKS `n` field).
    #[arg(long)]
    pub modulus_b64: Option<String>,

    /// Public exponent, decimal.
    #[arg(long, default_value_t = 65537)]
    pub exponent: u64,
}

/// Derive and print the canonical identifier.
pub fn run(args: &DeriveArgs) -> anyhow::Result<()> {
    let modulus = parse_modulus(args)?;
    let id = IdentityHasher::new()
        .derive_parts(&modulus, &BigUint::from(args.exponent))
        .context("identifier derivation failed")?;
    println!("{id}");
    Ok(())
}

fn parse_modulus(args: &DeriveArgs) -> anyhow::Result<BigUint> {
    match (&args.modulus_hex, &args.modulus_b64) {
        (Some(hex), None) => {
            let digits = hex.strip_prefix("0x").unwrap_or(hex);
            BigUint::parse_bytes(digits.as_bytes(), 16)
                .context("--modulus-hex is not valid hex")
        }
        (None, Some(b64)) => {
            let bytes = URL_SAFE_NO_PAD
                .decode(b64)
                .context("--modulus-b64 is not valid base64url")?;
            Ok(BigUint::from_bytes_be(&bytes))
        }
        _ => bail!("provide exactly one of --modulus-hex or --modulus-b64"),
    }
}
