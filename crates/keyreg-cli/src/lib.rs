//! # keyreg-cli — Registry Command-Line Interface
//!
//! ## Subcommands
//!
//! - `serve` — run the HTTP surface plus the periodic reconciliation
//!   scheduler.
//! - `derive` — offline identifier derivation from a raw RSA public key,
//!   no network or registry involved.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no derivation or
//!   reconciliation logic here.

pub mod derive;
pub mod serve;
