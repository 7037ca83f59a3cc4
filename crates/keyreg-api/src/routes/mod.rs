//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled by [`crate::app`] into the application.

pub mod accepted;
pub mod health;
pub mod reconcile;
