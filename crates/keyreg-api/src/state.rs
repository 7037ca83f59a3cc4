//! # Application State
//!
//! Shared state for the Axum application: the initialized registry.
//! Only a `Ready` registry can be put into state, so every handler is
//! statically guaranteed a loaded cache.

use std::sync::Arc;

use keyreg_sync::{KeyRegistry, Ready};

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The initialized accepted-key registry.
    pub registry: Arc<KeyRegistry<Ready>>,
}

impl AppState {
    /// Create state over an initialized registry.
    pub fn new(registry: Arc<KeyRegistry<Ready>>) -> Self {
        Self { registry }
    }
}
