//! Application state for the coefficient API.

use std::sync::Arc;

use crate::retrieval::CoefficientLoader;

/// Shared application state.
///
/// Holds the coefficient loader used by every request handler.
#[derive(Clone)]
pub struct AppState {
    loader: Arc<CoefficientLoader>,
}

impl AppState {
    /// Creates a new application state with the given loader.
    pub fn new(loader: CoefficientLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }

    /// Returns a reference to the loader.
    pub fn loader(&self) -> &CoefficientLoader {
        &self.loader
    }

    /// Returns a shared handle to the loader for blocking tasks.
    pub fn shared_loader(&self) -> Arc<CoefficientLoader> {
        Arc::clone(&self.loader)
    }
}
