//! Registry HTTP service for haft plugin bundles
//!
//! Serves the registry API (bundle listing and single-bundle resolution)
//! and the on-disk archive cache. All reads run against a snapshot of the
//! record store fetched once per request; the service holds no lock
//! across the fetch-then-compute boundary.

use haft_registry::RecordStore;
use std::sync::Arc;

pub mod error;
pub mod routes;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Published bundle records, read-only from the API's point of view.
    pub store: Arc<dyn RecordStore>,
}

pub use routes::api_router;
