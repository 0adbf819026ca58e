//! Registry API routes.
//!
//! Two logical operations over the published record set:
//!
//! - `GET /v1/bundles/{runtime}/{platform}` - public listing of the
//!   newest compatible bundle per plugin.
//! - `GET /v1/bundles/{runtime}/{platform}/{name}` - download location
//!   for one plugin.

use crate::AppState;
use crate::error::AppError;
use axum::{Json, Router, extract::Path, extract::State, routing::get};
use haft_bundle::Manifest;
use haft_registry::resolve::{self, ResolveQuery, ResolvedEntry};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/v1/bundles/:runtime/:platform", get(list_bundles))
        .route("/v1/bundles/:runtime/:platform/:name", get(resolve_bundle))
}

/// Public listing of the newest compatible bundle per plugin.
async fn list_bundles(
    State(state): State<AppState>,
    Path((runtime, platform)): Path<(String, String)>,
) -> Result<Json<Vec<Manifest>>, AppError> {
    let records = state.store.find_for_platform(&platform)?;
    let query = ResolveQuery {
        runtime_version: runtime,
        platform,
    };

    Ok(Json(resolve::listing(&records, &query)))
}

/// Download location for a single plugin.
async fn resolve_bundle(
    State(state): State<AppState>,
    Path((runtime, platform, name)): Path<(String, String, String)>,
) -> Result<Json<ResolvedEntry>, AppError> {
    let records = state.store.find_for_platform(&platform)?;
    let query = ResolveQuery {
        runtime_version: runtime,
        platform,
    };

    Ok(Json(resolve::resolve(&records, &query, &name)?))
}
