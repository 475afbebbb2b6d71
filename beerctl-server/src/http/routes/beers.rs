//! Beer catalog endpoints under `/v1/beer`

use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::{BeerRepository, RepoResult};
use crate::http::error::ApiError;
use crate::http::extractors::{BeerBody, BeerIdPath};
use crate::http::server::AppState;
use crate::models::{Beer, ValidationError};

/// GET /v1/beer - list all beers
async fn list_beers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Beer>>, ApiError> {
    let beers = state.beers.list().await?;
    Ok(Json(beers))
}

/// GET /v1/beer/{id} - get a single beer
async fn get_beer(
    State(state): State<Arc<AppState>>,
    BeerIdPath(id): BeerIdPath,
) -> Result<Json<Beer>, ApiError> {
    let beer = state.beers.get(id).await?;
    Ok(Json(beer))
}

/// POST /v1/beer - create a beer
async fn create_beer(
    State(state): State<Arc<AppState>>,
    BeerBody(beer): BeerBody,
) -> Result<StatusCode, ApiError> {
    let beers = Arc::clone(&state.beers);
    let id = detached(async move { beers.create(&beer).await }).await?;

    tracing::info!(id, "beer stored");
    Ok(StatusCode::CREATED)
}

/// PUT /v1/beer - replace a beer's name, type and style
async fn update_beer(
    State(state): State<Arc<AppState>>,
    BeerBody(beer): BeerBody,
) -> Result<StatusCode, ApiError> {
    if beer.id == 0 {
        return Err(ValidationError::Unassigned { field: "id" }.into());
    }

    let beers = Arc::clone(&state.beers);
    detached(async move { beers.update(&beer).await }).await?;
    Ok(StatusCode::OK)
}

/// DELETE /v1/beer/{id} - delete an existing beer
async fn delete_beer(
    State(state): State<Arc<AppState>>,
    BeerIdPath(id): BeerIdPath,
) -> Result<StatusCode, ApiError> {
    // 404 for anything that isn't there, including id 0
    state.beers.get(id).await?;

    let beers = Arc::clone(&state.beers);
    detached(async move { beers.delete(id).await }).await?;
    Ok(StatusCode::OK)
}

/// Run a write on its own task so a dropped request can't cut it short.
async fn detached<T, F>(write: F) -> Result<T, ApiError>
where
    F: Future<Output = RepoResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(write)
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("write task failed: {}", e),
        })?
        .map_err(ApiError::from)
}

/// Beer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/v1/beer",
            get(list_beers).post(create_beer).put(update_beer),
        )
        .route("/v1/beer/{id}", get(get_beer).delete(delete_beer))
}
