//! Public catalog handlers

use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use techflow_types::Service;

/// The home page is pure presentation; send visitors to the catalog.
pub async fn home() -> Redirect {
    Redirect::to("/servicios")
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Service>>> {
    let services = state.catalog.list_public().await?;
    Ok(Json(services))
}

/// Detail view. An absent id redirects back to the list via the error
/// mapping, never a hard 404.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Service>> {
    let service = state.catalog.detail(id).await?;
    Ok(Json(service))
}
