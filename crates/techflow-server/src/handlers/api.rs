//! JSON export for external consumers

use crate::error::Result;
use crate::AppState;
use axum::{extract::State, Json};
use techflow_types::ServiceRecord;

/// Every service as a transport record. Field names are fixed by the
/// existing consumer contract.
pub async fn services(State(state): State<AppState>) -> Result<Json<Vec<ServiceRecord>>> {
    let records = state.catalog.export_records().await?;
    Ok(Json(records))
}
