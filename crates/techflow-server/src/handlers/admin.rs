//! Admin panel handlers (session-gated)

use crate::error::Result;
use crate::extractors::AdminSession;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use techflow_types::{Service, ServiceFields};

#[derive(Debug, Serialize)]
pub struct AdminListResponse {
    admin: String,
    services: Vec<Service>,
}

pub async fn list(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> Result<Json<AdminListResponse>> {
    let services = state.catalog.list_admin(&session).await?;
    Ok(Json(AdminListResponse {
        admin: session.username,
        services,
    }))
}

/// Creation form. Field names match the existing admin form markup; the
/// checkbox is present when ticked and absent otherwise.
#[derive(Debug, Deserialize)]
pub struct CreateServiceForm {
    nombre: String,
    #[serde(default)]
    descripcion: String,
    precio: String,
    stock: String,
    promocion: Option<String>,
    icono: Option<String>,
}

impl From<CreateServiceForm> for ServiceFields {
    fn from(form: CreateServiceForm) -> Self {
        ServiceFields {
            name: form.nombre,
            description: form.descripcion,
            price: form.precio,
            stock: form.stock,
            promotion: form.promocion.is_some(),
            icon: form.icono,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Form(form): Form<CreateServiceForm>,
) -> Result<Redirect> {
    state.catalog.create(&session, form.into()).await?;
    Ok(Redirect::to("/admin"))
}

/// Delete a service and return to the panel. The redirect happens whether
/// or not the row existed.
pub async fn delete(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.catalog.delete(&session, id).await?;
    Ok(Redirect::to("/admin"))
}
