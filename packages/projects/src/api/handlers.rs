// ABOUTME: HTTP handlers for the shared reference data and the kanban board
// ABOUTME: Catalog, supplier directory, health and record deletion

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use escopo_core::DisciplineConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use super::response::{created, ok, StorageErrorResponse};
use super::AppState;
use crate::kanban::KanbanBoard;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "escopo"
    }))
}

/// List the seven disciplines with their fixed configuration
pub async fn list_disciplines() -> impl IntoResponse {
    ok(DisciplineConfig::all())
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub catalog: escopo_core::ReferenceCatalog,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Reference catalog; an unreachable store yields empty categories and a warning
pub async fn get_catalog(State(state): State<AppState>) -> impl IntoResponse {
    let loaded = state.stores.options.load_catalog().await;
    let degraded = loaded.is_degraded();
    ok(CatalogResponse {
        catalog: loaded.catalog,
        degraded,
        warning: loaded.error.map(|e| e.to_string()),
    })
}

#[derive(Deserialize)]
pub struct LearnItemRequest {
    pub category: String,
    pub item: String,
}

pub async fn learn_catalog_item(
    State(state): State<AppState>,
    Json(request): Json<LearnItemRequest>,
) -> impl IntoResponse {
    info!("Learning '{}' in '{}'", request.item, request.category);
    let outcome = state
        .stores
        .options
        .learn(&request.category, &request.item)
        .await;
    ok(outcome)
}

pub async fn list_suppliers(State(state): State<AppState>) -> impl IntoResponse {
    match state.stores.suppliers.list_suppliers().await {
        Ok(suppliers) => ok(suppliers),
        Err(e) => StorageErrorResponse(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct RegisterSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub tax_id: String,
}

pub async fn register_supplier(
    State(state): State<AppState>,
    Json(request): Json<RegisterSupplierRequest>,
) -> impl IntoResponse {
    let registered = state
        .stores
        .suppliers
        .register_supplier(&request.name, &request.tax_id)
        .await;
    let body = json!({ "name": request.name.trim(), "registered": registered });
    if registered {
        created(body)
    } else {
        ok(body)
    }
}

/// All records grouped by workflow stage
pub async fn get_kanban(State(state): State<AppState>) -> impl IntoResponse {
    match state.stores.records.list_all().await {
        Ok(records) => {
            let board = KanbanBoard::build(&records);
            info!("Built kanban board with {} cards", board.total_cards());
            ok(board)
        }
        Err(e) => {
            error!("Failed to build kanban board: {}", e);
            StorageErrorResponse(e).into_response()
        }
    }
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting record {}", id);
    match state.stores.records.delete(&id).await {
        Ok(()) => ok(json!({ "deleted": id })),
        Err(e) => StorageErrorResponse(e).into_response(),
    }
}
