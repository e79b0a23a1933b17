use axum::{
    routing::{delete, get, post},
    Router,
};
use escopo_core::Discipline;
use escopo_storage::Stores;

use crate::controller::DisciplineController;

pub mod handlers;
pub mod records_handlers;
pub mod response;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Controller for the discipline named by a route slug
    pub fn controller(&self, slug: &str) -> Option<DisciplineController> {
        let discipline = slug.parse::<Discipline>().ok()?;
        Some(DisciplineController::new(discipline, self.stores.clone()))
    }
}

/// Creates the full `/api` router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/disciplines", get(handlers::list_disciplines))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/catalog/items", post(handlers::learn_catalog_item))
        .route(
            "/api/suppliers",
            get(handlers::list_suppliers).post(handlers::register_supplier),
        )
        .route("/api/kanban", get(handlers::get_kanban))
        .route("/api/records/{id}", delete(handlers::delete_record))
        .merge(create_records_router())
        .with_state(state)
}

/// Discipline-scoped record routes
fn create_records_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/disciplines/{slug}/records",
            get(records_handlers::list_records).post(records_handlers::create_record),
        )
        .route(
            "/api/disciplines/{slug}/records/{id}",
            get(records_handlers::get_record).put(records_handlers::update_record),
        )
        .route(
            "/api/disciplines/{slug}/records/{id}/document",
            get(records_handlers::download_document),
        )
        .route(
            "/api/disciplines/{slug}/records/{id}/bundle",
            post(records_handlers::download_bundle),
        )
        .route(
            "/api/disciplines/{slug}/records/{id}/notification",
            get(records_handlers::notification_link),
        )
}
