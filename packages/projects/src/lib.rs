//! # Escopo Projects
//!
//! The discipline controller shared by every scope page, the kanban board
//! and the axum router exposing both over HTTP.

pub mod api;
pub mod controller;
pub mod kanban;

pub use api::{create_router, AppState};
pub use controller::{
    ControllerError, ControllerResult, DisciplineController, RenderedFile, RequestContext,
    SubmitOutcome,
};
pub use kanban::{KanbanBoard, KanbanCard, KanbanColumn};
