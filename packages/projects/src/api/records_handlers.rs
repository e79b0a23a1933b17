// ABOUTME: HTTP handlers for the discipline-scoped record routes
// ABOUTME: Submit, fetch, document download, attachment bundle and notification link

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use escopo_core::{ProjectRecord, ProjectRecordInput};
use escopo_document::{Attachment, DOCX_MIME_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::response::{created, error_response, ok};
use super::AppState;
use crate::controller::{DisciplineController, RenderedFile, RequestContext, SubmitOutcome};

const ZIP_MIME_TYPE: &str = "application/zip";

#[derive(Serialize)]
pub struct SubmitResponse {
    pub id: String,
    pub record: ProjectRecord,
    pub editable: bool,
    pub document_file_name: String,
    /// Download route for the stored record's document
    pub document_url: String,
    /// The document rendered at submit time, base64-encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_error: Option<String>,
}

impl From<SubmitOutcome> for SubmitResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        let document_file_name = outcome.document_file_name();
        let document_url = format!(
            "/api/disciplines/{}/records/{}/document",
            outcome.record.discipline.slug(),
            outcome.id
        );
        let (document_base64, document_error) = match outcome.document {
            Ok(bytes) => (Some(STANDARD.encode(bytes)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        SubmitResponse {
            editable: outcome.record.is_editable(),
            id: outcome.id,
            record: outcome.record,
            document_file_name,
            document_url,
            document_base64,
            document_error,
        }
    }
}

fn controller(state: &AppState, slug: &str) -> Result<DisciplineController, Response> {
    state.controller(slug).ok_or_else(|| {
        warn!("Unknown discipline route: {}", slug);
        error_response(StatusCode::NOT_FOUND, format!("Unknown discipline: {}", slug))
    })
}

fn file_response(file: RenderedFile, content_type: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    match controller.list().await {
        Ok(records) => ok(records),
        Err(e) => e.into_response(),
    }
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<ProjectRecordInput>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    info!("Submitting new {} record", controller.config().name);
    match controller.submit(&RequestContext::now(), input).await {
        Ok(outcome) => created(SubmitResponse::from(outcome)),
        Err(e) => e.into_response(),
    }
}

pub async fn update_record(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Json(input): Json<ProjectRecordInput>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    info!("Updating {} record {}", controller.config().name, id);
    let ctx = RequestContext::now().editing(id);
    match controller.submit(&ctx, input).await {
        Ok(outcome) => ok(SubmitResponse::from(outcome)),
        Err(e) => e.into_response(),
    }
}

pub async fn get_record(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    match controller.get(&id).await {
        Ok(record) => ok(record),
        Err(e) => e.into_response(),
    }
}

pub async fn download_document(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    match controller.document(&RequestContext::now(), &id).await {
        Ok(file) => {
            info!("Serving document {} ({} bytes)", file.file_name, file.bytes.len());
            file_response(file, DOCX_MIME_TYPE)
        }
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
pub struct AttachmentUpload {
    pub name: String,
    pub content_base64: String,
}

#[derive(Deserialize)]
pub struct BundleRequest {
    #[serde(default)]
    pub attachments: Vec<AttachmentUpload>,
}

pub async fn download_bundle(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Json(request): Json<BundleRequest>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    let mut attachments = Vec::with_capacity(request.attachments.len());
    for upload in request.attachments {
        match STANDARD.decode(upload.content_base64.trim()) {
            Ok(bytes) => attachments.push(Attachment::new(upload.name, bytes)),
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Attachment '{}' is not valid base64: {}", upload.name, e),
                )
            }
        }
    }

    match controller
        .document_bundle(&RequestContext::now(), &id, &attachments)
        .await
    {
        Ok(file) => file_response(file, ZIP_MIME_TYPE),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub to: String,
}

pub async fn notification_link(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Query(query): Query<NotificationQuery>,
) -> Response {
    let controller = match controller(&state, &slug) {
        Ok(controller) => controller,
        Err(response) => return response,
    };
    match controller.notification_link(&id, &query.to).await {
        Ok(link) => ok(serde_json::json!({ "mailto": link })),
        Err(e) => e.into_response(),
    }
}
