// ABOUTME: Router-level tests over the in-memory table backend
// ABOUTME: Drives the HTTP API with tower oneshot requests

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use escopo_config::{SHEET_CONFIG, SHEET_PROJECTS};
use escopo_projects::{create_router, AppState};
use escopo_storage::{MemoryTableBackend, Stores};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Arc<MemoryTableBackend>, Router) {
    let backend = Arc::new(MemoryTableBackend::new());
    let router = create_router(AppState::new(Stores::new(backend.clone())));
    (backend, router)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes)
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn submission() -> Value {
    json!({
        "client": "ACME Corp",
        "site": "Plant 7",
        "supplier": "",
        "status": "Em Elaboração (Engenharia)",
        "start_date": "2026-03-09",
        "technical_items": ["Tubos e conexões em aço carbono"],
        "matrix": {"Bombas": "SIARCON", "Tubos e conexões": "ACME"}
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_, app) = app();
    let (status, body) = send_json(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_end_to_end_hydraulics_submission() {
    let (_, app) = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["record"]["supplier"], "PROPONENTE HIDRÁULICA");
    assert_eq!(data["record"]["discipline"], "Hidráulica");
    assert_eq!(data["editable"], true);
    assert!(data.get("document_error").is_none());

    let id = data["id"].as_str().unwrap().to_string();
    let document_url = format!("/api/disciplines/hidraulica/records/{}/document", id);
    assert_eq!(data["document_url"], document_url.as_str());

    let submitted = STANDARD
        .decode(data["document_base64"].as_str().unwrap())
        .unwrap();
    let submitted = zip::ZipArchive::new(Cursor::new(submitted)).unwrap();
    assert!(submitted.file_names().any(|name| name == "word/document.xml"));

    let (status, bytes) = send(&app, Method::GET, &document_url, None).await;
    assert_eq!(status, StatusCode::OK);

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("word/document.xml").unwrap(), &mut xml)
        .unwrap();
    assert!(xml.contains("Escopo de fornecimento — Hidráulica"));
    assert!(xml.contains("DE ACORDO: PROPONENTE HIDRÁULICA"));
    assert!(!xml.contains("COMERCIAL"));
}

#[tokio::test]
async fn test_validation_errors_are_bad_request() {
    let (backend, app) = app();
    let mut input = submission();
    input["client"] = json!("");
    input["status"] = json!("Finalizado");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/dutos/records",
        Some(input),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"client"));
    assert!(fields.contains(&"status"));
    assert!(fields.contains(&"matrix"));
    assert!(backend.rows(SHEET_PROJECTS).await.is_empty());
}

#[tokio::test]
async fn test_finalized_record_rejects_update() {
    let (_, app) = app();
    let mut input = submission();
    input["status"] = json!("Contratação Finalizada");
    input["total_value"] = json!("15000");

    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(input),
    )
    .await;
    assert_eq!(body["data"]["editable"], false);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/disciplines/hidraulica/records/{}", id);

    let (status, body) = send_json(&app, Method::PUT, &uri, Some(submission())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, body) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Contratação Finalizada");

    let (status, _) = send(&app, Method::GET, &format!("{}/document", uri), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_and_kanban() {
    let (_, app) = app();
    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let mut changed = submission();
    changed["status"] = json!("Em Negociação");
    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/disciplines/hidraulica/records/{}", id),
        Some(changed),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = send_json(&app, Method::GET, "/api/kanban", None).await;
    assert_eq!(status, StatusCode::OK);
    let columns = body["data"]["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 4);
    assert_eq!(columns[2]["title"], "Suprimentos");
    assert_eq!(columns[2]["cards"][0]["id"], id.as_str());
    assert_eq!(columns[1]["cards"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_record_is_scoped_to_its_discipline() {
    let (_, app) = app();
    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        Method::GET,
        &format!("/api/disciplines/eletrica/records/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(&app, Method::GET, "/api/disciplines/eletrica/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = send_json(&app, Method::GET, "/api/disciplines/pintura/records", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_record() {
    let (backend, app) = app();
    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let (status, body) =
            send_json(&app, Method::DELETE, &format!("/api/records/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["deleted"], id.as_str());
    }
    assert!(backend.rows(SHEET_PROJECTS).await.is_empty());
}

#[tokio::test]
async fn test_catalog_learning_and_duplicates() {
    let (backend, app) = app();
    let request = json!({"category": "tecnico_dutos", "item": "Parafusos"});

    let (status, body) =
        send_json(&app, Method::POST, "/api/catalog/items", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"outcome": "learned"}));

    let (status, body) = send_json(&app, Method::POST, "/api/catalog/items", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"outcome": "duplicate"}));
    assert_eq!(backend.rows(SHEET_CONFIG).await.len(), 1);

    let (_, body) = send_json(&app, Method::GET, "/api/catalog", None).await;
    assert_eq!(body["data"]["degraded"], false);
    assert_eq!(body["data"]["catalog"]["tecnico_dutos"], json!(["Parafusos"]));
    assert_eq!(body["data"]["catalog"]["sms"], json!([]));
}

#[tokio::test]
async fn test_backend_outage() {
    let (backend, app) = app();
    backend.set_unavailable(true);

    let (status, body) = send_json(&app, Method::GET, "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["degraded"], true);
    assert_eq!(body["data"]["catalog"]["tecnico_hidraulica"], json!([]));

    let (status, _) = send_json(&app, Method::GET, "/api/kanban", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_suppliers() {
    let (_, app) = app();
    let request = json!({"name": "ACME Instalações", "tax_id": "12.345.678/0001-90"});

    let (status, body) = send_json(&app, Method::POST, "/api/suppliers", Some(request.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["registered"], true);

    let (status, body) = send_json(&app, Method::POST, "/api/suppliers", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["registered"], false);

    let (_, body) = send_json(&app, Method::GET, "/api/suppliers", None).await;
    assert_eq!(
        body["data"],
        json!([{"name": "ACME Instalações", "tax_id": "12.345.678/0001-90"}])
    );
}

#[tokio::test]
async fn test_notification_and_bundle() {
    let (_, app) = app();
    let (_, body) = send_json(
        &app,
        Method::POST,
        "/api/disciplines/hidraulica/records",
        Some(submission()),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let base = format!("/api/disciplines/hidraulica/records/{}", id);

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("{}/notification?to=compras@siarcon.com.br", base),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["mailto"]
        .as_str()
        .unwrap()
        .starts_with("mailto:compras@siarcon.com.br?subject="));

    let (status, _) = send_json(&app, Method::GET, &format!("{}/notification", base), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{}/bundle", base))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"attachments": [{"name": "planta.pdf", "content_base64": "JVBERg=="}]})
                .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"anexos/planta.pdf"));
}
