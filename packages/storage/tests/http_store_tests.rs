// ABOUTME: Store clients running against a mocked HTTP table backend
// ABOUTME: Verifies row decoding, malformed-row skipping and outage fallbacks end to end

use chrono::NaiveDate;
use escopo_core::{Discipline, LearnOutcome, ProjectRecordInput, WorkflowStatus};
use escopo_storage::{HttpTableBackend, StorageError, Stores, TableBackend};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stores(server: &MockServer) -> Stores {
    let backend: Arc<dyn TableBackend> = Arc::new(
        HttpTableBackend::new(&server.uri(), "Escopo", None, Duration::from_secs(5)).unwrap(),
    );
    Stores::new(backend)
}

#[tokio::test]
async fn test_list_records_from_http_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tables/Escopo/sheets/Projetos/rows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [
                ["r1", "ACME Corp", "Plant 7", "Hidráulica", "Hidro Ltda", "", "", "", "R-00",
                 "", "", "[\"Tubos\"]", "", "[]", "", "{\"Bombas\": \"SIARCON\"}", "[]", "",
                 "2026-03-02", 3, "", "", "1000", "", "", "Em Negociação", "[]"],
                ["r2", "", "Sem cliente", "Dutos"],
                ["r3", "Beta", "Galpão", "Linha de Cobre"]
            ]
        })))
        .mount(&server)
        .await;

    let records = stores(&server).records.list_all().await.unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.id.as_deref(), Some("r1"));
    assert_eq!(first.discipline, Discipline::Hidraulica);
    assert_eq!(first.integration_days, 3);
    assert_eq!(first.status, WorkflowStatus::InNegotiation);
    assert_eq!(first.technical_items, vec!["Tubos"]);

    assert_eq!(records[1].discipline, Discipline::LinhaDeCobre);
}

#[tokio::test]
async fn test_catalog_outage_returns_empty_structure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let stores = stores(&server);
    let loaded = stores.options.load_catalog().await;
    assert!(loaded.is_degraded());
    assert!(loaded.catalog.contains_key("sms"));
    assert!(loaded.catalog.values().all(|items| items.is_empty()));

    assert!(matches!(
        stores.options.learn("sms", "NR-12").await,
        LearnOutcome::Failed(_)
    ));
}

#[tokio::test]
async fn test_update_and_delete_address_record_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tables/Escopo/sheets/Projetos/rows"))
        .and(query_param("id", "b2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tables/Escopo/sheets/Projetos/rows"))
        .and(query_param("id", "b2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tables/Escopo/sheets/Projetos/rows"))
        .and(query_param("id", "zz"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tables/Escopo/sheets/Historico/rows"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let stores = stores(&server);
    let record = ProjectRecordInput {
        client: "C".to_string(),
        site: "O".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 2, 9),
        ..Default::default()
    }
    .into_record(&Discipline::Tab.config());

    let id = stores
        .records
        .create_or_update(&record, Some("b2"))
        .await
        .unwrap();
    assert_eq!(id, "b2");
    stores.records.delete("b2").await.unwrap();
    stores.records.delete("zz").await.unwrap();
}

#[tokio::test]
async fn test_update_of_vanished_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let record = ProjectRecordInput {
        client: "C".to_string(),
        site: "O".to_string(),
        ..Default::default()
    }
    .into_record(&Discipline::Tab.config());

    let err = stores(&server)
        .records
        .create_or_update(&record, Some("gone1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(id) if id == "gone1"));
}
