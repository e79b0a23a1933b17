// ABOUTME: HTTP client for the remote table store
// ABOUTME: JSON rows API authenticated with a bearer service credential

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::backend::{Row, TableBackend};
use crate::{StorageError, StorageResult};

#[derive(Debug, Deserialize)]
struct RowsResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct RowBody<'a> {
    values: &'a [String],
}

/// Table store reached over HTTP.
///
/// Contract: `GET|POST {base}/tables/{table}/sheets/{sheet}/rows` and
/// `PUT|DELETE {base}/tables/{table}/sheets/{sheet}/rows?id={key}`, where the
/// key matches the first ("ID") column and 404 means no row carries it.
#[derive(Clone)]
pub struct HttpTableBackend {
    http_client: Client,
    base_url: Url,
    table: String,
    token: Option<String>,
}

impl HttpTableBackend {
    pub fn new(
        base_url: &str,
        table: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorageError::Configuration(format!("invalid table url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::Configuration(format!(
                "table url cannot be a base: {}",
                base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            table: table.to_string(),
            token,
        })
    }

    fn rows_url(&self, sheet: &str, key: Option<&str>) -> StorageResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StorageError::Configuration("table url cannot be a base".to_string())
            })?;
            segments
                .pop_if_empty()
                .extend(["tables", self.table.as_str(), "sheets", sheet, "rows"]);
        }
        if let Some(key) = key {
            url.query_pairs_mut().append_pair("id", key);
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Backend(format!("{} {}", status, body.trim())))
    }
}

/// Spreadsheet cells may come back typed; rows are handled as text
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableBackend for HttpTableBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn read_rows(&self, sheet: &str) -> StorageResult<Vec<Row>> {
        let url = self.rows_url(sheet, None)?;
        debug!("Reading rows from {}", url);

        let response = self
            .authorize(self.http_client.get(url))
            .send()
            .await?;
        let payload: RowsResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Backend(format!("invalid rows payload: {}", e)))?;

        Ok(payload
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_row(&self, sheet: &str, row: Row) -> StorageResult<()> {
        let url = self.rows_url(sheet, None)?;
        debug!("Appending row to {}", url);

        let response = self
            .authorize(self.http_client.post(url))
            .json(&RowBody { values: &row })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_row(&self, sheet: &str, key: &str, row: Row) -> StorageResult<()> {
        let url = self.rows_url(sheet, Some(key))?;
        debug!("Updating row {}", url);

        let response = self
            .authorize(self.http_client.put(url))
            .json(&RowBody { values: &row })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(format!("{} row {}", sheet, key)));
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_row(&self, sheet: &str, key: &str) -> StorageResult<bool> {
        let url = self.rows_url(sheet, Some(key))?;
        debug!("Deleting row {}", url);

        let response = self
            .authorize(self.http_client.delete(url))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check(response).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpTableBackend {
        HttpTableBackend::new(
            &server.uri(),
            "Escopo",
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_read_rows_stringifies_cells() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables/Escopo/sheets/Config/rows"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [["sms", "NR-35"], ["tecnico_tab", 42, null]]
            })))
            .mount(&server)
            .await;

        let rows = backend(&server).read_rows("Config").await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["sms".to_string(), "NR-35".to_string()],
                vec!["tecnico_tab".to_string(), "42".to_string(), String::new()],
            ]
        );
    }

    #[tokio::test]
    async fn test_append_row_posts_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tables/Escopo/sheets/Fornecedores/rows"))
            .and(body_json(json!({"values": ["ACME", "12.345.678/0001-90"]})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server)
            .append_row(
                "Fornecedores",
                vec!["ACME".to_string(), "12.345.678/0001-90".to_string()],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_address_row_key() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tables/Escopo/sheets/Projetos/rows"))
            .and(query_param("id", "abc"))
            .and(body_json(json!({"values": ["abc", "ACME"]})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/tables/Escopo/sheets/Projetos/rows"))
            .and(query_param("id", "abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server);
        backend
            .update_row("Projetos", "abc", vec!["abc".to_string(), "ACME".to_string()])
            .await
            .unwrap();
        assert!(backend.delete_row("Projetos", "abc").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_key_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let err = backend
            .update_row("Projetos", "gone", vec!["gone".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(!backend.delete_row("Projetos", "gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = backend(&server).read_rows("Config").await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_backend_error() {
        let backend = HttpTableBackend::new(
            "http://127.0.0.1:9",
            "Escopo",
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let err = backend.read_rows("Config").await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = HttpTableBackend::new("not a url", "Escopo", None, Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::Configuration(_)));
    }
}
