// ABOUTME: Project record store over the "Projetos" worksheet
// ABOUTME: Live rows are overwritten in place; every save is also logged to "Historico"

use chrono::Utc;
use escopo_config::{SHEET_HISTORY, SHEET_PROJECTS};
use escopo_core::{generate_record_id, Discipline, ProjectRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::{find_row_index, TableBackend};
use crate::codec::{record_to_row, row_to_record};
use crate::{StorageError, StorageResult};

#[derive(Clone)]
pub struct ProjectRecordStore {
    backend: Arc<dyn TableBackend>,
    records_sheet: String,
    history_sheet: String,
}

impl ProjectRecordStore {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            backend,
            records_sheet: SHEET_PROJECTS.to_string(),
            history_sheet: SHEET_HISTORY.to_string(),
        }
    }

    /// Every well-formed record; malformed rows are skipped
    pub async fn list_all(&self) -> StorageResult<Vec<ProjectRecord>> {
        let rows = self.backend.read_rows(&self.records_sheet).await?;
        let total = rows.len();

        let records: Vec<ProjectRecord> = rows
            .iter()
            .filter_map(|row| match row_to_record(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    None
                }
            })
            .collect();

        debug!("Read {} of {} project rows", records.len(), total);
        Ok(records)
    }

    pub async fn list_by_discipline(
        &self,
        discipline: Discipline,
    ) -> StorageResult<Vec<ProjectRecord>> {
        let mut records = self.list_all().await?;
        records.retain(|record| record.discipline == discipline);
        Ok(records)
    }

    pub async fn find_by_id(&self, row_id: &str) -> StorageResult<Option<ProjectRecord>> {
        let rows = self.backend.read_rows(&self.records_sheet).await?;
        match find_row_index(&rows, row_id) {
            Some(index) => match row_to_record(&rows[index]) {
                Ok(record) => Ok(Some(record)),
                Err(e) => {
                    warn!("Record {} is unreadable: {}", row_id, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Overwrites the row holding `row_id`, or appends under a new id.
    ///
    /// Repeating the call with the same record and id leaves the live row
    /// unchanged. An unknown `row_id` is `NotFound`.
    pub async fn create_or_update(
        &self,
        record: &ProjectRecord,
        row_id: Option<&str>,
    ) -> StorageResult<String> {
        let id = match row_id {
            Some(row_id) => {
                let row = record_to_row(record, row_id)?;
                self.backend
                    .update_row(&self.records_sheet, row_id, row)
                    .await
                    .map_err(|e| match e {
                        StorageError::NotFound(_) => StorageError::NotFound(row_id.to_string()),
                        other => other,
                    })?;
                info!("Updated record {} ({} / {})", row_id, record.site, record.discipline);
                row_id.to_string()
            }
            None => {
                let id = generate_record_id();
                let row = record_to_row(record, &id)?;
                self.backend.append_row(&self.records_sheet, row).await?;
                info!("Created record {} ({} / {})", id, record.site, record.discipline);
                id
            }
        };

        self.append_history(record, &id).await;
        Ok(id)
    }

    /// Removes the row; absent ids are not an error
    pub async fn delete(&self, row_id: &str) -> StorageResult<()> {
        if self.backend.delete_row(&self.records_sheet, row_id).await? {
            info!("Deleted record {}", row_id);
        } else {
            debug!("Record {} already absent", row_id);
        }
        Ok(())
    }

    /// Snapshot log; a failure here never undoes the live write
    async fn append_history(&self, record: &ProjectRecord, id: &str) {
        let row = match record_to_row(record, id) {
            Ok(row) => row,
            Err(e) => {
                warn!("Could not encode history snapshot for {}: {}", id, e);
                return;
            }
        };
        let mut snapshot = Vec::with_capacity(row.len() + 1);
        snapshot.push(Utc::now().to_rfc3339());
        snapshot.extend(row);

        if let Err(e) = self.backend.append_row(&self.history_sheet, snapshot).await {
            warn!("Failed to log history snapshot for {}: {}", id, e);
        }
    }
}
