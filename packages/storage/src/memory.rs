use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::backend::{find_row_index, Row, TableBackend};
use crate::{StorageError, StorageResult};

/// In-process table, for local development and tests
#[derive(Default)]
pub struct MemoryTableBackend {
    sheets: RwLock<HashMap<String, Vec<Row>>>,
    unavailable: AtomicBool,
}

impl MemoryTableBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a sheet with rows
    pub fn with_rows(mut self, sheet: &str, rows: Vec<Row>) -> Self {
        self.sheets
            .get_mut()
            .entry(sheet.to_string())
            .or_default()
            .extend(rows);
        self
    }

    /// Makes every call fail as if the remote store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn rows(&self, sheet: &str) -> Vec<Row> {
        self.sheets
            .read()
            .await
            .get(sheet)
            .cloned()
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Backend("memory backend marked unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TableBackend for MemoryTableBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read_rows(&self, sheet: &str) -> StorageResult<Vec<Row>> {
        self.ensure_available()?;
        Ok(self.rows(sheet).await)
    }

    async fn append_row(&self, sheet: &str, row: Row) -> StorageResult<()> {
        self.ensure_available()?;
        self.sheets
            .write()
            .await
            .entry(sheet.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn update_row(&self, sheet: &str, key: &str, row: Row) -> StorageResult<()> {
        self.ensure_available()?;
        let mut sheets = self.sheets.write().await;
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StorageError::NotFound(format!("{} row {}", sheet, key)))?;
        let index = find_row_index(rows, key)
            .ok_or_else(|| StorageError::NotFound(format!("{} row {}", sheet, key)))?;
        rows[index] = row;
        Ok(())
    }

    async fn delete_row(&self, sheet: &str, key: &str) -> StorageResult<bool> {
        self.ensure_available()?;
        let mut sheets = self.sheets.write().await;
        let Some(rows) = sheets.get_mut(sheet) else {
            return Ok(false);
        };
        match find_row_index(rows, key) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
