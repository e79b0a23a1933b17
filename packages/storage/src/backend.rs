use async_trait::async_trait;

use crate::StorageResult;

/// One worksheet row, header excluded
pub type Row = Vec<String>;

/// Worksheet-level access to the remote table.
///
/// Updates and deletes address a row by its key, the value of its first
/// cell, so a concurrent delete elsewhere in the sheet never shifts the
/// target onto another row.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    async fn read_rows(&self, sheet: &str) -> StorageResult<Vec<Row>>;
    async fn append_row(&self, sheet: &str, row: Row) -> StorageResult<()>;

    /// Replaces the row keyed `key`; `NotFound` when no row carries it
    async fn update_row(&self, sheet: &str, key: &str, row: Row) -> StorageResult<()>;

    /// Removes the row keyed `key`, returning whether one existed
    async fn delete_row(&self, sheet: &str, key: &str) -> StorageResult<bool>;
}

/// Position of the first row whose first cell equals `key`
pub(crate) fn find_row_index(rows: &[Row], key: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.first().map(|cell| cell.trim()) == Some(key))
}
