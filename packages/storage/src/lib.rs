//! # Escopo Storage
//!
//! Clients for the remote table store: the reference catalog ("Config"),
//! the project records ("Projetos" plus the "Historico" log) and the
//! supplier directory ("Fornecedores"). Every backend failure surfaces as a
//! [`StorageError`]; nothing from the transport leaks past this crate.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod catalog;
pub mod codec;
pub mod http;
pub mod memory;
pub mod records;
pub mod suppliers;

pub use backend::{Row, TableBackend};
pub use catalog::{LoadedCatalog, OptionsStore};
pub use http::HttpTableBackend;
pub use memory::MemoryTableBackend;
pub use records::ProjectRecordStore;
pub use suppliers::SupplierDirectory;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Table backend unavailable: {0}")]
    Backend(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Malformed row: {0}")]
    Malformed(String),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// True for transport, authentication and upstream failures
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Backend(_))
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Which table backend to talk to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StorageProvider {
    Http {
        base_url: String,
        table: String,
        token: Option<String>,
        timeout_secs: u64,
    },
    Memory,
}

impl StorageProvider {
    pub fn build(&self) -> StorageResult<Arc<dyn TableBackend>> {
        match self {
            StorageProvider::Http {
                base_url,
                table,
                token,
                timeout_secs,
            } => Ok(Arc::new(HttpTableBackend::new(
                base_url,
                table,
                token.clone(),
                Duration::from_secs(*timeout_secs),
            )?)),
            StorageProvider::Memory => Ok(Arc::new(MemoryTableBackend::new())),
        }
    }
}

/// The three store clients sharing one backend
#[derive(Clone)]
pub struct Stores {
    pub options: OptionsStore,
    pub records: ProjectRecordStore,
    pub suppliers: SupplierDirectory,
}

impl Stores {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            options: OptionsStore::new(backend.clone()),
            records: ProjectRecordStore::new(backend.clone()),
            suppliers: SupplierDirectory::new(backend),
        }
    }
}
