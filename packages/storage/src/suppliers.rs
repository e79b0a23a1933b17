use escopo_config::SHEET_SUPPLIERS;
use escopo_core::Supplier;
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::TableBackend;
use crate::StorageResult;

/// Supplier name -> CNPJ lookup over the "Fornecedores" worksheet
#[derive(Clone)]
pub struct SupplierDirectory {
    backend: Arc<dyn TableBackend>,
    sheet: String,
}

impl SupplierDirectory {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            backend,
            sheet: SHEET_SUPPLIERS.to_string(),
        }
    }

    pub async fn list_suppliers(&self) -> StorageResult<Vec<Supplier>> {
        let rows = self.backend.read_rows(&self.sheet).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let name = row.first()?.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                let tax_id = row.get(1).map(|t| t.trim().to_string()).unwrap_or_default();
                Some(Supplier { name, tax_id })
            })
            .collect())
    }

    pub async fn find(&self, name: &str) -> StorageResult<Option<Supplier>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list_suppliers()
            .await?
            .into_iter()
            .find(|supplier| supplier.name.to_lowercase() == wanted))
    }

    /// Adds a supplier; false for a blank name, a known name or a backend failure
    pub async fn register_supplier(&self, name: &str, tax_id: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        match self.find(name).await {
            Ok(Some(existing)) => {
                info!("Supplier '{}' already registered", existing.name);
                return false;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Could not check supplier directory: {}", e);
                return false;
            }
        }

        let row = vec![name.to_string(), tax_id.trim().to_string()];
        match self.backend.append_row(&self.sheet, row).await {
            Ok(()) => {
                info!("Registered supplier '{}'", name);
                true
            }
            Err(e) => {
                warn!("Failed to register supplier '{}': {}", name, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTableBackend;

    #[tokio::test]
    async fn test_register_and_list() {
        let directory = SupplierDirectory::new(Arc::new(MemoryTableBackend::new()));

        assert!(directory.register_supplier("ACME", "12.345.678/0001-90").await);
        assert!(!directory.register_supplier(" acme ", "other").await);
        assert!(!directory.register_supplier("  ", "x").await);

        let suppliers = directory.list_suppliers().await.unwrap();
        assert_eq!(
            suppliers,
            vec![Supplier {
                name: "ACME".to_string(),
                tax_id: "12.345.678/0001-90".to_string(),
            }]
        );
        assert!(directory.find("Acme").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_fails_when_backend_down() {
        let backend = Arc::new(MemoryTableBackend::new());
        backend.set_unavailable(true);
        let directory = SupplierDirectory::new(backend);

        assert!(!directory.register_supplier("ACME", "1").await);
        assert!(directory.list_suppliers().await.is_err());
    }
}
