// ABOUTME: Options store client over the "Config" worksheet
// ABOUTME: Loads categorized reference items and learns new ones without duplicates

use escopo_config::SHEET_CONFIG;
use escopo_core::{DisciplineConfig, LearnOutcome, ReferenceCatalog};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::TableBackend;
use crate::StorageError;

/// Catalog plus the failure that forced an empty fallback, if any
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: ReferenceCatalog,
    pub error: Option<StorageError>,
}

impl LoadedCatalog {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Clone)]
pub struct OptionsStore {
    backend: Arc<dyn TableBackend>,
    sheet: String,
}

fn empty_catalog() -> ReferenceCatalog {
    DisciplineConfig::known_categories()
        .into_iter()
        .map(|category| (category, Default::default()))
        .collect()
}

impl OptionsStore {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            backend,
            sheet: SHEET_CONFIG.to_string(),
        }
    }

    /// Fetches every (category, item) row grouped by category.
    ///
    /// Known categories are always present. A backend failure yields the
    /// empty structure with the error attached instead of failing.
    pub async fn load_catalog(&self) -> LoadedCatalog {
        let mut catalog = empty_catalog();

        let rows = match self.backend.read_rows(&self.sheet).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load reference catalog: {}", e);
                return LoadedCatalog {
                    catalog,
                    error: Some(e),
                };
            }
        };

        for row in rows {
            let (Some(category), Some(item)) = (row.first(), row.get(1)) else {
                continue;
            };
            let (category, item) = (category.trim(), item.trim());
            if category.is_empty() || item.is_empty() {
                continue;
            }
            catalog
                .entry(category.to_string())
                .or_default()
                .insert(item.to_string());
        }

        debug!("Loaded reference catalog with {} categories", catalog.len());
        LoadedCatalog {
            catalog,
            error: None,
        }
    }

    /// Appends `item` under `category` unless it is blank or already known
    pub async fn learn(&self, category: &str, item: &str) -> LearnOutcome {
        let item = item.trim();
        if item.is_empty() {
            return LearnOutcome::Empty;
        }
        let category = category.trim();
        if category.is_empty() {
            return LearnOutcome::Failed("Category is required".to_string());
        }

        let rows = match self.backend.read_rows(&self.sheet).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Could not check catalog before learning '{}': {}", item, e);
                return LearnOutcome::Failed(e.to_string());
            }
        };

        let exists = rows.iter().any(|row| {
            row.first().map(|c| c.trim()) == Some(category)
                && row.get(1).map(|i| i.trim()) == Some(item)
        });
        if exists {
            debug!("Reference item '{}' already in '{}'", item, category);
            return LearnOutcome::Duplicate;
        }

        match self
            .backend
            .append_row(&self.sheet, vec![category.to_string(), item.to_string()])
            .await
        {
            Ok(()) => {
                info!("Learned reference item '{}' in '{}'", item, category);
                LearnOutcome::Learned
            }
            Err(e) => {
                warn!("Failed to learn reference item '{}': {}", item, e);
                LearnOutcome::Failed(e.to_string())
            }
        }
    }
}
