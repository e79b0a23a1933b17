use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::discipline::{Discipline, DisciplineConfig};
use crate::utils::dedup_preserving_order;
use crate::workflow::WorkflowStatus;
use crate::ORGANIZATION;

/// Revision label used when none is given
pub const DEFAULT_REVISION: &str = "R-00";

/// Party that furnishes a matrix line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Siarcon,
    Supplier,
}

impl Party {
    /// Column label for this party given the record's supplier name
    pub fn label(self, supplier: &str) -> String {
        match self {
            Party::Siarcon => ORGANIZATION.to_string(),
            Party::Supplier => supplier.to_uppercase(),
        }
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Party::Siarcon => serializer.serialize_str(ORGANIZATION),
            Party::Supplier => serializer.serialize_str("FORNECEDOR"),
        }
    }
}

impl<'de> Deserialize<'de> for Party {
    /// "SIARCON" is the prime contractor; any other value names the supplier
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(serde::de::Error::custom("matrix party cannot be empty"));
        }
        if value.eq_ignore_ascii_case(ORGANIZATION) {
            Ok(Party::Siarcon)
        } else {
            Ok(Party::Supplier)
        }
    }
}

/// Line item -> furnishing party
pub type ResponsibilityMatrix = BTreeMap<String, Party>;

/// Category -> reference items offered in the selection inputs
pub type ReferenceCatalog = BTreeMap<String, BTreeSet<String>>;

/// Result of teaching the catalog a new reference item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum LearnOutcome {
    Learned,
    Duplicate,
    Empty,
    Failed(String),
}

/// Supplier directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub tax_id: String,
}

/// A persisted scope package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Assigned by the store on creation
    #[serde(default)]
    pub id: Option<String>,
    pub client: String,
    pub site: String,
    pub discipline: Discipline,
    pub supplier: String,
    pub engineering_responsible: String,
    pub works_responsible: String,
    pub supply_responsible: String,
    pub revision: String,
    pub reference_docs: String,
    pub summary: String,
    pub technical_items: Vec<String>,
    pub technical_notes: String,
    pub quality_items: Vec<String>,
    pub quality_notes: String,
    pub matrix: ResponsibilityMatrix,
    pub safety_items: Vec<String>,
    pub safety_notes: String,
    pub start_date: Option<NaiveDate>,
    pub integration_days: u32,
    pub end_date: Option<NaiveDate>,
    pub observations: String,
    pub total_value: String,
    pub payment_terms: String,
    pub commercial_info: String,
    pub status: WorkflowStatus,
    pub attachments: Vec<String>,
}

impl ProjectRecord {
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Cleans submitted values before generation and persistence.
    ///
    /// Forces the discipline, fills the supplier placeholder and default
    /// revision, trims free text and deduplicates the item lists.
    pub fn normalize(mut self, config: &DisciplineConfig) -> Self {
        self.discipline = config.discipline;

        for field in [
            &mut self.client,
            &mut self.site,
            &mut self.supplier,
            &mut self.engineering_responsible,
            &mut self.works_responsible,
            &mut self.supply_responsible,
            &mut self.revision,
            &mut self.reference_docs,
            &mut self.summary,
            &mut self.technical_notes,
            &mut self.quality_notes,
            &mut self.safety_notes,
            &mut self.observations,
            &mut self.total_value,
            &mut self.payment_terms,
            &mut self.commercial_info,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }

        if self.supplier.is_empty() {
            self.supplier = config.default_supplier_placeholder.clone();
        }
        if self.revision.is_empty() {
            self.revision = DEFAULT_REVISION.to_string();
        }

        self.technical_items = dedup_preserving_order(self.technical_items);
        self.quality_items = dedup_preserving_order(self.quality_items);
        self.safety_items = dedup_preserving_order(self.safety_items);
        self.attachments = dedup_preserving_order(self.attachments);
        self.matrix = self
            .matrix
            .into_iter()
            .map(|(item, party)| (item.trim().to_string(), party))
            .filter(|(item, _)| !item.is_empty())
            .collect();
        self
    }
}

/// Form submission for one discipline page.
///
/// Carries no identifier or discipline: both come from the request route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecordInput {
    pub client: String,
    pub site: String,
    pub supplier: String,
    pub engineering_responsible: String,
    pub works_responsible: String,
    pub supply_responsible: String,
    pub revision: String,
    pub reference_docs: String,
    pub summary: String,
    pub technical_items: Vec<String>,
    pub technical_notes: String,
    pub quality_items: Vec<String>,
    pub quality_notes: String,
    pub matrix: ResponsibilityMatrix,
    pub safety_items: Vec<String>,
    pub safety_notes: String,
    pub start_date: Option<NaiveDate>,
    pub integration_days: u32,
    pub end_date: Option<NaiveDate>,
    pub observations: String,
    pub total_value: String,
    pub payment_terms: String,
    pub commercial_info: String,
    pub status: WorkflowStatus,
    pub attachments: Vec<String>,
}

impl ProjectRecordInput {
    /// Builds the normalized record for the given discipline page
    pub fn into_record(self, config: &DisciplineConfig) -> ProjectRecord {
        ProjectRecord {
            id: None,
            client: self.client,
            site: self.site,
            discipline: config.discipline,
            supplier: self.supplier,
            engineering_responsible: self.engineering_responsible,
            works_responsible: self.works_responsible,
            supply_responsible: self.supply_responsible,
            revision: self.revision,
            reference_docs: self.reference_docs,
            summary: self.summary,
            technical_items: self.technical_items,
            technical_notes: self.technical_notes,
            quality_items: self.quality_items,
            quality_notes: self.quality_notes,
            matrix: self.matrix,
            safety_items: self.safety_items,
            safety_notes: self.safety_notes,
            start_date: self.start_date,
            integration_days: self.integration_days,
            end_date: self.end_date,
            observations: self.observations,
            total_value: self.total_value,
            payment_terms: self.payment_terms,
            commercial_info: self.commercial_info,
            status: self.status,
            attachments: self.attachments,
        }
        .normalize(config)
    }
}
