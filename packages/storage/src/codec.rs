// ABOUTME: Column layout of the project worksheets and row <-> record conversion
// ABOUTME: Lists and the responsibility matrix are JSON-encoded cells

use chrono::NaiveDate;
use escopo_core::{Discipline, Party, ProjectRecord, ResponsibilityMatrix, WorkflowStatus};
use std::collections::BTreeMap;

use crate::backend::Row;
use crate::{StorageError, StorageResult};

/// Header of the "Projetos" worksheet, in column order
pub const RECORD_COLUMNS: [&str; 27] = [
    "ID",
    "Cliente",
    "Obra",
    "Disciplina",
    "Fornecedor",
    "Resp. Engenharia",
    "Resp. Obras",
    "Resp. Suprimentos",
    "Revisão",
    "Documentos de Referência",
    "Resumo",
    "Itens Técnicos",
    "Obs. Técnicas",
    "Itens Qualidade",
    "Obs. Qualidade",
    "Matriz",
    "Itens SMS",
    "Obs. SMS",
    "Data Início",
    "Prazo Integração (dias)",
    "Data Término",
    "Observações Gerais",
    "Valor Total",
    "Condições de Pagamento",
    "Info Comercial",
    "Status",
    "Anexos",
];

/// ID, client, site and discipline must be present for a row to be usable
const REQUIRED_COLUMNS: usize = 4;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn encode_list(items: &[String]) -> StorageResult<String> {
    Ok(serde_json::to_string(items)?)
}

fn encode_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// The matrix is stored as item -> party name, where the supplier party is
/// written under the supplier's own name.
fn encode_matrix(matrix: &ResponsibilityMatrix, supplier: &str) -> StorageResult<String> {
    let named: BTreeMap<&str, String> = matrix
        .iter()
        .map(|(item, party)| {
            let name = match party {
                Party::Siarcon => escopo_core::ORGANIZATION.to_string(),
                Party::Supplier if supplier.trim().is_empty() => "FORNECEDOR".to_string(),
                Party::Supplier => supplier.to_string(),
            };
            (item.as_str(), name)
        })
        .collect();
    Ok(serde_json::to_string(&named)?)
}

/// Encodes a record as a worksheet row under the given identifier
pub fn record_to_row(record: &ProjectRecord, id: &str) -> StorageResult<Row> {
    Ok(vec![
        id.to_string(),
        record.client.clone(),
        record.site.clone(),
        record.discipline.name().to_string(),
        record.supplier.clone(),
        record.engineering_responsible.clone(),
        record.works_responsible.clone(),
        record.supply_responsible.clone(),
        record.revision.clone(),
        record.reference_docs.clone(),
        record.summary.clone(),
        encode_list(&record.technical_items)?,
        record.technical_notes.clone(),
        encode_list(&record.quality_items)?,
        record.quality_notes.clone(),
        encode_matrix(&record.matrix, &record.supplier)?,
        encode_list(&record.safety_items)?,
        record.safety_notes.clone(),
        encode_date(record.start_date),
        record.integration_days.to_string(),
        encode_date(record.end_date),
        record.observations.clone(),
        record.total_value.clone(),
        record.payment_terms.clone(),
        record.commercial_info.clone(),
        record.status.label().to_string(),
        encode_list(&record.attachments)?,
    ])
}

/// Reads cells by position; the backend may drop trailing empty cells
struct Cells<'a> {
    row: &'a [String],
    id: &'a str,
}

impl<'a> Cells<'a> {
    fn text(&self, index: usize) -> String {
        self.row.get(index).cloned().unwrap_or_default()
    }

    fn malformed(&self, column: usize, reason: impl std::fmt::Display) -> StorageError {
        StorageError::Malformed(format!(
            "row {} column '{}': {}",
            self.id, RECORD_COLUMNS[column], reason
        ))
    }

    fn list(&self, index: usize) -> StorageResult<Vec<String>> {
        let raw = self.text(index);
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| self.malformed(index, e))
    }

    fn matrix(&self, index: usize) -> StorageResult<ResponsibilityMatrix> {
        let raw = self.text(index);
        if raw.trim().is_empty() {
            return Ok(ResponsibilityMatrix::new());
        }
        serde_json::from_str(&raw).map_err(|e| self.malformed(index, e))
    }

    fn date(&self, index: usize) -> StorageResult<Option<NaiveDate>> {
        let raw = self.text(index);
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|e| self.malformed(index, e))
    }

    fn days(&self, index: usize) -> StorageResult<u32> {
        let raw = self.text(index);
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<u32>().map_err(|e| self.malformed(index, e))
    }
}

/// Decodes a worksheet row; rows missing required columns are malformed
pub fn row_to_record(row: &[String]) -> StorageResult<ProjectRecord> {
    let id = row.first().map(|s| s.trim()).unwrap_or_default();
    let cells = Cells { row, id };

    if let Some(missing) = (0..REQUIRED_COLUMNS).find(|&i| cells.text(i).trim().is_empty()) {
        return Err(cells.malformed(missing, "required value missing"));
    }

    let discipline: Discipline = cells
        .text(3)
        .parse()
        .map_err(|e| cells.malformed(3, e))?;

    Ok(ProjectRecord {
        id: Some(id.to_string()),
        client: cells.text(1),
        site: cells.text(2),
        discipline,
        supplier: cells.text(4),
        engineering_responsible: cells.text(5),
        works_responsible: cells.text(6),
        supply_responsible: cells.text(7),
        revision: cells.text(8),
        reference_docs: cells.text(9),
        summary: cells.text(10),
        technical_items: cells.list(11)?,
        technical_notes: cells.text(12),
        quality_items: cells.list(13)?,
        quality_notes: cells.text(14),
        matrix: cells.matrix(15)?,
        safety_items: cells.list(16)?,
        safety_notes: cells.text(17),
        start_date: cells.date(18)?,
        integration_days: cells.days(19)?,
        end_date: cells.date(20)?,
        observations: cells.text(21),
        total_value: cells.text(22),
        payment_terms: cells.text(23),
        commercial_info: cells.text(24),
        status: WorkflowStatus::from(cells.text(25)),
        attachments: cells.list(26)?,
    })
}
