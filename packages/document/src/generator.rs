// ABOUTME: Builds the contract-scope document of a project record
// ABOUTME: Pure and deterministic for a fixed generation date

use chrono::NaiveDate;
use escopo_core::{DisciplineConfig, Party, ProjectRecord, ORGANIZATION};

use crate::currency::format_currency;
use crate::model::{Block, Document};
use crate::{RenderError, RenderResult};

pub const HEADER_BANNER: &str = "SIARCON ENGENHARIA - CLIMATIZAÇÃO E UTILIDADES";
pub const FOOTER_BANNER: &str = "Documento gerado pelo sistema de escopos SIARCON";

pub const SECTION_OBJECTIVE: &str = "OBJETIVO";
pub const SECTION_TECHNICAL: &str = "ESCOPO TÉCNICO";
pub const SECTION_QUALITY: &str = "QUALIDADE";
pub const SECTION_MATRIX: &str = "MATRIZ DE RESPONSABILIDADES";
pub const SECTION_SAFETY: &str = "SMS - SEGURANÇA, MEIO AMBIENTE E SAÚDE";
pub const SECTION_SCHEDULE: &str = "CRONOGRAMA";
pub const SECTION_OBSERVATIONS: &str = "OBSERVAÇÕES GERAIS";
pub const SECTION_COMMERCIAL: &str = "COMERCIAL";

const DATE_FORMAT: &str = "%d/%m/%Y";
const MARK: &str = "X";

/// Generates the scope document for `record`.
///
/// `today` only feeds the date line, so the same record and date always
/// produce the same document. Optional sections are left out and the
/// remaining ones renumbered.
pub fn generate(
    record: &ProjectRecord,
    config: &DisciplineConfig,
    today: NaiveDate,
) -> RenderResult<Document> {
    require(&record.client, "client")?;
    require(&record.site, "site")?;
    require(&record.supplier, "supplier")?;
    let start_date = record.start_date.ok_or(RenderError::MissingField("start_date"))?;

    let mut sections = Sections::default();

    sections.open(SECTION_OBJECTIVE);
    sections.push(Block::KeyValue(vec![
        pair("Cliente", &record.client),
        pair("Obra", &record.site),
        pair("Documentos de referência", &record.reference_docs),
        pair("Fornecedor", &record.supplier),
        pair("Responsável engenharia", &record.engineering_responsible),
        pair("Responsável obras", &record.works_responsible),
        pair("Responsável suprimentos", &record.supply_responsible),
    ]));
    sections.paragraph(&record.summary);

    sections.open(SECTION_TECHNICAL);
    sections.push(Block::Bullets(record.technical_items.clone()));
    sections.paragraph(&record.technical_notes);

    sections.open(SECTION_QUALITY);
    sections.push(Block::Bullets(record.quality_items.clone()));
    sections.paragraph(&record.quality_notes);

    sections.open(SECTION_MATRIX);
    sections.push(matrix_table(record, config));

    sections.open(SECTION_SAFETY);
    sections.push(Block::Bullets(safety_items(record, config)));
    sections.paragraph(&record.safety_notes);

    sections.open(SECTION_SCHEDULE);
    let mut schedule = vec![
        pair("Início", &start_date.format(DATE_FORMAT).to_string()),
        pair(
            "Prazo de integração",
            &format!("{} dias", record.integration_days),
        ),
    ];
    if let Some(end_date) = record.end_date {
        schedule.push(pair("Término", &end_date.format(DATE_FORMAT).to_string()));
    }
    sections.push(Block::KeyValue(schedule));

    if !record.observations.is_empty() {
        sections.open(SECTION_OBSERVATIONS);
        sections.paragraph(&record.observations);
    }

    if record.status.is_finalized() {
        sections.open(SECTION_COMMERCIAL);
        let total = if record.total_value.is_empty() {
            String::new()
        } else {
            format_currency(&record.total_value)
        };
        sections.push(Block::KeyValue(vec![
            pair("Valor total", &total),
            pair("Condições de pagamento", &record.payment_terms),
        ]));
        sections.paragraph(&record.commercial_info);
    }

    let mut document = Document::default();
    document.push(Block::Banner(HEADER_BANNER.to_string()));
    document.push(Block::Title(format!(
        "Escopo de fornecimento — {}",
        config.name
    )));
    document.push(Block::Paragraph(format!(
        "Data: {} | Revisão: {}",
        today.format(DATE_FORMAT),
        record.revision
    )));
    document.blocks.extend(sections.blocks);
    document.push(Block::Banner(FOOTER_BANNER.to_string()));
    document.push(Block::Signature(format!("DE ACORDO: {}", record.supplier)));
    Ok(document)
}

/// File name offered for download, e.g. `Escopo_hidraulica_Plant_7_R-00.docx`
pub fn document_file_name(record: &ProjectRecord) -> String {
    format!(
        "Escopo_{}_{}_{}.docx",
        record.discipline.slug(),
        file_safe(&record.site),
        file_safe(&record.revision)
    )
}

#[derive(Default)]
struct Sections {
    blocks: Vec<Block>,
    next_number: usize,
}

impl Sections {
    fn open(&mut self, title: &str) {
        self.next_number += 1;
        self.blocks.push(Block::Heading {
            number: self.next_number,
            title: title.to_string(),
        });
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn paragraph(&mut self, text: &str) {
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(text.to_string()));
        }
    }
}

fn require(value: &str, field: &'static str) -> RenderResult<()> {
    if value.trim().is_empty() {
        return Err(RenderError::MissingField(field));
    }
    Ok(())
}

fn pair(label: &str, value: &str) -> (String, String) {
    (label.to_string(), value.to_string())
}

/// Catalog items first in catalog order, then any others the record carries
fn matrix_table(record: &ProjectRecord, config: &DisciplineConfig) -> Block {
    let catalog_rows = config
        .matrix_item_catalog
        .iter()
        .filter_map(|item| record.matrix.get(*item).map(|party| (*item, *party)));
    let other_rows = record
        .matrix
        .iter()
        .filter(|(item, _)| !config.is_matrix_item(item))
        .map(|(item, party)| (item.as_str(), *party));

    let rows = catalog_rows
        .chain(other_rows)
        .map(|(item, party)| {
            let (ours, theirs) = match party {
                Party::Siarcon => (MARK, ""),
                Party::Supplier => ("", MARK),
            };
            vec![item.to_string(), ours.to_string(), theirs.to_string()]
        })
        .collect();

    Block::Table {
        header: vec![
            "Item".to_string(),
            ORGANIZATION.to_string(),
            Party::Supplier.label(&record.supplier),
        ],
        rows,
    }
}

fn safety_items(record: &ProjectRecord, config: &DisciplineConfig) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let standard = config.standard_safety_docs.iter().map(|doc| doc.to_string());
    for item in standard.chain(record.safety_items.iter().cloned()) {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    items
}

fn file_safe(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "documento".to_string()
    } else {
        trimmed.to_string()
    }
}
