use escopo_core::{classify, Discipline, KanbanStage, ProjectRecord};
use serde::Serialize;

/// One record as shown on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanCard {
    pub id: String,
    pub client: String,
    pub site: String,
    pub discipline: Discipline,
    pub supplier: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanColumn {
    pub stage: KanbanStage,
    pub ordinal: u8,
    pub title: &'static str,
    pub cards: Vec<KanbanCard>,
}

/// Records grouped into the four workflow stages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    pub fn build(records: &[ProjectRecord]) -> Self {
        let mut columns: Vec<KanbanColumn> = KanbanStage::ALL
            .into_iter()
            .map(|stage| KanbanColumn {
                stage,
                ordinal: stage.ordinal(),
                title: stage.title(),
                cards: Vec::new(),
            })
            .collect();

        for record in records {
            let status = record.status.label();
            let stage = classify(status);
            let card = KanbanCard {
                id: record.id.clone().unwrap_or_default(),
                client: record.client.clone(),
                site: record.site.clone(),
                discipline: record.discipline,
                supplier: record.supplier.clone(),
                status: status.to_string(),
            };
            if let Some(column) = columns.iter_mut().find(|c| c.stage == stage) {
                column.cards.push(card);
            }
        }

        Self { columns }
    }

    pub fn column(&self, stage: KanbanStage) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.stage == stage)
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
