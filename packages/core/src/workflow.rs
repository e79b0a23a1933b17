// ABOUTME: Approval workflow statuses and their Kanban stage classification
// ABOUTME: The finalized status is terminal and makes a record read-only

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a scope package.
///
/// Six canonical values are accepted on submission. `Draft` is never
/// submitted; it stands in for any unrecognized status text read back
/// from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum WorkflowStatus {
    Draft,
    #[default]
    InEngineering,
    AwaitingWorks,
    ReceivedBySupply,
    SentForQuote,
    InNegotiation,
    ContractFinalized,
}

impl WorkflowStatus {
    pub const CANONICAL: [WorkflowStatus; 6] = [
        WorkflowStatus::InEngineering,
        WorkflowStatus::AwaitingWorks,
        WorkflowStatus::ReceivedBySupply,
        WorkflowStatus::SentForQuote,
        WorkflowStatus::InNegotiation,
        WorkflowStatus::ContractFinalized,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "Rascunho",
            WorkflowStatus::InEngineering => "Em Elaboração (Engenharia)",
            WorkflowStatus::AwaitingWorks => "Aguardando Obras",
            WorkflowStatus::ReceivedBySupply => "Recebido (Suprimentos)",
            WorkflowStatus::SentForQuote => "Enviado para Cotação",
            WorkflowStatus::InNegotiation => "Em Negociação",
            WorkflowStatus::ContractFinalized => "Contratação Finalizada",
        }
    }

    /// Resolves one of the canonical labels; anything else yields `None`
    pub fn parse(text: &str) -> Option<WorkflowStatus> {
        let wanted = text.trim().to_lowercase();
        Self::CANONICAL
            .into_iter()
            .find(|status| status.label().to_lowercase() == wanted)
    }

    pub fn is_canonical(self) -> bool {
        self != WorkflowStatus::Draft
    }

    pub fn is_finalized(self) -> bool {
        self == WorkflowStatus::ContractFinalized
    }

    /// Only the terminal status freezes a record
    pub fn is_editable(self) -> bool {
        !self.is_finalized()
    }

    pub fn stage(self) -> KanbanStage {
        match self {
            WorkflowStatus::Draft => KanbanStage::ToStart,
            WorkflowStatus::InEngineering | WorkflowStatus::AwaitingWorks => {
                KanbanStage::EngineeringAndWorks
            }
            WorkflowStatus::ReceivedBySupply
            | WorkflowStatus::SentForQuote
            | WorkflowStatus::InNegotiation => KanbanStage::Supply,
            WorkflowStatus::ContractFinalized => KanbanStage::Contracted,
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for WorkflowStatus {
    fn from(value: String) -> Self {
        WorkflowStatus::parse(&value).unwrap_or(WorkflowStatus::Draft)
    }
}

impl From<WorkflowStatus> for String {
    fn from(value: WorkflowStatus) -> Self {
        value.label().to_string()
    }
}

/// Coarse board column derived from the workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanStage {
    ToStart,
    EngineeringAndWorks,
    Supply,
    Contracted,
}

impl KanbanStage {
    pub const ALL: [KanbanStage; 4] = [
        KanbanStage::ToStart,
        KanbanStage::EngineeringAndWorks,
        KanbanStage::Supply,
        KanbanStage::Contracted,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            KanbanStage::ToStart => 0,
            KanbanStage::EngineeringAndWorks => 1,
            KanbanStage::Supply => 2,
            KanbanStage::Contracted => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KanbanStage::ToStart => "A Iniciar",
            KanbanStage::EngineeringAndWorks => "Engenharia / Obras",
            KanbanStage::Supply => "Suprimentos",
            KanbanStage::Contracted => "Contratado",
        }
    }
}

/// Maps free-text status to its Kanban stage; unmapped text lands in stage 0
pub fn classify(status_text: &str) -> KanbanStage {
    WorkflowStatus::parse(status_text)
        .map(WorkflowStatus::stage)
        .unwrap_or(KanbanStage::ToStart)
}
