// ABOUTME: Core types, discipline catalog and workflow rules for Escopo
// ABOUTME: Foundational package shared by storage, document generation and the API

pub mod discipline;
pub mod types;
pub mod utils;
pub mod validation;
pub mod workflow;

// Re-export main types
pub use discipline::{Discipline, DisciplineConfig, ParseDisciplineError, SAFETY_CATEGORY};
pub use types::{
    LearnOutcome, Party, ProjectRecord, ProjectRecordInput, ReferenceCatalog,
    ResponsibilityMatrix, Supplier, DEFAULT_REVISION,
};
pub use workflow::{classify, KanbanStage, WorkflowStatus};

// Re-export utilities
pub use utils::{dedup_preserving_order, generate_record_id};

// Re-export validation
pub use validation::{validate_record, ValidationError};

/// Organization name printed in documents and used as the prime-contractor party
pub const ORGANIZATION: &str = "SIARCON";
