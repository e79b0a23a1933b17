// ABOUTME: One controller shared by every discipline page
// ABOUTME: Normalizes, validates, generates the scope document and persists the record

use chrono::{Local, NaiveDate};
use escopo_core::{
    validate_record, Discipline, DisciplineConfig, ProjectRecord, ProjectRecordInput,
    ValidationError,
};
use escopo_document::{
    bundle_attachments, document_file_name, generate, notification_link, render_docx, Attachment,
    RenderError,
};
use escopo_storage::{StorageError, Stores};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Controller errors
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Validation errors: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record {0} is finalized and can no longer be edited")]
    ReadOnly(String),
    #[error("Record {id} belongs to {found}, not {expected}")]
    DisciplineMismatch {
        id: String,
        expected: Discipline,
        found: Discipline,
    },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Document error: {0}")]
    Render(#[from] RenderError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Per-request state: the generation date and the record being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub today: NaiveDate,
    pub edit_target: Option<String>,
}

impl RequestContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            edit_target: None,
        }
    }

    /// Context for a request arriving now
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.edit_target = Some(id.into());
        self
    }
}

/// Result of a submit: the record is saved even when the document failed
#[derive(Debug)]
pub struct SubmitOutcome {
    pub id: String,
    pub record: ProjectRecord,
    pub document: Result<Vec<u8>, RenderError>,
}

impl SubmitOutcome {
    pub fn document_file_name(&self) -> String {
        document_file_name(&self.record)
    }
}

/// A rendered file ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct DisciplineController {
    config: DisciplineConfig,
    stores: Stores,
}

impl DisciplineController {
    pub fn new(discipline: Discipline, stores: Stores) -> Self {
        Self {
            config: discipline.config(),
            stores,
        }
    }

    pub fn config(&self) -> &DisciplineConfig {
        &self.config
    }

    /// Saves a form submission, creating a record or updating `ctx.edit_target`.
    ///
    /// Nothing is written when validation fails or the target cannot be
    /// edited. A document failure is reported in the outcome and does not
    /// prevent the save.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        input: ProjectRecordInput,
    ) -> ControllerResult<SubmitOutcome> {
        let mut record = input.into_record(&self.config);

        let errors = validate_record(&record, &self.config);
        if !errors.is_empty() {
            debug!(
                "Rejected {} submission with {} errors",
                self.config.name,
                errors.len()
            );
            return Err(ControllerError::Validation(errors));
        }

        if let Some(id) = ctx.edit_target.as_deref() {
            self.ensure_editable(id).await?;
        }

        let document = generate(&record, &self.config, ctx.today).and_then(|doc| render_docx(&doc));
        if let Err(e) = &document {
            warn!("Document generation failed for {} record: {}", self.config.name, e);
        }

        let id = self
            .stores
            .records
            .create_or_update(&record, ctx.edit_target.as_deref())
            .await?;
        record.id = Some(id.clone());

        info!(
            "Saved {} record {} for '{}' ({})",
            self.config.name,
            id,
            record.site,
            record.status.label()
        );
        Ok(SubmitOutcome {
            id,
            record,
            document,
        })
    }

    /// Renders the document of a stored record; allowed in every status
    pub async fn document(&self, ctx: &RequestContext, id: &str) -> ControllerResult<RenderedFile> {
        let record = self.get(id).await?;
        let document = generate(&record, &self.config, ctx.today)?;
        Ok(RenderedFile {
            file_name: document_file_name(&record),
            bytes: render_docx(&document)?,
        })
    }

    /// Zips the record's document with the given attachments
    pub async fn document_bundle(
        &self,
        ctx: &RequestContext,
        id: &str,
        attachments: &[Attachment],
    ) -> ControllerResult<RenderedFile> {
        let document = self.document(ctx, id).await?;
        let bytes = bundle_attachments(&document.file_name, &document.bytes, attachments)?;
        let file_name = match document.file_name.strip_suffix(".docx") {
            Some(stem) => format!("{}.zip", stem),
            None => format!("{}.zip", document.file_name),
        };
        Ok(RenderedFile { file_name, bytes })
    }

    pub async fn list(&self) -> ControllerResult<Vec<ProjectRecord>> {
        Ok(self
            .stores
            .records
            .list_by_discipline(self.config.discipline)
            .await?)
    }

    /// A record of this discipline; records of other disciplines are not found
    pub async fn get(&self, id: &str) -> ControllerResult<ProjectRecord> {
        match self.stores.records.find_by_id(id).await? {
            Some(record) if record.discipline == self.config.discipline => Ok(record),
            _ => Err(ControllerError::NotFound(id.to_string())),
        }
    }

    pub async fn notification_link(&self, id: &str, recipient: &str) -> ControllerResult<String> {
        let recipient = recipient.trim();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(ControllerError::Validation(vec![ValidationError::new(
                "to",
                "A valid e-mail address is required",
            )]));
        }
        let record = self.get(id).await?;
        Ok(notification_link(recipient, &record))
    }

    async fn ensure_editable(&self, id: &str) -> ControllerResult<()> {
        let existing = self
            .stores
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| ControllerError::NotFound(id.to_string()))?;

        if existing.discipline != self.config.discipline {
            return Err(ControllerError::DisciplineMismatch {
                id: id.to_string(),
                expected: self.config.discipline,
                found: existing.discipline,
            });
        }
        if !existing.is_editable() {
            return Err(ControllerError::ReadOnly(id.to_string()));
        }
        Ok(())
    }
}
