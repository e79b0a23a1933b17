//! # Escopo Document
//!
//! Builds the contract-scope document of a project record. [`generate`] is a
//! pure function from a record to a [`Document`] value; [`render_docx`] turns
//! that value into a word-processor file held in memory.

use thiserror::Error;

pub mod bundle;
pub mod currency;
pub mod docx;
pub mod generator;
pub mod model;
pub mod notify;

pub use bundle::{bundle_attachments, Attachment};
pub use currency::format_currency;
pub use docx::{render_docx, DOCX_MIME_TYPE};
pub use generator::{document_file_name, generate};
pub use model::{Block, Document};
pub use notify::notification_link;

/// Document rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
