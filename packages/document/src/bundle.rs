use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::RenderResult;

const ATTACHMENTS_DIR: &str = "anexos";

/// Supporting file sent along with the scope document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Zips the document with its attachments.
///
/// The document sits at the archive root and attachments under `anexos/`.
/// Only the file-name part of an attachment name is kept; repeated names get
/// a numeric suffix.
pub fn bundle_attachments(
    document_name: &str,
    document_bytes: &[u8],
    attachments: &[Attachment],
) -> RenderResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    writer.start_file(document_name, options)?;
    writer.write_all(document_bytes)?;

    let mut used = HashSet::new();
    for attachment in attachments {
        let Some(base) = base_name(&attachment.name) else {
            debug!("Skipping attachment with empty name");
            continue;
        };
        let name = unique_name(&base, &mut used);
        writer.start_file(format!("{}/{}", ATTACHMENTS_DIR, name), options)?;
        writer.write_all(&attachment.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

fn base_name(name: &str) -> Option<String> {
    // Browsers on Windows may send the full client path
    let normalized = name.trim().replace('\\', "/");
    let base = Path::new(&normalized).file_name()?.to_str()?.trim().to_string();
    if base.is_empty() {
        None
    } else {
        Some(base)
    }
}

fn unique_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (base, String::new()),
    };
    let mut counter = 2;
    loop {
        let candidate = format!("{}_{}{}", stem, counter, extension);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
