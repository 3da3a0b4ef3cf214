//! Case loading.
//!
//! Parses a case document from text or from a file into a validated `Case`.
//! Loading is all-or-nothing: any problem fails the whole document.

use std::io::ErrorKind;
use std::path::Path;

use casesim_core::error::CaseError;
use tracing::{debug, instrument};

use crate::domain::case::Case;
use crate::domain::document::CaseDocument;

/// Serialization format of a case document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl CaseFormat {
    /// Picks the format from a file extension; `None` for unsupported ones.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses and validates a case document.
///
/// # Errors
///
/// Returns `CaseError::MalformedCase` if the text is not a valid document of
/// the given format or fails validation.
pub fn parse_case(source: &str, format: CaseFormat, fallback_id: &str) -> Result<Case, CaseError> {
    let document: CaseDocument = match format {
        CaseFormat::Json => serde_json::from_str(source)
            .map_err(|e| CaseError::MalformedCase(format!("invalid JSON: {e}")))?,
        CaseFormat::Yaml => serde_yaml::from_str(source)
            .map_err(|e| CaseError::MalformedCase(format!("invalid YAML: {e}")))?,
    };
    document.into_case(fallback_id)
}

/// Reads and parses the case file at `path`. The file stem is the fallback
/// case id.
///
/// # Errors
///
/// Returns `CaseError::CaseNotFound` if the file does not exist,
/// `CaseError::Infrastructure` for other read failures, and
/// `CaseError::MalformedCase` for unsupported extensions or invalid content.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_case(path: &Path) -> Result<Case, CaseError> {
    let format = CaseFormat::from_path(path).ok_or_else(|| {
        CaseError::MalformedCase(format!(
            "{}: unsupported file type, expected .json, .yaml or .yml",
            path.display()
        ))
    })?;

    let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CaseError::CaseNotFound(path.display().to_string()),
        _ => CaseError::Infrastructure(format!("failed to read {}: {e}", path.display())),
    })?;

    let fallback_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("case");

    let case = parse_case(&source, format, fallback_id).map_err(|e| match e {
        CaseError::MalformedCase(msg) => {
            CaseError::MalformedCase(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;

    debug!(case_id = case.id(), stages = case.stage_count(), "case loaded");
    Ok(case)
}
