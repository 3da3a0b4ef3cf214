//! Case library.
//!
//! A directory of case files, listed in file-name order and selected by file
//! name. Listing never parses the files; a broken file only fails when it is
//! loaded.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use casesim_core::error::CaseError;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::loader::{self, CaseFormat};
use crate::domain::case::Case;

/// A case file available in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseEntry {
    /// File name, used to select the case.
    pub name: String,
    /// Full path to the file.
    #[serde(skip)]
    pub path: PathBuf,
}

/// A directory of case files.
#[derive(Debug, Clone)]
pub struct CaseLibrary {
    dir: PathBuf,
}

impl CaseLibrary {
    /// Creates a library rooted at `dir`. The directory need not exist yet.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The library directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists the case files in the directory, sorted by name. A missing
    /// directory lists nothing.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Infrastructure` if the directory exists but cannot
    /// be read.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn list(&self) -> Result<Vec<CaseEntry>, CaseError> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CaseError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    self.dir.display()
                )));
            }
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|e| {
                CaseError::Infrastructure(format!("failed to read {}: {e}", self.dir.display()))
            })?;
            let path = item.path();
            if !path.is_file() || CaseFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            entries.push(CaseEntry {
                name: name.to_owned(),
                path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = entries.len(), "listed case files");
        Ok(entries)
    }

    /// Loads the case file called `name`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::CaseNotFound` if no listed file has that name, and
    /// any error from `loader::load_case`.
    pub fn load(&self, name: &str) -> Result<Case, CaseError> {
        let entry = self
            .list()?
            .into_iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| CaseError::CaseNotFound(name.to_owned()))?;
        loader::load_case(&entry.path)
    }
}
