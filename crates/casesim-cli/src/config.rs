//! CLI configuration: one optional positional case path plus the shared
//! walk settings from the environment.

use std::path::PathBuf;

use casesim_core::settings::WalkSettings;

use crate::error::CliError;

/// Case file used when no path is given, relative to the workspace root.
pub const DEFAULT_CASE_PATH: &str = "cases/case_demo_001.json";

/// Everything the terminal run needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Case document to walk.
    pub case_path: PathBuf,
    /// Scoring and shuffle settings.
    pub settings: WalkSettings,
}

impl CliConfig {
    /// Builds the configuration from the arguments after the program name
    /// and already-parsed settings.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Usage` for more than one argument or for anything
    /// that looks like a flag.
    pub fn from_args<I>(args: I, settings: WalkSettings) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let case_path = match args.as_slice() {
            [] => PathBuf::from(DEFAULT_CASE_PATH),
            [path] if !path.starts_with('-') => PathBuf::from(path),
            _ => return Err(CliError::Usage("casesim [CASE_FILE]".to_owned())),
        };
        Ok(Self {
            case_path,
            settings,
        })
    }
}
