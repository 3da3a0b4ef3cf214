//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use casesim_core::settings::WalkSettings;

use crate::error::AppError;

/// Everything the web server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
    /// Directory holding the case files.
    pub cases_dir: PathBuf,
    /// Scoring and shuffle settings.
    pub settings: WalkSettings,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `CASES_DIR` and the walk settings from the
    /// process environment. Shuffling defaults to on, as in the browser
    /// version of the simulator.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
        let cases_dir = PathBuf::from(lookup("CASES_DIR").unwrap_or_else(|| "cases".to_string()));
        let settings = WalkSettings::from_lookup(&lookup, true)?;

        Ok(Self {
            addr,
            cases_dir,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.cases_dir, PathBuf::from("cases"));
        assert!(config.settings.shuffle_choices);
        assert_eq!(config.settings.points_per_stage, 1);
    }

    #[test]
    fn test_rejects_bad_port() {
        let err = ServerConfig::from_lookup(|var| (var == "PORT").then(|| "http".to_string()))
            .unwrap_err();

        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("PORT must be a valid u16")));
    }

    #[test]
    fn test_reads_cases_dir_and_walk_settings() {
        let config = ServerConfig::from_lookup(|var| match var {
            "CASES_DIR" => Some("/srv/cases".to_string()),
            "CASESIM_SHUFFLE" => Some("false".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.cases_dir, PathBuf::from("/srv/cases"));
        assert!(!config.settings.shuffle_choices);
        assert_eq!(config.addr.port(), 8080);
    }
}
