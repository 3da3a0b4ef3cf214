//! Walk settings shared by both front-ends.
//!
//! Values come from environment variables; the lookup is injected so parsing
//! can be tested without touching the process environment.

use thiserror::Error;

/// Environment variable holding the points awarded per solved stage.
pub const POINTS_PER_STAGE_VAR: &str = "CASESIM_POINTS_PER_STAGE";
/// Environment variable toggling per-stage choice shuffling.
pub const SHUFFLE_VAR: &str = "CASESIM_SHUFFLE";
/// Environment variable holding an optional RNG seed.
pub const SEED_VAR: &str = "CASESIM_SEED";

/// A configuration value could not be parsed.
#[derive(Debug, Error)]
#[error("{var} has invalid value {value:?}: {reason}")]
pub struct ConfigError {
    /// Variable name.
    pub var: &'static str,
    /// The raw value that failed to parse.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Scoring and presentation settings for a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSettings {
    /// Points added to the score when a stage is solved.
    pub points_per_stage: u32,
    /// Whether choice order is shuffled once per stage.
    pub shuffle_choices: bool,
    /// Seed for the shuffle RNG; `None` means OS entropy.
    pub seed: Option<u64>,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            points_per_stage: 1,
            shuffle_choices: false,
            seed: None,
        }
    }
}

impl WalkSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env(shuffle_default: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), shuffle_default)
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F, shuffle_default: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self {
            shuffle_choices: shuffle_default,
            ..Self::default()
        };

        if let Some(raw) = lookup(POINTS_PER_STAGE_VAR) {
            let points: u32 = raw.trim().parse().map_err(|e| ConfigError {
                var: POINTS_PER_STAGE_VAR,
                value: raw.clone(),
                reason: format!("{e}"),
            })?;
            if points == 0 {
                return Err(ConfigError {
                    var: POINTS_PER_STAGE_VAR,
                    value: raw,
                    reason: "must be at least 1".to_owned(),
                });
            }
            settings.points_per_stage = points;
        }

        if let Some(raw) = lookup(SHUFFLE_VAR) {
            settings.shuffle_choices = parse_flag(&raw).ok_or_else(|| ConfigError {
                var: SHUFFLE_VAR,
                value: raw.clone(),
                reason: "expected true/false, yes/no, on/off or 1/0".to_owned(),
            })?;
        }

        if let Some(raw) = lookup(SEED_VAR) {
            let seed: u64 = raw.trim().parse().map_err(|e| ConfigError {
                var: SEED_VAR,
                value: raw.clone(),
                reason: format!("{e}"),
            })?;
            settings.seed = Some(seed);
        }

        Ok(settings)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
