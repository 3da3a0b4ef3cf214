//! Shared application state.
//!
//! The server keeps one walk per case file. A single trainee drives the
//! browser, so walks are keyed by case name only.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use casesim_case::application::library::CaseLibrary;
use casesim_core::clock::Clock;
use casesim_core::error::CaseError;
use casesim_core::rng::DeterministicRng;
use casesim_core::settings::WalkSettings;
use casesim_session::application::walker::CaseWalker;
use casesim_session::domain::outcome::SubmitOutcome;

/// A case walk plus what the last submission produced, for re-rendering.
#[derive(Debug)]
pub struct CaseRun {
    /// The walk itself.
    pub walker: CaseWalker,
    /// Outcome of the most recent accepted submission.
    pub last_outcome: Option<SubmitOutcome>,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Directory of case files.
    pub library: Arc<CaseLibrary>,
    /// Scoring and shuffle settings for new walks.
    pub settings: WalkSettings,
    /// Clock for attempt timestamps.
    pub clock: Arc<dyn Clock>,
    /// RNG for choice shuffling.
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
    runs: Arc<Mutex<HashMap<String, CaseRun>>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        library: CaseLibrary,
        settings: WalkSettings,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng>>,
    ) -> Self {
        Self {
            library: Arc::new(library),
            settings,
            clock,
            rng,
            runs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Locks the table of walks.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Infrastructure` if a previous holder panicked.
    pub fn runs(&self) -> Result<MutexGuard<'_, HashMap<String, CaseRun>>, CaseError> {
        self.runs
            .lock()
            .map_err(|_| CaseError::Infrastructure("session table lock poisoned".to_owned()))
    }

    /// Locks the shuffle RNG.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Infrastructure` if a previous holder panicked.
    pub fn rng(&self) -> Result<MutexGuard<'_, dyn DeterministicRng + 'static>, CaseError> {
        self.rng
            .lock()
            .map_err(|_| CaseError::Infrastructure("rng lock poisoned".to_owned()))
    }

    /// Loads `name` from the library and starts a fresh walk through it.
    ///
    /// # Errors
    ///
    /// Returns any error from `CaseLibrary::load`.
    pub fn start_run(&self, name: &str) -> Result<CaseRun, CaseError> {
        let case = self.library.load(name)?;
        let mut rng = self.rng()?;
        let walker = CaseWalker::start(Arc::new(case), &self.settings, &mut *rng);
        Ok(CaseRun {
            walker,
            last_outcome: None,
        })
    }
}
