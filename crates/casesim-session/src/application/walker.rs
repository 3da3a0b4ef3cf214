//! Case walker.
//!
//! Pairs a loaded case with a session so front-ends drive one object instead
//! of threading the case through every call. The clock and RNG stay injected
//! per call, as the front-ends own them.

use std::sync::Arc;

use casesim_case::domain::case::Case;
use casesim_core::clock::Clock;
use casesim_core::error::CaseError;
use casesim_core::rng::DeterministicRng;
use casesim_core::settings::WalkSettings;
use serde::Serialize;
use tracing::info;

use crate::domain::outcome::{CompletedStage, StageView, SubmitOutcome, Verdict};
use crate::domain::session::Session;

/// End-of-run (or in-progress) summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Case title.
    pub title: String,
    /// Score so far.
    pub score: u32,
    /// Highest reachable score.
    pub max_score: u32,
    /// Number of stages in the case.
    pub stage_count: usize,
    /// Whether every stage is solved.
    pub complete: bool,
    /// Solved stages, in order.
    pub completed_stages: Vec<CompletedStage>,
}

/// A case together with one trainee's progress through it.
#[derive(Debug, Clone)]
pub struct CaseWalker {
    case: Arc<Case>,
    session: Session,
}

impl CaseWalker {
    /// Starts a new walk through `case`.
    #[must_use]
    pub fn start(case: Arc<Case>, settings: &WalkSettings, rng: &mut dyn DeterministicRng) -> Self {
        let session = Session::start(&case, settings, rng);
        info!(
            case_id = case.id(),
            session_id = %session.id,
            stages = case.stage_count(),
            "case walk started"
        );
        Self { case, session }
    }

    /// The case being walked.
    #[must_use]
    pub fn case(&self) -> &Case {
        &self.case
    }

    /// The trainee's progress.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// See `Session::present`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::OutOfRange` once the walk is complete.
    pub fn present(&self) -> Result<StageView, CaseError> {
        self.session.present(&self.case)
    }

    /// See `Session::submit`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidChoice` or `CaseError::OutOfRange`.
    pub fn submit(
        &mut self,
        choice: usize,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Result<SubmitOutcome, CaseError> {
        let outcome = self.session.submit(&self.case, choice, rng, clock)?;
        self.log_if_complete(&outcome);
        Ok(outcome)
    }

    /// See `Session::submit_at`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidChoice` or `CaseError::OutOfRange`.
    pub fn submit_at(
        &mut self,
        stage_index: usize,
        choice: usize,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Result<SubmitOutcome, CaseError> {
        let outcome = self
            .session
            .submit_at(&self.case, stage_index, choice, rng, clock)?;
        self.log_if_complete(&outcome);
        Ok(outcome)
    }

    /// Restarts the walk from the first stage.
    pub fn reset(&mut self, rng: &mut dyn DeterministicRng) {
        self.session.reset(&self.case, rng);
    }

    /// True once every stage is solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_terminal()
    }

    /// Score, progress and solved stages.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            title: self.case.title().to_owned(),
            score: self.session.score(),
            max_score: self.session.max_score(),
            stage_count: self.case.stage_count(),
            complete: self.session.is_terminal(),
            completed_stages: self.session.completed_stages(&self.case),
        }
    }

    fn log_if_complete(&self, outcome: &SubmitOutcome) {
        if outcome.is_complete() && outcome.verdict == Verdict::Correct {
            info!(
                case_id = self.case.id(),
                session_id = %self.session.id,
                score = outcome.score,
                max_score = outcome.max_score,
                attempts = self.session.history().len(),
                "case completed"
            );
        }
    }
}
