//! The session state machine.
//!
//! A session is a linear walk over a case's stages. A correct choice adds the
//! per-stage points and advances; a wrong choice leaves everything but the
//! attempt history untouched so the trainee can retry. Solving the last stage
//! makes the session terminal.
//!
//! The score can only change on the transition out of a stage, and that
//! transition happens once per stage, so a stage never scores twice.

use casesim_case::domain::case::{Case, Stage};
use casesim_core::clock::Clock;
use casesim_core::error::CaseError;
use casesim_core::rng::DeterministicRng;
use casesim_core::settings::WalkSettings;
use tracing::debug;
use uuid::Uuid;

use super::outcome::{AttemptRecord, CompletedStage, Progress, StageView, SubmitOutcome, Verdict};

/// Per-run progress through one case.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier.
    pub id: Uuid,
    case_id: String,
    stage_count: usize,
    stage_index: usize,
    score: u32,
    terminal: bool,
    points_per_stage: u32,
    shuffle_choices: bool,
    /// Display position -> authored choice index for the current stage.
    choice_order: Vec<usize>,
    history: Vec<AttemptRecord>,
}

impl Session {
    /// Starts a session at the first stage of `case`.
    #[must_use]
    pub fn start(case: &Case, settings: &WalkSettings, rng: &mut dyn DeterministicRng) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            case_id: case.id().to_owned(),
            stage_count: case.stage_count(),
            stage_index: 0,
            score: 0,
            terminal: false,
            points_per_stage: settings.points_per_stage,
            shuffle_choices: settings.shuffle_choices,
            choice_order: Vec::new(),
            history: Vec::new(),
        };
        session.enter_stage(case, rng);
        session
    }

    /// Id of the case this session walks.
    #[must_use]
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// Index of the current stage. Equals the stage count once terminal.
    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Score so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest reachable score: stage count times the per-stage points.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.stage_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.points_per_stage)
    }

    /// True once the last stage has been solved.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// All attempts so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Number of attempts made at `stage_index`.
    #[must_use]
    pub fn attempts_at(&self, stage_index: usize) -> usize {
        self.history
            .iter()
            .filter(|a| a.stage_index == stage_index)
            .count()
    }

    fn out_of_range(&self, index: usize) -> CaseError {
        CaseError::OutOfRange {
            index,
            stage_count: self.stage_count,
        }
    }

    fn current_stage<'c>(&self, case: &'c Case) -> Result<&'c Stage, CaseError> {
        if self.terminal {
            return Err(self.out_of_range(self.stage_index));
        }
        case.stage(self.stage_index)
            .ok_or_else(|| self.out_of_range(self.stage_index))
    }

    fn enter_stage(&mut self, case: &Case, rng: &mut dyn DeterministicRng) {
        let count = case.stage(self.stage_index).map_or(0, Stage::choice_count);
        self.choice_order = choice_order(count, self.shuffle_choices, rng);
    }

    /// Returns the current stage with its choices in display order.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::OutOfRange` if the session is terminal.
    pub fn present(&self, case: &Case) -> Result<StageView, CaseError> {
        let stage = self.current_stage(case)?;
        let choices = self
            .choice_order
            .iter()
            .map(|&i| stage.choices()[i].label().to_owned())
            .collect();
        let previous_attempts = self
            .history
            .iter()
            .filter(|a| a.stage_index == self.stage_index)
            .map(|a| a.label.clone())
            .collect();

        Ok(StageView {
            stage_index: self.stage_index,
            stage_count: self.stage_count,
            info: stage.info().to_owned(),
            question: stage.question().to_owned(),
            choices,
            score: self.score,
            max_score: self.max_score(),
            previous_attempts,
        })
    }

    /// Judges `choice` (a display position from `present`) against the
    /// current stage.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::OutOfRange` if the session is terminal and
    /// `CaseError::InvalidChoice` if `choice` is not a position on the stage.
    /// Neither changes the session.
    pub fn submit(
        &mut self,
        case: &Case,
        choice: usize,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Result<SubmitOutcome, CaseError> {
        let stage = self.current_stage(case)?;
        let authored = *self
            .choice_order
            .get(choice)
            .ok_or(CaseError::InvalidChoice {
                choice,
                choice_count: self.choice_order.len(),
            })?;

        let judged_index = self.stage_index;
        let correct = authored == stage.correct_index();
        let feedback = (!correct)
            .then(|| stage.feedback_for(authored).map(str::to_owned))
            .flatten();
        let next_info = correct
            .then(|| stage.next_info().map(str::to_owned))
            .flatten();

        self.history.push(AttemptRecord {
            attempt_id: Uuid::new_v4(),
            stage_index: judged_index,
            choice_index: authored,
            label: stage.choices()[authored].label().to_owned(),
            correct,
            occurred_at: clock.now(),
        });

        if correct {
            self.score = self.score.saturating_add(self.points_per_stage);
            self.stage_index += 1;
            if self.stage_index >= self.stage_count {
                self.terminal = true;
                self.choice_order.clear();
            } else {
                self.enter_stage(case, rng);
            }
        }

        debug!(
            session_id = %self.id,
            stage_index = judged_index,
            correct,
            score = self.score,
            "choice submitted"
        );

        Ok(SubmitOutcome {
            verdict: if correct {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            },
            stage_index: judged_index,
            score: self.score,
            max_score: self.max_score(),
            progress: self.progress(),
            feedback,
            next_info,
            attempts: self.attempts_at(judged_index),
        })
    }

    /// Judges `choice` against the stage at `stage_index`. A submission for a
    /// stage that is already solved reports `Verdict::AlreadySolved` and
    /// changes nothing, which makes repeated submissions harmless.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::OutOfRange` if `stage_index` is past the current
    /// stage, plus any error from `submit`.
    pub fn submit_at(
        &mut self,
        case: &Case,
        stage_index: usize,
        choice: usize,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Result<SubmitOutcome, CaseError> {
        if stage_index < self.stage_index {
            let next_info = case
                .stage(stage_index)
                .and_then(Stage::next_info)
                .map(str::to_owned);
            return Ok(SubmitOutcome {
                verdict: Verdict::AlreadySolved,
                stage_index,
                score: self.score,
                max_score: self.max_score(),
                progress: self.progress(),
                feedback: None,
                next_info,
                attempts: self.attempts_at(stage_index),
            });
        }
        if stage_index > self.stage_index || self.terminal {
            return Err(self.out_of_range(stage_index));
        }
        self.submit(case, choice, rng, clock)
    }

    /// Current position.
    #[must_use]
    pub fn progress(&self) -> Progress {
        if self.terminal {
            Progress::Complete
        } else {
            Progress::Stage(self.stage_index)
        }
    }

    /// Restarts at the first stage with a zero score and no history.
    pub fn reset(&mut self, case: &Case, rng: &mut dyn DeterministicRng) {
        self.stage_index = 0;
        self.score = 0;
        self.terminal = false;
        self.history.clear();
        self.enter_stage(case, rng);
        debug!(session_id = %self.id, "session reset");
    }

    /// The stages solved so far, in order.
    #[must_use]
    pub fn completed_stages(&self, case: &Case) -> Vec<CompletedStage> {
        case.stages()
            .iter()
            .take(self.stage_index)
            .enumerate()
            .map(|(i, stage)| CompletedStage {
                stage_index: i,
                info: stage.info().to_owned(),
                correct_label: stage.correct_choice().label().to_owned(),
                attempts: self.attempts_at(i),
                next_info: stage.next_info().map(str::to_owned),
            })
            .collect()
    }
}

/// Display order for a stage with `count` choices: identity, or a
/// Fisher-Yates shuffle drawn from `rng`.
#[allow(clippy::cast_possible_truncation)]
fn choice_order(count: usize, shuffle: bool, rng: &mut dyn DeterministicRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    if shuffle {
        for i in (1..count).rev() {
            let j = rng.next_u32_range(0, i as u32) as usize;
            order.swap(i, j);
        }
    }
    order
}
