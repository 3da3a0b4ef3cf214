//! Values produced by the session: stage views, submission outcomes and the
//! attempt history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Judgement of a submitted choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The correct choice; the stage is solved and the score increased.
    Correct,
    /// A wrong choice; the stage stays current for a retry.
    Incorrect,
    /// The submission named a stage that was already solved. Nothing changed.
    AlreadySolved,
}

/// Where the session stands after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "stage_index", rename_all = "snake_case")]
pub enum Progress {
    /// The stage at this index is current.
    Stage(usize),
    /// Every stage has been solved.
    Complete,
}

/// Result of submitting a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Correct, incorrect or already solved.
    pub verdict: Verdict,
    /// The stage the submission was judged against.
    pub stage_index: usize,
    /// Score after the submission.
    pub score: u32,
    /// Highest score reachable in this case.
    pub max_score: u32,
    /// Current position after the submission.
    pub progress: Progress,
    /// Explanation for a wrong choice, if the case provides one.
    pub feedback: Option<String>,
    /// Information revealed by solving the stage.
    pub next_info: Option<String>,
    /// Attempts made at the judged stage, this one included.
    pub attempts: usize,
}

impl SubmitOutcome {
    /// True once the final stage has been solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress == Progress::Complete
    }
}

/// What the trainee sees for the current stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    /// Zero-based stage index.
    pub stage_index: usize,
    /// Number of stages in the case.
    pub stage_count: usize,
    /// Narrative text.
    pub info: String,
    /// The decision being asked.
    pub question: String,
    /// Choice labels in display order; submit the position in this list.
    pub choices: Vec<String>,
    /// Score so far.
    pub score: u32,
    /// Highest score reachable in this case.
    pub max_score: u32,
    /// Labels of earlier wrong attempts at this stage, oldest first.
    pub previous_attempts: Vec<String>,
}

impl StageView {
    /// One-based stage number for display.
    #[must_use]
    pub fn stage_number(&self) -> usize {
        self.stage_index + 1
    }
}

/// One recorded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    /// Unique attempt identifier.
    pub attempt_id: Uuid,
    /// Stage the attempt was made at.
    pub stage_index: usize,
    /// Authored index of the chosen option.
    pub choice_index: usize,
    /// Label of the chosen option.
    pub label: String,
    /// Whether it was the correct option.
    pub correct: bool,
    /// When the attempt was made.
    pub occurred_at: DateTime<Utc>,
}

/// A solved stage, for the completion review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedStage {
    /// Zero-based stage index.
    pub stage_index: usize,
    /// Narrative text of the stage.
    pub info: String,
    /// Label of the correct action.
    pub correct_label: String,
    /// Attempts it took to solve the stage.
    pub attempts: usize,
    /// Information revealed by solving it.
    pub next_info: Option<String>,
}
