//! Validated case values.
//!
//! A `Case` can only be built through `Case::new`, which enforces the
//! structural invariants the session walker relies on: at least one stage,
//! every stage has at least one choice, and every correct index points at an
//! existing choice.

use casesim_core::error::CaseError;
use serde::Serialize;

/// One selectable answer on a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    label: String,
    feedback: Option<String>,
}

impl Choice {
    /// Creates a choice with an optional explanation shown when it is picked
    /// wrongly.
    #[must_use]
    pub fn new(label: impl Into<String>, feedback: Option<String>) -> Self {
        Self {
            label: label.into(),
            feedback,
        }
    }

    /// Display text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Explanation attached to this choice, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

/// One prompt-and-choice unit within a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    info: String,
    question: String,
    choices: Vec<Choice>,
    correct: usize,
    feedback_wrong: Option<String>,
    next_info: Option<String>,
}

/// Builder input for a `Stage`; validated by `Case::new`.
#[derive(Debug, Clone, Default)]
pub struct StageSpec {
    /// Narrative given to the trainee.
    pub info: String,
    /// The decision being asked.
    pub question: String,
    /// Choices in authored order.
    pub choices: Vec<Choice>,
    /// Index of the correct choice in `choices`.
    pub correct: usize,
    /// Feedback for any wrong choice without its own feedback.
    pub feedback_wrong: Option<String>,
    /// Information revealed once the stage is solved.
    pub next_info: Option<String>,
}

impl Stage {
    /// Narrative text.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// The decision being asked.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Narrative and question joined into a single prompt.
    #[must_use]
    pub fn prompt(&self) -> String {
        match (self.info.is_empty(), self.question.is_empty()) {
            (false, false) => format!("{}\n\n{}", self.info, self.question),
            (false, true) => self.info.clone(),
            (true, _) => self.question.clone(),
        }
    }

    /// Choices in authored order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Number of choices.
    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    /// Authored index of the correct choice.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    /// The correct choice.
    #[must_use]
    pub fn correct_choice(&self) -> &Choice {
        &self.choices[self.correct]
    }

    /// Information revealed once the stage is solved.
    #[must_use]
    pub fn next_info(&self) -> Option<&str> {
        self.next_info.as_deref()
    }

    /// Feedback for a wrong pick of the authored choice `index`: the choice's
    /// own feedback, else the stage-wide wrong-answer feedback.
    #[must_use]
    pub fn feedback_for(&self, index: usize) -> Option<&str> {
        self.choices
            .get(index)
            .and_then(Choice::feedback)
            .or(self.feedback_wrong.as_deref())
    }
}

/// An ordered, validated sequence of stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    id: String,
    title: String,
    summary: String,
    stages: Vec<Stage>,
}

impl Case {
    /// Validates the parts and builds a case.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::MalformedCase` if the id or title is blank, there
    /// are no stages, a stage has no prompt text or no choices, a choice label
    /// is blank, or a correct index is out of range.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        stages: Vec<StageSpec>,
    ) -> Result<Self, CaseError> {
        let id = id.into().trim().to_owned();
        let title = title.into().trim().to_owned();
        if id.is_empty() {
            return Err(malformed("`id` must not be blank"));
        }
        if title.is_empty() {
            return Err(malformed("`title` must not be blank"));
        }
        if stages.is_empty() {
            return Err(malformed("`stages` must contain at least one stage"));
        }

        let stages = stages
            .into_iter()
            .enumerate()
            .map(|(i, spec)| validate_stage(i, spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            title,
            summary: summary.into(),
            stages,
        })
    }

    /// Case identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Case title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Briefing shown before the first stage; may be empty.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Stages in order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stages; always at least one.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stage at `index`, if it exists.
    #[must_use]
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

fn malformed(message: impl Into<String>) -> CaseError {
    CaseError::MalformedCase(message.into())
}

fn validate_stage(index: usize, spec: StageSpec) -> Result<Stage, CaseError> {
    let number = index + 1;
    let info = spec.info.trim().to_owned();
    let question = spec.question.trim().to_owned();
    if info.is_empty() && question.is_empty() {
        return Err(malformed(format!(
            "stage {number}: needs `info` or `question` text"
        )));
    }
    if spec.choices.is_empty() {
        return Err(malformed(format!(
            "stage {number}: `options` must contain at least one choice"
        )));
    }
    if let Some(blank) = spec.choices.iter().position(|c| c.label.trim().is_empty()) {
        return Err(malformed(format!(
            "stage {number}: option {blank} has a blank label"
        )));
    }
    if spec.correct >= spec.choices.len() {
        return Err(malformed(format!(
            "stage {number}: `correct` index {} is out of range for {} options",
            spec.correct,
            spec.choices.len()
        )));
    }

    Ok(Stage {
        info,
        question,
        choices: spec.choices,
        correct: spec.correct,
        feedback_wrong: spec.feedback_wrong,
        next_info: spec.next_info,
    })
}
