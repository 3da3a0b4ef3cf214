//! Serialized case document shape.
//!
//! Every field is optional at the serde level so that a missing key produces
//! a `MalformedCase` naming the stage and key, instead of a bare serde error.

use casesim_core::error::CaseError;
use serde::Deserialize;

use super::case::{Case, Choice, StageSpec};

/// Top-level case document as written by case authors.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseDocument {
    /// Case identifier; falls back to the file stem.
    pub id: Option<String>,
    /// Case title.
    pub title: Option<String>,
    /// Briefing shown before the first stage.
    pub summary: Option<String>,
    /// Ordered stages.
    pub stages: Option<Vec<StageDocument>>,
}

/// One stage entry in a case document.
#[derive(Debug, Clone, Deserialize)]
pub struct StageDocument {
    /// Narrative given to the trainee.
    pub info: Option<String>,
    /// The decision being asked.
    pub question: Option<String>,
    /// Choices in authored order.
    #[serde(alias = "choices")]
    pub options: Option<Vec<OptionDocument>>,
    /// Index of the correct option. Signed so negative values are reported
    /// as out of range.
    pub correct: Option<i64>,
    /// Feedback for wrong options without their own feedback.
    pub feedback_wrong: Option<String>,
    /// Information revealed once the stage is solved.
    pub next_info: Option<String>,
}

/// An option is either a bare label or a label with its own feedback.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionDocument {
    /// `"Secure the scene"`
    Label(String),
    /// `{"label": "Secure the scene", "feedback": "..."}`
    Detailed {
        /// Display text.
        label: String,
        /// Explanation shown when this option is picked wrongly.
        feedback: Option<String>,
    },
}

impl From<OptionDocument> for Choice {
    fn from(doc: OptionDocument) -> Self {
        match doc {
            OptionDocument::Label(label) => Choice::new(label, None),
            OptionDocument::Detailed { label, feedback } => Choice::new(label, feedback),
        }
    }
}

impl CaseDocument {
    /// Validates the document into a `Case`. `fallback_id` is used when the
    /// document carries no `id`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::MalformedCase` when a required key is missing or
    /// any structural rule enforced by `Case::new` is violated.
    pub fn into_case(self, fallback_id: &str) -> Result<Case, CaseError> {
        let title = self
            .title
            .ok_or_else(|| CaseError::MalformedCase("missing `title`".to_owned()))?;
        let stages = self
            .stages
            .ok_or_else(|| CaseError::MalformedCase("missing `stages`".to_owned()))?;

        let specs = stages
            .into_iter()
            .enumerate()
            .map(|(i, stage)| stage.into_spec(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| fallback_id.to_owned());

        Case::new(id, title, self.summary.unwrap_or_default(), specs)
    }
}

impl StageDocument {
    fn into_spec(self, number: usize) -> Result<StageSpec, CaseError> {
        let options = self.options.ok_or_else(|| {
            CaseError::MalformedCase(format!("stage {number}: missing `options`"))
        })?;
        let correct = self.correct.ok_or_else(|| {
            CaseError::MalformedCase(format!("stage {number}: missing `correct`"))
        })?;
        let correct = usize::try_from(correct).map_err(|_| {
            CaseError::MalformedCase(format!(
                "stage {number}: `correct` index {correct} is out of range for {} options",
                options.len()
            ))
        })?;

        Ok(StageSpec {
            info: self.info.unwrap_or_default(),
            question: self.question.unwrap_or_default(),
            choices: options.into_iter().map(Choice::from).collect(),
            correct,
            feedback_wrong: self.feedback_wrong,
            next_info: self.next_info,
        })
    }
}
