//! Domain error types.

use thiserror::Error;

/// Top-level error type for loading cases and walking sessions.
#[derive(Debug, Error)]
pub enum CaseError {
    /// The case document is missing required fields or carries invalid indices.
    #[error("malformed case: {0}")]
    MalformedCase(String),

    /// The session has no stage at the requested position.
    #[error("stage {index} is out of range for a case with {stage_count} stages")]
    OutOfRange {
        /// The requested stage index.
        index: usize,
        /// Number of stages in the case.
        stage_count: usize,
    },

    /// The submitted choice does not exist on the current stage.
    #[error("choice {choice} is not valid; pick a number from 0 to {max}", max = .choice_count.saturating_sub(1))]
    InvalidChoice {
        /// The submitted (display) choice index.
        choice: usize,
        /// Number of choices on the stage.
        choice_count: usize,
    },

    /// No case with the given name exists in the library.
    #[error("case not found: {0}")]
    CaseNotFound(String),

    /// A file system or other infrastructure failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl CaseError {
    /// Returns true for errors the trainee can recover from by choosing again.
    #[must_use]
    pub fn is_reprompt(&self) -> bool {
        matches!(self, Self::InvalidChoice { .. } | Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_choice_message_names_valid_range() {
        let err = CaseError::InvalidChoice {
            choice: 7,
            choice_count: 3,
        };

        assert_eq!(
            err.to_string(),
            "choice 7 is not valid; pick a number from 0 to 2"
        );
    }

    #[test]
    fn test_only_choice_errors_are_reprompts() {
        assert!(
            CaseError::InvalidChoice {
                choice: 1,
                choice_count: 1
            }
            .is_reprompt()
        );
        assert!(
            CaseError::OutOfRange {
                index: 3,
                stage_count: 3
            }
            .is_reprompt()
        );
        assert!(!CaseError::MalformedCase("no stages".into()).is_reprompt());
        assert!(!CaseError::Infrastructure("disk".into()).is_reprompt());
    }
}
