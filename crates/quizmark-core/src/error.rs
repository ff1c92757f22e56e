//! Domain error types.
//!
//! `ContentError` covers authoring defects found when loading question
//! banks; `AttemptError` covers programmatic misuse of the attempt state
//! machine. Defined here so callers can classify failures without string
//! matching.

use thiserror::Error;

/// A defect in authored quiz content.
///
/// These are caught when a bank is parsed; runtime code may assume the
/// invariants hold.
#[derive(Debug, Error)]
pub enum ContentError {
    /// `correct_index` points outside the options list.
    #[error("question '{question_id}': correct_index {index} out of range for {option_count} option(s)")]
    CorrectIndexOutOfRange {
        question_id: String,
        index: usize,
        option_count: usize,
    },

    /// A question was authored with no options at all.
    #[error("question '{question_id}': options list is empty")]
    EmptyOptions { question_id: String },
}

impl ContentError {
    /// The id of the question the defect was found in.
    pub fn question_id(&self) -> &str {
        match self {
            ContentError::CorrectIndexOutOfRange { question_id, .. }
            | ContentError::EmptyOptions { question_id } => question_id,
        }
    }
}

/// Misuse of the attempt state machine by calling code.
///
/// A rendered UI cannot produce these: selectable options are generated
/// from the same `options` list the indices are checked against. They exist
/// so programmatic drivers fail fast instead of rendering broken feedback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttemptError {
    /// The selected option index does not exist on the question.
    #[error("option index {index} out of range for {option_count} option(s)")]
    OptionOutOfRange { index: usize, option_count: usize },

    /// The question index does not exist in the quiz.
    #[error("question index {index} out of range for quiz with {question_count} question(s)")]
    QuestionOutOfRange {
        index: usize,
        question_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_error_names_question() {
        let err = ContentError::CorrectIndexOutOfRange {
            question_id: "q7".into(),
            index: 4,
            option_count: 4,
        };
        assert_eq!(err.question_id(), "q7");
        assert!(err.to_string().contains("q7"));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn attempt_error_display() {
        let err = AttemptError::OptionOutOfRange {
            index: 9,
            option_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "option index 9 out of range for 4 option(s)"
        );
    }
}
