//! Attempt state machine and answer evaluation.
//!
//! One [`AttemptState`] exists per question instance per session. The
//! machine has exactly two states: `Unanswered` (initial) and `Revealed`
//! (terminal under single-attempt semantics). The first selection locks in;
//! later selections are inert. An explicit [`AttemptState::reset`]
//! transition is provided for embedders that want retries.

use serde::{Deserialize, Serialize};

use crate::error::AttemptError;
use crate::model::Question;

/// Runtime state of a learner's interaction with one question instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptState {
    /// No option has been selected yet.
    #[default]
    Unanswered,
    /// An option was selected and feedback is shown.
    Revealed {
        /// The locked-in selection.
        selected: usize,
    },
}

impl AttemptState {
    /// Select an option. The first valid selection transitions to
    /// `Revealed`; on an already revealed attempt the call is a no-op and
    /// the original selection is preserved.
    ///
    /// `option_count` is the length of the question's options list;
    /// an out-of-range `index` is a caller bug and fails fast.
    pub fn select(&mut self, index: usize, option_count: usize) -> Result<(), AttemptError> {
        if index >= option_count {
            return Err(AttemptError::OptionOutOfRange {
                index,
                option_count,
            });
        }
        match self {
            AttemptState::Unanswered => {
                *self = AttemptState::Revealed { selected: index };
            }
            AttemptState::Revealed { selected } => {
                tracing::debug!(
                    locked = *selected,
                    discarded = index,
                    "selection ignored, attempt already revealed"
                );
            }
        }
        Ok(())
    }

    /// Explicit transition back to `Unanswered`, discarding the selection.
    pub fn reset(&mut self) {
        *self = AttemptState::Unanswered;
    }

    /// The selected option, if revealed.
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            AttemptState::Unanswered => None,
            AttemptState::Revealed { selected } => Some(*selected),
        }
    }

    /// Whether feedback is currently shown.
    ///
    /// Invariant: `revealed` is true iff a selection is set.
    pub fn is_revealed(&self) -> bool {
        matches!(self, AttemptState::Revealed { .. })
    }
}

/// Whether the attempt's selection matches the question's correct option.
///
/// Pure; returns `false` while unanswered.
pub fn is_correct(question: &Question, state: &AttemptState) -> bool {
    state.selected_index() == Some(question.correct_index)
}

/// How one option should be marked when feedback is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionMark {
    /// The learner chose this option and it is correct.
    SelectedCorrect,
    /// The learner chose this option and it is wrong.
    SelectedIncorrect,
    /// The correct option, highlighted when the learner chose wrong.
    CorrectAnswer,
    /// Not chosen, not highlighted.
    Plain,
}

/// Correctness feedback for one revealed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// The question the feedback is for.
    pub question_id: String,
    /// The learner's selection.
    pub selected_index: usize,
    /// The correct option index.
    pub correct_index: usize,
    /// Whether the selection was correct.
    pub correct: bool,
    /// The question's explanation, verbatim. Shown regardless of
    /// correctness.
    pub explanation: String,
    /// One mark per option, in option order.
    pub marks: Vec<OptionMark>,
}

impl Feedback {
    /// Build feedback for a revealed attempt on `question`.
    ///
    /// Returns `None` while the attempt is unanswered — there is nothing to
    /// reveal yet.
    pub fn evaluate(question: &Question, state: &AttemptState) -> Option<Feedback> {
        let selected = state.selected_index()?;
        let correct = selected == question.correct_index;

        let marks = (0..question.options.len())
            .map(|i| {
                if i == selected && correct {
                    OptionMark::SelectedCorrect
                } else if i == selected {
                    OptionMark::SelectedIncorrect
                } else if i == question.correct_index && !correct {
                    OptionMark::CorrectAnswer
                } else {
                    OptionMark::Plain
                }
            })
            .collect();

        Some(Feedback {
            question_id: question.id.clone(),
            selected_index: selected,
            correct_index: question.correct_index,
            correct,
            explanation: question.explanation.clone(),
            marks,
        })
    }
}
