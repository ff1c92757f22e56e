//! Quiz session sequencing.
//!
//! A [`QuizSession`] composes one attempt per question into a single view,
//! preserving question order, and derives the aggregate score. The
//! [`run_session`] driver walks a session to completion synchronously,
//! pulling selections from an [`AnswerSource`] and notifying a
//! [`SessionObserver`] — front-ends plug in at those two seams.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::attempt::{is_correct, AttemptState, Feedback};
use crate::error::AttemptError;
use crate::model::{Question, Quiz};
use crate::report::SessionReport;

/// Aggregate score over a session. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Questions answered correctly.
    pub correct: usize,
    /// Questions answered so far.
    pub answered: usize,
    /// Questions in the quiz.
    pub total: usize,
}

impl ScoreSummary {
    /// Score as a percentage of the whole quiz. 0.0 for an empty quiz.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// One session over a quiz: a read-only borrow of the questions plus one
/// [`AttemptState`] per question, in question order.
#[derive(Debug)]
pub struct QuizSession<'q> {
    quiz: &'q Quiz,
    attempts: Vec<AttemptState>,
}

impl<'q> QuizSession<'q> {
    /// Create a fresh session with every question unanswered.
    pub fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            attempts: vec![AttemptState::Unanswered; quiz.len()],
        }
    }

    /// The quiz this session runs over.
    pub fn quiz(&self) -> &Quiz {
        self.quiz
    }

    /// The attempt state for one question.
    pub fn attempt(&self, question_index: usize) -> Option<&AttemptState> {
        self.attempts.get(question_index)
    }

    /// Select an option on a question and reveal feedback.
    ///
    /// Idempotent once revealed: the first selection locks in, and repeat
    /// calls return the feedback for the original selection.
    pub fn answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<Feedback, AttemptError> {
        let question = self.question(question_index)?;
        let option_count = question.option_count();
        self.attempts[question_index].select(option_index, option_count)?;

        let question = &self.quiz.questions[question_index];
        // select() guarantees the attempt is revealed here.
        Ok(Feedback::evaluate(question, &self.attempts[question_index])
            .unwrap_or_else(|| unreachable!("answered attempt must be revealed")))
    }

    /// Feedback for one question, if it has been revealed.
    pub fn feedback(&self, question_index: usize) -> Option<Feedback> {
        let question = self.quiz.questions.get(question_index)?;
        Feedback::evaluate(question, self.attempts.get(question_index)?)
    }

    /// Current score over the attempted-so-far subset.
    pub fn score(&self) -> ScoreSummary {
        let mut correct = 0;
        let mut answered = 0;
        for (question, attempt) in self.quiz.questions.iter().zip(&self.attempts) {
            if attempt.is_revealed() {
                answered += 1;
                if is_correct(question, attempt) {
                    correct += 1;
                }
            }
        }
        ScoreSummary {
            correct,
            answered,
            total: self.quiz.len(),
        }
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.attempts.iter().all(AttemptState::is_revealed)
    }

    /// Explicitly discard the attempt on one question.
    pub fn reset_question(&mut self, question_index: usize) -> Result<(), AttemptError> {
        self.question(question_index)?;
        self.attempts[question_index].reset();
        Ok(())
    }

    /// Discard all attempts, returning the session to its initial state.
    pub fn reset_all(&mut self) {
        for attempt in &mut self.attempts {
            attempt.reset();
        }
    }

    fn question(&self, index: usize) -> Result<&Question, AttemptError> {
        self.quiz
            .questions
            .get(index)
            .ok_or(AttemptError::QuestionOutOfRange {
                index,
                question_count: self.quiz.len(),
            })
    }
}

/// Where selections come from: a terminal prompt, a scripted list, a test.
pub trait AnswerSource {
    /// Produce a selection for `question` (the `index`-th question of the
    /// quiz), or `None` if the learner quit the session.
    ///
    /// Implementations must return an index valid for the question's
    /// options; interactive sources re-prompt on invalid input before
    /// returning.
    fn next_answer(&mut self, question: &Question, index: usize) -> Result<Option<usize>>;
}

/// An answer source reading from a fixed list of selections.
///
/// Used for non-interactive runs and tests; the session ends early if the
/// script is shorter than the quiz.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    answers: Vec<usize>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            next: 0,
        }
    }
}

impl AnswerSource for ScriptedSource {
    fn next_answer(&mut self, _question: &Question, _index: usize) -> Result<Option<usize>> {
        let answer = self.answers.get(self.next).copied();
        self.next += 1;
        Ok(answer)
    }
}

/// Session progress notifications for front-ends.
pub trait SessionObserver {
    fn on_question(&self, question: &Question, index: usize, total: usize);
    fn on_feedback(&self, question: &Question, feedback: &Feedback);
    fn on_complete(&self, score: &ScoreSummary, elapsed: Duration);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_question(&self, _: &Question, _: usize, _: usize) {}
    fn on_feedback(&self, _: &Question, _: &Feedback) {}
    fn on_complete(&self, _: &ScoreSummary, _: Duration) {}
}

/// Drive a full session over `quiz`, question by question in order.
///
/// Runs synchronously to completion. A source returning `None` ends the
/// session early; the remaining questions stay unanswered and the report
/// carries a partial score.
pub fn run_session(
    quiz: &Quiz,
    source: &mut dyn AnswerSource,
    observer: &dyn SessionObserver,
) -> Result<SessionReport> {
    let start = Instant::now();
    let mut session = QuizSession::new(quiz);
    let total = quiz.len();

    for (index, question) in quiz.questions.iter().enumerate() {
        observer.on_question(question, index, total);

        match source.next_answer(question, index)? {
            Some(selection) => {
                let feedback = session.answer(index, selection)?;
                observer.on_feedback(question, &feedback);
            }
            None => {
                tracing::info!(
                    quiz = %quiz.id,
                    answered = index,
                    total,
                    "session ended early"
                );
                break;
            }
        }
    }

    let elapsed = start.elapsed();
    let score = session.score();
    observer.on_complete(&score, elapsed);

    Ok(SessionReport::from_session(&session, elapsed))
}
