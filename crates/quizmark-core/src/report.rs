//! Session report types with JSON persistence and progress detection.
//!
//! A [`SessionReport`] is the durable record of one quiz session. Comparing
//! two reports of the same quiz shows a learner's progress between
//! attempts.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{QuizSession, ScoreSummary};

/// A complete record of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz taken.
    pub quiz: QuizSummary,
    /// One record per answered question, in question order. Unanswered
    /// questions are absent.
    pub answers: Vec<AnswerRecord>,
    /// The aggregate score.
    pub score: ScoreSummary,
    /// Wall-clock session duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a quiz (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
    pub pass_mark_percent: u8,
}

/// What the learner did on one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_index: usize,
    pub correct_index: usize,
    pub correct: bool,
}

impl SessionReport {
    /// Build a report from a session's current state.
    pub fn from_session(session: &QuizSession<'_>, elapsed: std::time::Duration) -> Self {
        let quiz = session.quiz();

        let answers = quiz
            .questions
            .iter()
            .enumerate()
            .filter_map(|(i, question)| {
                let feedback = session.feedback(i)?;
                Some(AnswerRecord {
                    question_id: question.id.clone(),
                    selected_index: feedback.selected_index,
                    correct_index: feedback.correct_index,
                    correct: feedback.correct,
                })
            })
            .collect();

        SessionReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id.clone(),
                title: quiz.title.clone(),
                question_count: quiz.len(),
                pass_mark_percent: quiz.pass_mark_percent,
            },
            answers,
            score: session.score(),
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Score as a percentage of the whole quiz.
    pub fn score_percent(&self) -> f64 {
        self.score.percent()
    }

    /// Whether the score clears the quiz's pass mark.
    pub fn passed(&self) -> bool {
        self.score_percent() >= f64::from(self.quiz.pass_mark_percent)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this session against an earlier baseline of the same quiz.
    ///
    /// Questions are matched by id. Questions answered in only one of the
    /// two sessions are counted as new or removed rather than guessed at.
    pub fn compare(&self, baseline: &SessionReport) -> ProgressReport {
        use std::collections::HashMap;

        if self.quiz.id != baseline.quiz.id {
            tracing::warn!(
                baseline = %baseline.quiz.id,
                current = %self.quiz.id,
                "comparing sessions of different quizzes"
            );
        }

        let baseline_answers: HashMap<&str, &AnswerRecord> = baseline
            .answers
            .iter()
            .map(|a| (a.question_id.as_str(), a))
            .collect();
        let current_answers: HashMap<&str, &AnswerRecord> = self
            .answers
            .iter()
            .map(|a| (a.question_id.as_str(), a))
            .collect();

        let mut improved = Vec::new();
        let mut slipped = Vec::new();
        let mut unchanged = 0usize;
        let mut new_questions = 0usize;

        for current in &self.answers {
            match baseline_answers.get(current.question_id.as_str()) {
                Some(before) => {
                    let delta = QuestionDelta {
                        question_id: current.question_id.clone(),
                        baseline_selected: before.selected_index,
                        current_selected: current.selected_index,
                    };
                    if current.correct && !before.correct {
                        improved.push(delta);
                    } else if !current.correct && before.correct {
                        slipped.push(delta);
                    } else {
                        unchanged += 1;
                    }
                }
                None => new_questions += 1,
            }
        }

        let removed_questions = baseline
            .answers
            .iter()
            .filter(|a| !current_answers.contains_key(a.question_id.as_str()))
            .count();

        ProgressReport {
            improved,
            slipped,
            unchanged,
            new_questions,
            removed_questions,
        }
    }
}

/// Result of comparing two sessions of the same quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Questions answered wrong in the baseline and right now.
    pub improved: Vec<QuestionDelta>,
    /// Questions answered right in the baseline and wrong now.
    pub slipped: Vec<QuestionDelta>,
    /// Questions with the same outcome in both sessions.
    pub unchanged: usize,
    /// Questions answered now but not in the baseline.
    pub new_questions: usize,
    /// Questions answered in the baseline but not now.
    pub removed_questions: usize,
}

/// One question whose outcome changed between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDelta {
    pub question_id: String,
    pub baseline_selected: usize,
    pub current_selected: usize,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} improved, {} slipped, {} unchanged\n\n",
            self.improved.len(),
            self.slipped.len(),
            self.unchanged
        ));

        if !self.slipped.is_empty() {
            md.push_str("### Slipped\n\n");
            md.push_str("| Question | Baseline pick | Current pick |\n");
            md.push_str("|----------|---------------|--------------|\n");
            for d in &self.slipped {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    d.question_id, d.baseline_selected, d.current_selected
                ));
            }
            md.push('\n');
        }

        if !self.improved.is_empty() {
            md.push_str("### Improved\n\n");
            md.push_str("| Question | Baseline pick | Current pick |\n");
            md.push_str("|----------|---------------|--------------|\n");
            for d in &self.improved {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    d.question_id, d.baseline_selected, d.current_selected
                ));
            }
        }

        md
    }

    /// Returns true if any question went from right to wrong.
    pub fn has_slips(&self) -> bool {
        !self.slipped.is_empty()
    }
}
