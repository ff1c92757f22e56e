//! Aggregate statistics over saved session reports.
//!
//! Answers the two questions trainers actually ask: how is each quiz
//! scoring across the cohort, and which questions get missed the most.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::report::SessionReport;

/// Score as a percentage. 0.0 when there were no questions.
pub fn score_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// Aggregate statistics across a set of session reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Per-quiz statistics, keyed by quiz id.
    pub per_quiz: HashMap<String, QuizStats>,
    /// Per-question statistics, keyed by question id.
    pub per_question: HashMap<String, QuestionStats>,
}

/// Statistics for a single quiz across all sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizStats {
    /// Quiz identifier.
    pub quiz_id: String,
    /// Number of sessions recorded.
    pub sessions: usize,
    /// Average score percentage.
    pub avg_percent: f64,
    /// Best score percentage.
    pub best_percent: f64,
    /// Share of sessions that cleared the quiz's pass mark.
    pub pass_rate: f64,
}

/// Statistics for a single question across all sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionStats {
    /// Question identifier.
    pub question_id: String,
    /// Times the question was answered.
    pub attempts: usize,
    /// Times it was answered correctly.
    pub correct: usize,
    /// Share of attempts that got it wrong.
    pub miss_rate: f64,
}

/// Compute aggregate statistics from saved session reports.
pub fn compute_aggregate_stats(reports: &[SessionReport]) -> AggregateStats {
    let mut quiz_reports: HashMap<String, Vec<&SessionReport>> = HashMap::new();
    for report in reports {
        quiz_reports
            .entry(report.quiz.id.clone())
            .or_default()
            .push(report);
    }

    let mut per_quiz = HashMap::new();
    for (quiz_id, sessions) in &quiz_reports {
        let n = sessions.len() as f64;
        let percents: Vec<f64> = sessions.iter().map(|r| r.score_percent()).collect();

        let avg_percent = percents.iter().sum::<f64>() / n;
        let best_percent = percents.iter().copied().fold(0.0, f64::max);
        let pass_rate = sessions.iter().filter(|r| r.passed()).count() as f64 / n;

        per_quiz.insert(
            quiz_id.clone(),
            QuizStats {
                quiz_id: quiz_id.clone(),
                sessions: sessions.len(),
                avg_percent,
                best_percent,
                pass_rate,
            },
        );
    }

    let mut per_question: HashMap<String, QuestionStats> = HashMap::new();
    for report in reports {
        for answer in &report.answers {
            let stats = per_question
                .entry(answer.question_id.clone())
                .or_insert_with(|| QuestionStats {
                    question_id: answer.question_id.clone(),
                    attempts: 0,
                    correct: 0,
                    miss_rate: 0.0,
                });
            stats.attempts += 1;
            if answer.correct {
                stats.correct += 1;
            }
        }
    }
    for stats in per_question.values_mut() {
        stats.miss_rate = if stats.attempts == 0 {
            0.0
        } else {
            (stats.attempts - stats.correct) as f64 / stats.attempts as f64
        };
    }

    AggregateStats {
        per_quiz,
        per_question,
    }
}
