//! Core data model types for quizmark.
//!
//! These are the fundamental types the entire quizmark system uses to
//! represent questions, quizzes, and inline checks. Content is immutable
//! configuration: it is authored in TOML banks, validated at load time, and
//! only ever read at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single evaluable multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, used by session reports and statistics.
    pub id: String,
    /// The prompt shown to the learner.
    pub prompt: String,
    /// Ordered answer options. Fixed once defined; display order is
    /// authoring order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    /// Invariant: `correct_index < options.len()`, enforced by the parser.
    pub correct_index: usize,
    /// Shown after an answer is chosen, regardless of correctness.
    pub explanation: String,
    /// Tags for filtering and statistics.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    /// Number of answer options.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// How a quiz is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizKind {
    /// A scored set of questions presented together.
    Quiz,
    /// A single check embedded in course content; the aggregate score is
    /// incidental.
    InlineCheck,
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::Quiz => write!(f, "quiz"),
            QuizKind::InlineCheck => write!(f, "inline-check"),
        }
    }
}

impl FromStr for QuizKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiz" => Ok(QuizKind::Quiz),
            "inline-check" | "check" => Ok(QuizKind::InlineCheck),
            other => Err(format!("unknown quiz kind: {other}")),
        }
    }
}

/// An ordered collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Description of what this quiz covers.
    #[serde(default)]
    pub description: String,
    /// Presentation kind.
    #[serde(default = "default_kind")]
    pub kind: QuizKind,
    /// The questions, in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Percentage of correct answers required to pass.
    #[serde(default = "default_pass_mark")]
    pub pass_mark_percent: u8,
}

fn default_kind() -> QuizKind {
    QuizKind::Quiz
}

fn default_pass_mark() -> u8 {
    70
}

impl Quiz {
    /// Number of questions in this quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_kind_display_and_parse() {
        assert_eq!(QuizKind::Quiz.to_string(), "quiz");
        assert_eq!(QuizKind::InlineCheck.to_string(), "inline-check");
        assert_eq!("quiz".parse::<QuizKind>().unwrap(), QuizKind::Quiz);
        assert_eq!(
            "Inline-Check".parse::<QuizKind>().unwrap(),
            QuizKind::InlineCheck
        );
        assert_eq!("check".parse::<QuizKind>().unwrap(), QuizKind::InlineCheck);
        assert!("exam".parse::<QuizKind>().is_err());
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = Question {
            id: "q1".into(),
            prompt: "Which extinguisher class covers electrical fires?".into(),
            options: vec!["Class A".into(), "Class B".into(), "Class C".into()],
            correct_index: 2,
            explanation: "Class C extinguishers are rated for live electrical equipment.".into(),
            tags: vec!["fire-safety".into()],
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "q1");
        assert_eq!(back.correct_index, 2);
        assert_eq!(back.options.len(), 3);
    }

    #[test]
    fn quiz_defaults() {
        let toml = r#"
id = "minimal"
title = "Minimal"
"#;
        let quiz: Quiz = toml::from_str(toml).unwrap();
        assert_eq!(quiz.kind, QuizKind::Quiz);
        assert_eq!(quiz.pass_mark_percent, 70);
        assert!(quiz.is_empty());
        assert!(quiz.tags.is_empty());
    }
}
