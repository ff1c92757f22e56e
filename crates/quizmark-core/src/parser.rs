//! TOML question bank parser.
//!
//! Loads quizzes from TOML bank files and directories, enforces the
//! structural content invariants, and lints for softer authoring issues.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ContentError;
use crate::model::{Question, Quiz, QuizKind};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_kind_str")]
    kind: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default = "default_pass_mark")]
    pass_mark_percent: u8,
}

fn default_kind_str() -> String {
    "quiz".to_string()
}

fn default_pass_mark() -> u8 {
    70
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML bank file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
///
/// Structural invariants are enforced here: every question must have at
/// least one option and a `correct_index` inside its options list. These
/// are authoring defects and fail the whole file rather than degrading
/// silently at runtime.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: QuizKind = parsed
        .quiz
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            if q.options.is_empty() {
                return Err(ContentError::EmptyOptions { question_id: q.id }.into());
            }
            if q.correct_index >= q.options.len() {
                return Err(ContentError::CorrectIndexOutOfRange {
                    question_id: q.id,
                    index: q.correct_index,
                    option_count: q.options.len(),
                }
                .into());
            }
            Ok(Question {
                id: q.id,
                prompt: q.prompt,
                options: q.options,
                correct_index: q.correct_index,
                explanation: q.explanation,
                tags: q.tags,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        kind,
        questions,
        tags: parsed.quiz.tags,
        pass_mark_percent: parsed.quiz.pass_mark_percent,
    })
}

/// Recursively load all `.toml` bank files from a directory.
///
/// A malformed file is logged and skipped so one bad bank does not take
/// down its siblings.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz linting.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a quiz for common authoring issues.
///
/// Structural invariants are already guaranteed by parsing; these are the
/// softer problems worth surfacing before content ships.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in &quiz.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }

        if question.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "fewer than two options, the answer is a giveaway".into(),
            });
        }

        if question.explanation.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "explanation is empty".into(),
            });
        }

        let correct = &question.options[question.correct_index];
        if question.explanation.trim() == correct.trim() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "explanation merely repeats the correct option".into(),
            });
        }
    }

    if quiz.kind == QuizKind::InlineCheck && quiz.len() > 1 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "inline-check with {} questions, expected exactly one",
                quiz.len()
            ),
        });
    }

    if quiz.pass_mark_percent > 100 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "pass_mark_percent {} exceeds 100",
                quiz.pass_mark_percent
            ),
        });
    }

    warnings
}
