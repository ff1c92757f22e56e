//! The `quizmark run` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use quizmark_core::attempt::{Feedback, OptionMark};
use quizmark_core::model::Question;
use quizmark_core::parser;
use quizmark_core::session::{
    run_session, AnswerSource, ScoreSummary, ScriptedSource, SessionObserver,
};

use crate::config::load_config_from;

/// Console observer printing questions, feedback, and the final score.
struct ConsoleReporter;

impl SessionObserver for ConsoleReporter {
    fn on_question(&self, question: &Question, index: usize, total: usize) {
        println!("\nQuestion {} of {}", index + 1, total);
        println!("{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
    }

    fn on_feedback(&self, question: &Question, feedback: &Feedback) {
        if feedback.correct {
            println!("Correct.");
        } else {
            println!(
                "Incorrect. The correct answer was {}) {}",
                feedback.correct_index + 1,
                question.options[feedback.correct_index]
            );
        }
        println!("  {}", feedback.explanation);

        // Mirror the marks so scripted runs still show which option was
        // highlighted.
        for (i, mark) in feedback.marks.iter().enumerate() {
            match mark {
                OptionMark::SelectedCorrect => println!("  [your answer, correct] {}", i + 1),
                OptionMark::SelectedIncorrect => println!("  [your answer, wrong] {}", i + 1),
                OptionMark::CorrectAnswer => println!("  [correct answer] {}", i + 1),
                OptionMark::Plain => {}
            }
        }
    }

    fn on_complete(&self, score: &ScoreSummary, elapsed: Duration) {
        println!(
            "\nComplete: {}/{} correct ({:.1}s)",
            score.correct,
            score.total,
            elapsed.as_secs_f64()
        );
    }
}

/// Answer source prompting on stdin. Accepts 1-based option numbers;
/// `q` or end-of-input quits the session.
struct PromptSource;

impl AnswerSource for PromptSource {
    fn next_answer(&mut self, question: &Question, _index: usize) -> Result<Option<usize>> {
        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            print!("Your answer [1-{}] (q to quit): ", question.options.len());
            std::io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => {
                    return Ok(Some(n - 1));
                }
                _ => {
                    println!(
                        "Please enter a number between 1 and {}.",
                        question.options.len()
                    );
                }
            }
        }
    }
}

pub fn execute(
    quiz_path: PathBuf,
    answers: Option<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let quiz = parser::parse_quiz(&quiz_path)?;
    anyhow::ensure!(!quiz.is_empty(), "quiz '{}' has no questions", quiz.id);

    let warnings = parser::validate_quiz(&quiz);
    for w in &warnings {
        tracing::warn!(
            question = w.question_id.as_deref().unwrap_or("-"),
            "{}",
            w.message
        );
    }

    println!("{} — {} question(s)", quiz.title, quiz.len());

    let reporter = ConsoleReporter;
    let report = match &answers {
        Some(script) => {
            let selections = parse_answer_script(script)?;
            let mut source = ScriptedSource::new(selections);
            run_session(&quiz, &mut source, &reporter)?
        }
        None => {
            let mut source = PromptSource;
            run_session(&quiz, &mut source, &reporter)?
        }
    };

    print_summary(&report);

    // Save outputs
    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "csv"]
    } else {
        format.split(',').map(|s| s.trim()).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("session-{}-{timestamp}.json", quiz.id));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("session-{}-{timestamp}.html", quiz.id));
                quizmark_report::html::write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "csv" => {
                let path = output.join(format!("session-{}-{timestamp}.csv", quiz.id));
                quizmark_report::csv::write_csv_report(&report, &path)?;
                eprintln!("CSV report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// Parse a scripted answer list like "0,2,1" into zero-based selections.
fn parse_answer_script(script: &str) -> Result<Vec<usize>> {
    script
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid answer index: '{}'", s.trim()))
        })
        .collect()
}

fn print_summary(report: &quizmark_core::report::SessionReport) {
    use comfy_table::{Cell, Table};

    let verdict = if report.passed() { "PASS" } else { "FAIL" };

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Score", "Percent", "Pass mark", "Result"]);
    table.add_row(vec![
        Cell::new(&report.quiz.title),
        Cell::new(format!("{}/{}", report.score.correct, report.score.total)),
        Cell::new(format!("{:.1}%", report.score_percent())),
        Cell::new(format!("{}%", report.quiz.pass_mark_percent)),
        Cell::new(verdict),
    ]);

    println!("\n{table}");
}
