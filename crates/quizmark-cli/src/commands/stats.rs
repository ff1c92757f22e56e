//! The `quizmark stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizmark_core::report::SessionReport;
use quizmark_core::statistics::compute_aggregate_stats;

pub fn execute(reports_dir: PathBuf) -> Result<()> {
    anyhow::ensure!(
        reports_dir.is_dir(),
        "not a directory: {}",
        reports_dir.display()
    );

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(&reports_dir)
        .with_context(|| format!("failed to read directory: {}", reports_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            match SessionReport::load_json(&path) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    anyhow::ensure!(
        !reports.is_empty(),
        "no session reports found in {}",
        reports_dir.display()
    );

    let stats = compute_aggregate_stats(&reports);

    let mut quiz_table = Table::new();
    quiz_table.set_header(vec!["Quiz", "Sessions", "Avg %", "Best %", "Pass rate"]);

    let mut quizzes: Vec<_> = stats.per_quiz.values().collect();
    quizzes.sort_by(|a, b| a.quiz_id.cmp(&b.quiz_id));
    for q in quizzes {
        quiz_table.add_row(vec![
            Cell::new(&q.quiz_id),
            Cell::new(q.sessions),
            Cell::new(format!("{:.1}%", q.avg_percent)),
            Cell::new(format!("{:.1}%", q.best_percent)),
            Cell::new(format!("{:.0}%", q.pass_rate * 100.0)),
        ]);
    }

    println!("{} session report(s)\n", reports.len());
    println!("{quiz_table}");

    // Most-missed questions, worst first
    let mut questions: Vec<_> = stats
        .per_question
        .values()
        .filter(|q| q.miss_rate > 0.0)
        .collect();
    questions.sort_by(|a, b| {
        b.miss_rate
            .partial_cmp(&a.miss_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.question_id.cmp(&b.question_id))
    });

    if !questions.is_empty() {
        let mut question_table = Table::new();
        question_table.set_header(vec!["Most-missed question", "Attempts", "Miss rate"]);
        for q in questions.iter().take(10) {
            question_table.add_row(vec![
                Cell::new(&q.question_id),
                Cell::new(q.attempts),
                Cell::new(format!("{:.0}%", q.miss_rate * 100.0)),
            ]);
        }
        println!("\n{question_table}");
    }

    Ok(())
}
