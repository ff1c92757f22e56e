//! The `quizmark list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn execute(bank_dir: PathBuf) -> Result<()> {
    let mut quizzes = quizmark_core::parser::load_bank_directory(&bank_dir)?;
    quizzes.sort_by(|a, b| a.id.cmp(&b.id));

    if quizzes.is_empty() {
        println!("No question banks found in {}", bank_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Kind", "Questions", "Pass mark", "Tags"]);

    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.kind.to_string()),
            Cell::new(quiz.len()),
            Cell::new(format!("{}%", quiz.pass_mark_percent)),
            Cell::new(quiz.tags.join(", ")),
        ]);
    }

    println!("{table}");
    Ok(())
}
