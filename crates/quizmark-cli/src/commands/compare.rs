//! The `quizmark compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::report::SessionReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_slip: bool,
) -> Result<()> {
    let baseline = SessionReport::load_json(&baseline_path)?;
    let current = SessionReport::load_json(&current_path)?;

    let progress = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", progress.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        _ => {
            // text format
            println!(
                "Progress: {} improved, {} slipped, {} unchanged",
                progress.improved.len(),
                progress.slipped.len(),
                progress.unchanged
            );

            if !progress.slipped.is_empty() {
                println!("\nSlipped:");
                for d in &progress.slipped {
                    println!(
                        "  {} (picked {} before, {} now)",
                        d.question_id, d.baseline_selected, d.current_selected
                    );
                }
            }

            if !progress.improved.is_empty() {
                println!("\nImproved:");
                for d in &progress.improved {
                    println!(
                        "  {} (picked {} before, {} now)",
                        d.question_id, d.baseline_selected, d.current_selected
                    );
                }
            }

            if progress.new_questions > 0 {
                println!("\n{} newly answered question(s)", progress.new_questions);
            }
            if progress.removed_questions > 0 {
                println!("{} question(s) no longer answered", progress.removed_questions);
            }
        }
    }

    if fail_on_slip && progress.has_slips() {
        std::process::exit(1);
    }

    Ok(())
}
