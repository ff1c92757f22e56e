//! CSV export of session reports.
//!
//! One row per answer record, for import into training-record
//! spreadsheets. Quoting follows RFC 4180: fields containing commas,
//! quotes, or newlines are wrapped and inner quotes doubled.

use anyhow::Result;
use std::path::Path;

use quizmark_core::report::SessionReport;

/// Quote a field if it needs it.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render a session report as CSV.
pub fn render_csv(report: &SessionReport) -> String {
    let mut csv = String::from(
        "quiz_id,session_id,created_at,question_id,selected_index,correct_index,correct\n",
    );

    let created = report.created_at.to_rfc3339();
    for a in &report.answers {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_field(&report.quiz.id),
            report.id,
            created,
            csv_field(&a.question_id),
            a.selected_index,
            a.correct_index,
            a.correct,
        ));
    }

    csv
}

/// Write a CSV report to a file.
pub fn write_csv_report(report: &SessionReport, path: &Path) -> Result<()> {
    let csv = render_csv(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    Ok(())
}
