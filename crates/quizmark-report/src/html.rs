//! HTML session report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, suitable for
//! attaching to a learner's training record.

use anyhow::Result;
use std::path::Path;

use quizmark_core::report::SessionReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizmark report — {}</title>\n",
        html_escape(&report.quiz.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>quizmark session report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Quiz: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.quiz.title),
        report.quiz.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score summary
    let percent = report.score_percent();
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    let verdict_class = if report.passed() { "pass" } else { "fail" };

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Score</h2>\n");
    html.push_str(&format!(
        "<p class=\"score\">{} / {} correct ({:.1}%) — <span class=\"{}\">{}</span> (pass mark {}%)</p>\n",
        report.score.correct,
        report.score.total,
        percent,
        verdict_class,
        verdict,
        report.quiz.pass_mark_percent,
    ));
    html.push_str(&generate_score_bar(
        percent,
        f64::from(report.quiz.pass_mark_percent),
    ));
    html.push_str("</section>\n");

    // Per-answer results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str(
        "<thead><tr><th>Question</th><th>Picked</th><th>Correct option</th><th>Result</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");

    for a in &report.answers {
        let row_class = if a.correct { "pass" } else { "fail" };
        let result_text = if a.correct { "Correct" } else { "Incorrect" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            html_escape(&a.question_id),
            a.selected_index,
            a.correct_index,
            result_text,
        ));
    }

    if report.score.answered < report.score.total {
        html.push_str(&format!(
            "<tr><td colspan=\"4\" class=\"meta\">{} question(s) not answered</td></tr>\n",
            report.score.total - report.score.answered
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal SVG bar showing the score against the pass mark.
fn generate_score_bar(percent: f64, pass_mark: f64) -> String {
    let max_width = 400.0;
    let bar_height = 30;

    let width = (percent / 100.0 * max_width) as usize;
    let mark_x = (pass_mark / 100.0 * max_width) as usize;

    let color = if percent >= pass_mark {
        "#22c55e"
    } else if percent >= pass_mark * 0.75 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        max_width as usize + 60,
        bar_height + 10
    );
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"5\" width=\"{}\" height=\"{}\" fill=\"var(--border, #e5e7eb)\" rx=\"4\"/>\n",
        max_width as usize, bar_height
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"5\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <line x1=\"{mark_x}\" y1=\"0\" x2=\"{mark_x}\" y2=\"{}\" stroke=\"currentColor\" stroke-dasharray=\"4\"/>\n",
        bar_height + 10
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
        max_width as usize + 8,
        5 + bar_height / 2,
        percent
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 1.2rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
tr.pass { background: var(--pass); }
tr.fail { background: var(--fail); }
span.pass { color: #16a34a; font-weight: bold; }
span.fail { color: #dc2626; font-weight: bold; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quizmark_core::report::{AnswerRecord, QuizSummary};
    use quizmark_core::session::ScoreSummary;
    use uuid::Uuid;

    fn make_test_report() -> SessionReport {
        SessionReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: "fire-safety-basics".into(),
                title: "Fire Safety Basics".into(),
                question_count: 2,
                pass_mark_percent: 70,
            },
            answers: vec![
                AnswerRecord {
                    question_id: "extinguisher-electrical".into(),
                    selected_index: 2,
                    correct_index: 2,
                    correct: true,
                },
                AnswerRecord {
                    question_id: "evacuation-first-action".into(),
                    selected_index: 0,
                    correct_index: 1,
                    correct: false,
                },
            ],
            score: ScoreSummary {
                correct: 1,
                answered: 2,
                total: 2,
            },
            duration_ms: 42_000,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Fire Safety Basics"));
        assert!(html.contains("extinguisher-electrical"));
        assert!(html.contains("FAIL"));
        assert!(html.contains("pass mark 70%"));
    }

    #[test]
    fn html_escapes_content() {
        let mut report = make_test_report();
        report.quiz.title = "Safety <script>alert(1)</script>".into();

        let html = generate_html(&report);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn unanswered_questions_noted() {
        let mut report = make_test_report();
        report.quiz.question_count = 3;
        report.score.total = 3;

        let html = generate_html(&report);
        assert!(html.contains("1 question(s) not answered"));
    }
}
