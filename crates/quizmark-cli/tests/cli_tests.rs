//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizmark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizmark").unwrap()
}

#[test]
fn validate_fire_safety_bank() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../question-banks/fire-safety.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_commercial_installations_bank() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../question-banks/commercial-installations.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions"));
}

#[test]
fn validate_scaffolding_bank() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../question-banks/scaffolding-awareness.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 questions"));
}

#[test]
fn validate_directory() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fire Safety"))
        .stdout(predicate::str::contains("Commercial Installations"))
        .stdout(predicate::str::contains("Scaffolding Awareness"));
}

#[test]
fn validate_nonexistent_file() {
    quizmark()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn run_scripted_all_correct() {
    let out = TempDir::new().unwrap();

    quizmark()
        .arg("run")
        .arg("--quiz")
        .arg("../../question-banks/fire-safety.toml")
        .arg("--answers")
        .arg("2,1,2,2,1")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("5/5"))
        .stdout(predicate::str::contains("PASS"));

    let reports: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(reports.len(), 1);
}

#[test]
fn run_scripted_all_wrong_fails_pass_mark() {
    let out = TempDir::new().unwrap();

    quizmark()
        .arg("run")
        .arg("--quiz")
        .arg("../../question-banks/fire-safety.toml")
        .arg("--answers")
        .arg("0,0,0,0,0")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0/5"))
        .stdout(predicate::str::contains("FAIL"))
        // The explanation is shown even for wrong answers.
        .stdout(predicate::str::contains("CO2 is non-conductive"));
}

#[test]
fn run_scripted_partial_session() {
    let out = TempDir::new().unwrap();

    quizmark()
        .arg("run")
        .arg("--quiz")
        .arg("../../question-banks/scaffolding-awareness.toml")
        .arg("--answers")
        .arg("1,1")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2/4"));
}

#[test]
fn run_writes_requested_formats() {
    let out = TempDir::new().unwrap();

    quizmark()
        .arg("run")
        .arg("--quiz")
        .arg("../../question-banks/scaffolding-awareness.toml")
        .arg("--answers")
        .arg("1,1,1,2")
        .arg("--output")
        .arg(out.path())
        .arg("--format")
        .arg("all")
        .assert()
        .success();

    let mut extensions: Vec<String> = std::fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            e.path()
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["csv", "html", "json"]);
}

#[test]
fn run_rejects_bad_answer_script() {
    quizmark()
        .arg("run")
        .arg("--quiz")
        .arg("../../question-banks/fire-safety.toml")
        .arg("--answers")
        .arg("2,x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid answer index"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizmark.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("quizmark.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_bank_validates_cleanly() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizmark()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("question-banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn list_banks() {
    quizmark()
        .arg("list")
        .arg("--bank")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("fire-safety"))
        .stdout(predicate::str::contains("commercial-installations"))
        .stdout(predicate::str::contains("scaffolding-awareness"));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();

    let baseline = make_test_report("fire-safety", &[("class-electrical", 0, 2)]);
    let current = make_test_report("fire-safety", &[("class-electrical", 2, 2)]);

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");

    std::fs::write(&baseline_path, &baseline).unwrap();
    std::fs::write(&current_path, &current).unwrap();

    quizmark()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 improved"));
}

#[test]
fn compare_fail_on_slip() {
    let dir = TempDir::new().unwrap();

    let baseline = make_test_report("fire-safety", &[("class-electrical", 2, 2)]);
    let current = make_test_report("fire-safety", &[("class-electrical", 0, 2)]);

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");

    std::fs::write(&baseline_path, &baseline).unwrap();
    std::fs::write(&current_path, &current).unwrap();

    quizmark()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .arg("--fail-on-slip")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_report() {
    quizmark()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn stats_over_reports() {
    let dir = TempDir::new().unwrap();

    std::fs::write(
        dir.path().join("a.json"),
        make_test_report("fire-safety", &[("class-electrical", 2, 2)]),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b.json"),
        make_test_report("fire-safety", &[("class-electrical", 0, 2)]),
    )
    .unwrap();

    quizmark()
        .arg("stats")
        .arg("--reports")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fire-safety"))
        .stdout(predicate::str::contains("class-electrical"));
}

#[test]
fn stats_empty_directory_fails() {
    let dir = TempDir::new().unwrap();

    quizmark()
        .arg("stats")
        .arg("--reports")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no session reports"));
}

#[test]
fn help_output() {
    quizmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal training quiz runner"));
}

#[test]
fn version_output() {
    quizmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizmark"));
}

/// Create a minimal valid JSON session report for testing.
/// Each answer is (question_id, selected_index, correct_index).
fn make_test_report(quiz_id: &str, answers: &[(&str, usize, usize)]) -> String {
    let answer_json: Vec<String> = answers
        .iter()
        .map(|(id, selected, correct_index)| {
            format!(
                r#"{{
                "question_id": "{id}",
                "selected_index": {selected},
                "correct_index": {correct_index},
                "correct": {}
            }}"#,
                selected == correct_index
            )
        })
        .collect();

    let correct = answers.iter().filter(|(_, s, c)| s == c).count();

    format!(
        r#"{{
    "id": "00000000-0000-0000-0000-000000000000",
    "created_at": "2026-01-01T00:00:00Z",
    "quiz": {{
        "id": "{quiz_id}",
        "title": "{quiz_id}",
        "question_count": {total},
        "pass_mark_percent": 70
    }},
    "answers": [{answers_block}],
    "score": {{
        "correct": {correct},
        "answered": {total},
        "total": {total}
    }},
    "duration_ms": 1000
}}"#,
        total = answers.len(),
        answers_block = answer_json.join(", "),
    )
}
