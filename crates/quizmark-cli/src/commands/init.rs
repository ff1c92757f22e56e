//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizmark.toml
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit question-banks/example.toml with your own questions");
    println!("  2. Run: quizmark validate --quiz question-banks/example.toml");
    println!("  3. Run: quizmark run --quiz question-banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

# Where session reports are written.
output_dir = "./quizmark-results"

# Report format(s) used when --format is not given: json, html, csv, all.
default_format = "json"
"#;

const EXAMPLE_BANK: &str = r#"[quiz]
id = "example"
title = "Example Quiz"
description = "A simple example quiz to get started"
kind = "quiz"
tags = ["example"]
pass_mark_percent = 70

[[questions]]
id = "ppe-hard-hat"
prompt = "When must a hard hat be worn on site?"
options = [
    "Only when working at height",
    "Whenever the site rules require it",
    "Only during demolition work",
]
correct_index = 1
explanation = "Site rules set the mandatory PPE for every area; hard hat zones are signed at the entrance."
tags = ["ppe"]

[[questions]]
id = "first-aid-kit"
prompt = "Where should the location of the nearest first aid kit be shown?"
options = [
    "On the site induction and safety noticeboard",
    "Only in the site manager's office",
    "It does not need to be shown",
]
correct_index = 0
explanation = "First aid arrangements are covered at induction and posted on the safety noticeboard."
tags = ["first-aid"]
"#;
