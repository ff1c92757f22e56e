//! quizmark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Terminal training quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a quiz session
    Run {
        /// Path to a .toml question bank
        #[arg(long)]
        quiz: PathBuf,

        /// Scripted zero-based selections (e.g. "0,2,1") instead of prompting
        #[arg(long)]
        answers: Option<String>,

        /// Output directory for session reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, csv, all (comma-separable)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Compare two session reports of the same quiz
    Compare {
        /// Baseline session report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current session report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if any question went from right to wrong
        #[arg(long)]
        fail_on_slip: bool,
    },

    /// Aggregate statistics over saved session reports
    Stats {
        /// Directory containing session report JSON files
        #[arg(long)]
        reports: PathBuf,
    },

    /// List quizzes in a question bank directory
    List {
        /// Bank directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            quiz,
            answers,
            output,
            format,
            config,
        } => commands::run::execute(quiz, answers, output, format, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_slip,
        } => commands::compare::execute(baseline, current, format, fail_on_slip),
        Commands::Stats { reports } => commands::stats::execute(reports),
        Commands::List { bank } => commands::list::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
