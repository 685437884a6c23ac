// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
// One command is supported:
//   `evaluate` — loads a checkpoint and scores it on the test split
//
// Reference: Rust Book §12 (Building a CLI Program)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "tagger-eval",
    version = "0.1.0",
    about = "Evaluate a trained sequence-labeling model on a held-out test split."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Evaluate(args) => Self::run_evaluate(args),
        }
    }

    /// Handles the `evaluate` subcommand.
    /// Converts CLI args into an EvalConfig and hands off to Layer 2.
    fn run_evaluate(args: EvaluateArgs) -> Result<()> {
        use crate::application::evaluate_use_case::EvaluateUseCase;

        tracing::info!(
            "Evaluating checkpoint '{}' from '{}'",
            args.restore,
            args.model_dir
        );

        let use_case = EvaluateUseCase::new(args.into());
        let written = use_case.execute()?;

        println!("Evaluation complete. Metrics written to {}", written.display());
        Ok(())
    }
}
