// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `evaluate` subcommand and its configurable flags.
//
// The checkpoint name is a required flag on purpose: an evaluation
// run is meaningless without one, so the CLI refuses to start
// rather than guessing.

use clap::{Args, Subcommand};
use crate::application::evaluate_use_case::EvalConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a trained checkpoint on the test split
    Evaluate(EvaluateArgs),
}

/// All arguments for the `evaluate` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory containing words.txt, tags.txt and the test/ split
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Directory containing params.json and saved checkpoints
    #[arg(long, default_value = "experiments/base_model")]
    pub model_dir: String,

    /// Name of the checkpoint to restore (e.g. "best" or "last");
    /// resolves to <model_dir>/<restore>.mpk.gz
    #[arg(long)]
    pub restore: String,
}

/// Convert CLI EvaluateArgs into the application-layer EvalConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<EvaluateArgs> for EvalConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvalConfig {
            data_dir:  a.data_dir,
            model_dir: a.model_dir,
            restore:   a.restore,
        }
    }
}
