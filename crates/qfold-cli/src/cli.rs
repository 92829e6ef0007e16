use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "qfold CLI - Quantify native-contact formation in molecular-dynamics trajectories and determine the order in which contact clusters fold.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster a raw native-contact table into spatial contact clusters.
    Cluster(ClusterArgs),
    /// Run the full analysis pipeline on a PDB trajectory: per-frame
    /// contact formation, window summaries and the cluster formation order.
    Analyze(AnalyzeArgs),
    /// Aggregate a per-frame result table into window means, optionally
    /// binarized against a cutoff.
    Summarize(SummarizeArgs),
    /// Apply a centered running average to a per-frame result table.
    Smooth(SmoothArgs),
    /// Determine the cluster formation order from a binarized window summary.
    Classify(ClassifyArgs),
}

/// Arguments for the `cluster` subcommand.
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Path to the raw native-contact table (whitespace-separated `i j r6 r12`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the clustered contact CSV.
    /// Defaults to `<input>_clustered.csv` next to the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target number of contact clusters.
    #[arg(short = 'k', long, default_value_t = 10, value_name = "INT")]
    pub clusters: usize,

    /// Minimum number of contacts a cluster must have to be retained.
    #[arg(long, default_value_t = 5, value_name = "INT")]
    pub min_size: usize,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the multi-model PDB trajectory.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub trajectory: PathBuf,

    /// Path to the clustered contact table (`i,j,r,cluster` CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub contacts: PathBuf,

    /// Path to an analysis configuration file in TOML format.
    #[arg(short = 'f', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Overrides of config-file values ---
    /// Override the formation threshold, as a multiple of the native distance.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff_distance: Option<f64>,

    /// Override the maximum number of distinct frames to scan.
    #[arg(long, value_name = "INT")]
    pub max_frames: Option<usize>,

    /// Override the number of frames per summary window.
    #[arg(short, long, value_name = "INT")]
    pub window_size: Option<usize>,

    /// Override the binarization cutoff of the binary window summary.
    #[arg(long, value_name = "FLOAT")]
    pub binary_cutoff: Option<f64>,

    /// Also write a smoothed table using this running-average window.
    #[arg(long, value_name = "INT")]
    pub smooth: Option<usize>,
}

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Path to a per-frame result table (`*_parsed.csv`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the window summary CSV.
    /// Defaults to `<input>_summary.csv` (or `_summary_binary.csv` with --cutoff).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of frames per window.
    #[arg(short, long, default_value_t = 10_000, value_name = "INT")]
    pub window_size: usize,

    /// Binarize window means against this cutoff (mean >= cutoff becomes 1).
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,
}

/// Arguments for the `smooth` subcommand.
#[derive(Args, Debug)]
pub struct SmoothArgs {
    /// Path to a per-frame result table (`*_parsed.csv`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the smoothed CSV.
    /// Defaults to `<input>_<window>_smoothed.csv` next to the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Running-average window, centered on each frame.
    #[arg(short, long, default_value_t = 100, value_name = "INT")]
    pub window_size: usize,
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Path to a binarized window summary (`*_summary_binary.csv`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the formation-order file.
    /// Defaults to `<input>_class.txt` next to the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
