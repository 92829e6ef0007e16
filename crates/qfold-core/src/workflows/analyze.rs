//! End-to-end trajectory analysis: scan a PDB trajectory against a
//! clustered contact set, write the per-frame table, both window
//! summaries, the formation order, and optionally a smoothed table.

use crate::core::io::contact_table::read_contact_table;
use crate::core::io::pdb::PdbFrames;
use crate::core::io::results::{
    write_formation_order, write_frame_results, write_smoothed, write_window_summary,
};
use crate::engine::error::EngineError;
use crate::engine::order::formation_order;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scanner::TrajectoryScanner;
use crate::engine::smoothing::smooth;
use crate::engine::window::summarize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Multi-model PDB trajectory.
    pub trajectory_path: PathBuf,
    /// Clustered contact table (`i,j,r,cluster`).
    pub contacts_path: PathBuf,
    /// Formation threshold as a multiple of the native distance.
    pub cutoff_distance: f64,
    /// Stop after this many distinct frames.
    pub max_frames: Option<usize>,
    /// Frames per summary window.
    pub window_size: usize,
    /// Binarization cutoff for the binary window summary.
    pub binary_cutoff: f64,
    /// Window of the optional smoothing pass; `None` skips it.
    pub smoothing_window: Option<usize>,
}

impl AnalyzeConfig {
    pub fn new(trajectory_path: PathBuf, contacts_path: PathBuf) -> Self {
        Self {
            trajectory_path,
            contacts_path,
            cutoff_distance: 1.2,
            max_frames: None,
            window_size: 10_000,
            binary_cutoff: 0.5,
            smoothing_window: None,
        }
    }
}

/// The files an analysis run writes, all next to the trajectory.
#[derive(Debug, Clone)]
pub struct AnalyzeOutputs {
    pub parsed: PathBuf,
    pub summary: PathBuf,
    pub summary_binary: PathBuf,
    pub formation_order: PathBuf,
    pub smoothed: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeResult {
    pub frames: usize,
    pub formation_order: Vec<u32>,
    pub outputs: AnalyzeOutputs,
}

fn output_paths(config: &AnalyzeConfig) -> AnalyzeOutputs {
    let base = config
        .trajectory_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("trajectory");
    let dir = config
        .trajectory_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    AnalyzeOutputs {
        parsed: dir.join(format!("{base}_parsed.csv")),
        summary: dir.join(format!("{base}_summary.csv")),
        summary_binary: dir.join(format!("{base}_summary_binary.csv")),
        formation_order: dir.join(format!("{base}_class.txt")),
        smoothed: config
            .smoothing_window
            .map(|window| dir.join(format!("{base}_{window}_smoothed.csv"))),
    }
}

#[instrument(skip_all, name = "analyze_workflow")]
pub fn run(config: &AnalyzeConfig, reporter: &ProgressReporter) -> Result<AnalyzeResult, EngineError> {
    // === Stage 1: Scan the trajectory ===
    reporter.report(Progress::StageStart { name: "Scan" });
    info!(
        trajectory = %config.trajectory_path.display(),
        contacts = %config.contacts_path.display(),
        "Starting trajectory analysis."
    );

    let contacts = read_contact_table(&config.contacts_path)?;
    let mut source = PdbFrames::open(&config.trajectory_path)?;
    let scanner =
        TrajectoryScanner::new(config.cutoff_distance).with_max_frames(config.max_frames);
    let results = scanner.scan(&mut source, &contacts, reporter)?;
    if results.is_empty() {
        return Err(EngineError::EmptyTrajectory);
    }
    reporter.report(Progress::StageFinish);

    let outputs = output_paths(config);
    write_frame_results(&results, &outputs.parsed)?;
    info!(frames = results.len(), path = %outputs.parsed.display(), "Wrote per-frame results.");

    // === Stage 2: Window summaries ===
    reporter.report(Progress::StageStart { name: "Summarize" });
    let summary = summarize(&results, config.window_size, None)?;
    write_window_summary(&summary, &outputs.summary)?;

    let binary = summarize(&results, config.window_size, Some(config.binary_cutoff))?;
    write_window_summary(&binary, &outputs.summary_binary)?;
    info!(windows = summary.len(), "Wrote window summaries.");
    reporter.report(Progress::StageFinish);

    // === Stage 3: Formation order ===
    reporter.report(Progress::StageStart { name: "Classify" });
    let order = formation_order(&binary)?;
    write_formation_order(&order, &outputs.formation_order)?;
    info!(?order, "Wrote formation order.");
    reporter.report(Progress::Message(format!(
        "Formation order: {:?}",
        order
    )));
    reporter.report(Progress::StageFinish);

    // === Stage 4: Optional smoothing pass ===
    if let (Some(window), Some(path)) = (config.smoothing_window, &outputs.smoothed) {
        reporter.report(Progress::StageStart { name: "Smooth" });
        let smoothed = smooth(&results, window)?;
        write_smoothed(&smoothed, path)?;
        info!(window, path = %path.display(), "Wrote smoothed results.");
        reporter.report(Progress::StageFinish);
    }

    info!("Analysis complete.");
    Ok(AnalyzeResult {
        frames: results.len(),
        formation_order: order,
        outputs,
    })
}
