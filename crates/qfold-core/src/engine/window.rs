//! Window aggregation of per-frame filling fractions.
//!
//! Frames are grouped into consecutive runs of `window_size` (the last run
//! may be shorter), each cluster's filling is averaged per run, and the
//! result may optionally be binarized against a cutoff.

use crate::core::models::frame::{FrameResult, WindowSummary};
use crate::engine::error::EngineError;
use std::collections::{BTreeMap, BTreeSet};

/// Summarizes `results` into windows of `window_size` frames.
///
/// Each window is keyed by the frame id of its first member and carries the
/// mean filling fraction per cluster. With `binarize_cutoff` set, a mean at
/// or above the cutoff becomes 1.0 and anything below becomes 0.0.
pub fn summarize(
    results: &[FrameResult],
    window_size: usize,
    binarize_cutoff: Option<f64>,
) -> Result<Vec<WindowSummary>, EngineError> {
    if window_size == 0 {
        return Err(EngineError::InvalidWindowSize);
    }
    if results.is_empty() {
        return Err(EngineError::EmptyResults);
    }

    let mut ordered: Vec<&FrameResult> = results.iter().collect();
    ordered.sort_by_key(|result| result.frame);

    // Clusters absent from a frame's filling map count as 0.0 in the mean.
    let clusters: BTreeSet<u32> = ordered
        .iter()
        .flat_map(|result| result.filling.keys().copied())
        .collect();

    let summaries = ordered
        .chunks(window_size)
        .map(|window| {
            let values: BTreeMap<u32, f64> = clusters
                .iter()
                .map(|&cluster| {
                    let sum: f64 = window
                        .iter()
                        .map(|result| result.filling.get(&cluster).copied().unwrap_or(0.0))
                        .sum();
                    let mean = sum / window.len() as f64;
                    let value = match binarize_cutoff {
                        Some(cutoff) if mean >= cutoff => 1.0,
                        Some(_) => 0.0,
                        None => mean,
                    };
                    (cluster, value)
                })
                .collect();

            WindowSummary {
                frame: window[0].frame,
                values,
            }
        })
        .collect();

    Ok(summaries)
}
