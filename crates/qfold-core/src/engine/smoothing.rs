//! Centered running average over per-frame results, for de-noising `q`
//! and the cluster filling fractions before inspection.

use crate::core::models::frame::{FrameResult, SmoothedFrame};
use crate::engine::error::EngineError;
use std::collections::{BTreeMap, BTreeSet};

/// Smooths `results` with a centered running average of `window_size`
/// frames. Each output frame averages the frames from `window_size / 2`
/// before it to `window_size / 2` after it, truncated at the edges, so the
/// output has exactly one entry per input frame.
pub fn smooth(results: &[FrameResult], window_size: usize) -> Result<Vec<SmoothedFrame>, EngineError> {
    if window_size == 0 {
        return Err(EngineError::InvalidWindowSize);
    }
    if results.is_empty() {
        return Err(EngineError::EmptyResults);
    }

    let mut ordered: Vec<&FrameResult> = results.iter().collect();
    ordered.sort_by_key(|result| result.frame);

    let clusters: BTreeSet<u32> = ordered
        .iter()
        .flat_map(|result| result.filling.keys().copied())
        .collect();

    let half = window_size / 2;
    let total = ordered.len();

    let smoothed = ordered
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let start = index.saturating_sub(half);
            let end = (index + half + 1).min(total);
            let window = &ordered[start..end];
            let len = window.len() as f64;

            let q_smooth = window.iter().map(|r| r.q).sum::<f64>() / len;
            let cluster_smooth: BTreeMap<u32, f64> = clusters
                .iter()
                .map(|&cluster| {
                    let sum: f64 = window
                        .iter()
                        .map(|r| r.filling.get(&cluster).copied().unwrap_or(0.0))
                        .sum();
                    (cluster, sum / len)
                })
                .collect();

            SmoothedFrame {
                frame: result.frame,
                q_smooth,
                cluster_smooth,
            }
        })
        .collect();

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(frame: i32, q: f64, filling: &[(u32, f64)]) -> FrameResult {
        FrameResult {
            frame,
            formed: 0,
            q,
            formed_pairs: Vec::new(),
            filling: filling.iter().copied().collect(),
        }
    }

    #[test]
    fn centered_window_truncates_at_the_edges() {
        let results = vec![
            result(1, 0.0, &[(1, 0.0)]),
            result(2, 1.0, &[(1, 1.0)]),
            result(3, 0.0, &[(1, 0.0)]),
            result(4, 1.0, &[(1, 1.0)]),
        ];

        // half = 1: frame 1 averages frames [1, 2], frame 2 averages [1..3].
        let smoothed = smooth(&results, 2).unwrap();
        assert_eq!(smoothed.len(), 4);
        assert!((smoothed[0].q_smooth - 0.5).abs() < 1e-12);
        assert!((smoothed[1].q_smooth - (1.0 / 3.0)).abs() < 1e-12);
        assert!((smoothed[3].q_smooth - 0.5).abs() < 1e-12);
        assert!((smoothed[1].cluster_smooth[&1] - (1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn window_of_one_is_the_identity() {
        let results = vec![result(1, 0.25, &[(1, 0.5)]), result(2, 0.75, &[(1, 1.0)])];

        let smoothed = smooth(&results, 1).unwrap();
        assert_eq!(smoothed[0].q_smooth, 0.25);
        assert_eq!(smoothed[1].cluster_smooth[&1], 1.0);
    }

    #[test]
    fn frames_are_ordered_before_smoothing() {
        let results = vec![result(2, 1.0, &[]), result(1, 0.0, &[])];

        let smoothed = smooth(&results, 1).unwrap();
        assert_eq!(smoothed[0].frame, 1);
        assert_eq!(smoothed[1].frame, 2);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            smooth(&[], 10).unwrap_err(),
            EngineError::EmptyResults
        ));
        assert!(matches!(
            smooth(&[result(1, 0.0, &[])], 0).unwrap_err(),
            EngineError::InvalidWindowSize
        ));
    }
}
