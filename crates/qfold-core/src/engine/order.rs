//! Formation-order classification over a binarized window summary.
//!
//! The classifier anchors at the first window where every retained cluster
//! is formed (or, failing that, at the window with the most clusters
//! formed), then walks backwards in time recording each cluster the first
//! time it is seen broken. Reversing that break sequence yields the order
//! in which the clusters formed.

use crate::core::models::frame::WindowSummary;
use crate::engine::error::EngineError;
use std::collections::BTreeSet;

/// A window value at or above this counts as formed; binarized summaries
/// carry exactly 0.0 or 1.0.
const FORMED: f64 = 1.0;

fn formed_clusters(window: &WindowSummary, clusters: &BTreeSet<u32>) -> BTreeSet<u32> {
    clusters
        .iter()
        .filter(|&&cluster| window.values.get(&cluster).copied().unwrap_or(0.0) >= FORMED)
        .copied()
        .collect()
}

/// Determines the cluster formation order from a binarized window summary.
///
/// Cluster 0 (the unassigned bucket) is excluded. Clusters still formed at
/// the start of the trajectory are treated as formed before it began and
/// rank earliest. Each cluster appears at most once, so the result never
/// exceeds the number of retained clusters; it can be shorter when the
/// backward scan exhausts the formed set before every cluster breaks.
pub fn formation_order(summaries: &[WindowSummary]) -> Result<Vec<u32>, EngineError> {
    if summaries.is_empty() {
        return Err(EngineError::EmptySummary);
    }

    let clusters: BTreeSet<u32> = summaries
        .iter()
        .flat_map(|summary| summary.values.keys().copied())
        .filter(|&cluster| cluster != 0)
        .collect();
    if clusters.is_empty() {
        return Err(EngineError::NoClusters);
    }

    let mut ordered: Vec<&WindowSummary> = summaries.iter().collect();
    ordered.sort_by_key(|summary| summary.frame);

    // Anchor at the first fully-formed window, falling back to the first
    // window with the most clusters formed.
    let mut anchor = 0;
    let mut best_formed = 0;
    for (index, window) in ordered.iter().enumerate() {
        let formed = formed_clusters(window, &clusters).len();
        if formed > best_formed {
            best_formed = formed;
            anchor = index;
        }
        if formed == clusters.len() {
            break;
        }
    }
    if best_formed == 0 {
        return Err(EngineError::NoFormedClusters);
    }

    let mut currently_formed = formed_clusters(ordered[anchor], &clusters);
    let mut recorded: BTreeSet<u32> = BTreeSet::new();
    let mut breaks: Vec<u32> = Vec::new();

    for window in ordered[..=anchor].iter().rev() {
        let formed = formed_clusters(window, &clusters);

        // Clusters formed at the later window but broken here, newest
        // break first; simultaneous breaks are recorded in ascending id
        // order. A cluster that breaks, re-forms, and breaks again is
        // recorded only once.
        for &cluster in currently_formed.difference(&formed) {
            if recorded.insert(cluster) {
                breaks.push(cluster);
            }
        }

        currently_formed = formed;
        if recorded.len() == clusters.len() || currently_formed.is_empty() {
            break;
        }
    }

    // Whatever is still formed at the earliest window formed before the
    // trajectory started.
    for cluster in currently_formed {
        if recorded.insert(cluster) {
            breaks.push(cluster);
        }
    }

    breaks.reverse();
    Ok(breaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(frame: i32, values: &[(u32, f64)]) -> WindowSummary {
        WindowSummary {
            frame,
            values: values.iter().copied().collect(),
        }
    }

    #[test]
    fn later_breaks_form_later() {
        let summaries = vec![
            window(1, &[(1, 0.0), (2, 0.0)]),
            window(2, &[(1, 1.0), (2, 0.0)]),
            window(3, &[(1, 1.0), (2, 1.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![1, 2]);
    }

    #[test]
    fn windows_are_ordered_by_frame_first() {
        let summaries = vec![
            window(3, &[(1, 1.0), (2, 1.0)]),
            window(1, &[(1, 0.0), (2, 0.0)]),
            window(2, &[(1, 1.0), (2, 0.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![1, 2]);
    }

    #[test]
    fn reversal_before_the_anchor_is_tracked() {
        // Cluster 1 forms, breaks, and re-forms before everything is
        // formed at once; it is recorded at its newest break only.
        let summaries = vec![
            window(1, &[(1, 0.0), (2, 0.0), (3, 0.0)]),
            window(2, &[(1, 0.0), (2, 0.0), (3, 1.0)]),
            window(3, &[(1, 1.0), (2, 0.0), (3, 1.0)]),
            window(4, &[(1, 0.0), (2, 1.0), (3, 1.0)]),
            window(5, &[(1, 1.0), (2, 1.0), (3, 1.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn anchor_falls_back_to_the_best_window() {
        // Cluster 2 never forms; the anchor is the first window where the
        // formed count peaks.
        let summaries = vec![
            window(1, &[(1, 0.0), (2, 0.0)]),
            window(2, &[(1, 1.0), (2, 0.0)]),
            window(3, &[(1, 0.0), (2, 0.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![1]);
    }

    #[test]
    fn clusters_formed_from_the_start_rank_earliest() {
        let summaries = vec![
            window(1, &[(1, 1.0), (2, 0.0)]),
            window(2, &[(1, 1.0), (2, 1.0)]),
        ];

        // Cluster 1 never breaks during the scan, so it formed before the
        // trajectory began.
        assert_eq!(formation_order(&summaries).unwrap(), vec![1, 2]);
    }

    #[test]
    fn simultaneous_breaks_are_ordered_by_descending_id() {
        let summaries = vec![
            window(1, &[(1, 0.0), (2, 0.0)]),
            window(2, &[(1, 1.0), (2, 1.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![2, 1]);
    }

    #[test]
    fn cluster_zero_is_ignored() {
        let summaries = vec![
            window(1, &[(0, 1.0), (1, 0.0)]),
            window(2, &[(0, 0.0), (1, 1.0)]),
        ];

        assert_eq!(formation_order(&summaries).unwrap(), vec![1]);
    }

    #[test]
    fn degenerate_summaries_are_rejected() {
        assert!(matches!(
            formation_order(&[]).unwrap_err(),
            EngineError::EmptySummary
        ));
        assert!(matches!(
            formation_order(&[window(1, &[(0, 1.0)])]).unwrap_err(),
            EngineError::NoClusters
        ));
        assert!(matches!(
            formation_order(&[window(1, &[(1, 0.0)])]).unwrap_err(),
            EngineError::NoFormedClusters
        ));
    }
}
