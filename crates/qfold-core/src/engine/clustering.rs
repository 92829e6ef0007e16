//! Adjacency-based clustering of native contacts on the 2-D contact map.
//!
//! Contacts are grouped into connected components under a king-move
//! adjacency rule, small components are discarded, and the surviving
//! candidates are adjusted to the target count: surplus candidates are
//! dropped smallest-first, a deficit is covered by splitting the largest
//! candidates with a deterministic two-way partition.

use crate::core::models::contact::ClusterId;
use crate::engine::split::{SplitStrategy, TwoMeansSplit};
use std::collections::HashMap;

/// Parameters of the clustering engine.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Target number of retained clusters (`K`).
    pub cluster_count: usize,
    /// Minimum component size to survive the size filter (`S`).
    pub min_cluster_size: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            cluster_count: 10,
            min_cluster_size: 5,
        }
    }
}

/// Two contacts are adjacent when they are axis-aligned or diagonal
/// neighbors on the contact map.
pub fn are_adjacent(a: (i32, i32), b: (i32, i32)) -> bool {
    let di = (a.0 - b.0).abs();
    let dj = (a.1 - b.1).abs();
    di + dj == 1 || (di == 1 && dj == 1)
}

/// Candidates smaller than this cannot be split further.
const MIN_SPLITTABLE: usize = 4;

pub struct ContactClusterer<S: SplitStrategy = TwoMeansSplit> {
    params: ClusterParams,
    split: S,
}

impl ContactClusterer<TwoMeansSplit> {
    pub fn new(params: ClusterParams) -> Self {
        Self::with_strategy(params, TwoMeansSplit::default())
    }
}

impl<S: SplitStrategy> ContactClusterer<S> {
    pub fn with_strategy(params: ClusterParams, split: S) -> Self {
        Self { params, split }
    }

    /// Produces the cluster assignment for `pairs`, aligned with the input
    /// order. Contacts outside every retained cluster map to `None`.
    pub fn assign(&self, pairs: &[(i32, i32)]) -> Vec<Option<ClusterId>> {
        let components = connected_components(pairs);

        let mut candidates: Vec<Vec<(i32, i32)>> = components
            .into_iter()
            .filter(|component| component.len() >= self.params.min_cluster_size)
            .collect();

        if candidates.is_empty() {
            return vec![None; pairs.len()];
        }

        if candidates.len() >= self.params.cluster_count {
            // Keep the K largest; the stable sort preserves discovery order
            // among equal sizes.
            candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.len()));
            candidates.truncate(self.params.cluster_count);
        } else {
            self.split_to_count(&mut candidates);
        }

        let mut assignment: HashMap<(i32, i32), ClusterId> = HashMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let id = ClusterId::new(index as u32 + 1).expect("cluster ids start at 1");
            for &pair in candidate {
                assignment.insert(pair, id);
            }
        }

        pairs.iter().map(|pair| assignment.get(pair).copied()).collect()
    }

    /// Splits the currently largest candidate (earliest index on ties)
    /// until the target count is reached or the largest candidate cannot
    /// be split. Split halves are appended at the end of the list, which
    /// fixes the final numbering.
    fn split_to_count(&self, candidates: &mut Vec<Vec<(i32, i32)>>) {
        while candidates.len() < self.params.cluster_count {
            let largest = candidates
                .iter()
                .enumerate()
                .max_by_key(|(index, candidate)| (candidate.len(), std::cmp::Reverse(*index)))
                .map(|(index, _)| index)
                .expect("candidates are non-empty");

            if candidates[largest].len() < MIN_SPLITTABLE {
                break;
            }

            match self.split.split(&candidates[largest]) {
                Some((first, second)) => {
                    candidates.remove(largest);
                    candidates.push(first);
                    candidates.push(second);
                }
                // The largest candidate is unsplittable; smaller ones
                // cannot do better, so adjustment stops short of K.
                None => break,
            }
        }
    }
}

/// Connected components of the contact adjacency graph, in order of first
/// discovery; traversal is seeded in input order for reproducibility.
fn connected_components(pairs: &[(i32, i32)]) -> Vec<Vec<(i32, i32)>> {
    let n = pairs.len();
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for a in 0..n {
        for b in (a + 1)..n {
            if are_adjacent(pairs[a], pairs[b]) {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            component.push(pairs[current]);
            for &neighbor in &neighbors[current] {
                if !visited[neighbor] {
                    stack.push(neighbor);
                }
            }
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(assignment: &[Option<ClusterId>]) -> Vec<u32> {
        assignment.iter().map(|c| c.map_or(0, |id| id.get())).collect()
    }

    #[test]
    fn adjacency_covers_axis_and_diagonal_neighbors() {
        assert!(are_adjacent((1, 5), (1, 6)));
        assert!(are_adjacent((1, 5), (2, 5)));
        assert!(are_adjacent((1, 5), (2, 6)));
        assert!(are_adjacent((2, 6), (1, 5)));
        assert!(!are_adjacent((1, 5), (1, 7)));
        assert!(!are_adjacent((1, 5), (3, 6)));
        assert!(!are_adjacent((1, 5), (1, 5)));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let points = [(0, 0), (0, 1), (1, 1), (5, 5), (4, 6)];
        for &a in &points {
            for &b in &points {
                assert_eq!(are_adjacent(a, b), are_adjacent(b, a));
            }
        }
    }

    #[test]
    fn two_components_become_two_clusters() {
        let pairs = vec![
            (1, 5),
            (1, 6),
            (2, 6),
            (10, 20),
            (10, 21),
            (11, 21),
        ];
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 2,
            min_cluster_size: 3,
        });

        assert_eq!(ids(&clusterer.assign(&pairs)), vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn small_components_are_left_unassigned() {
        let pairs = vec![(1, 5), (1, 6), (2, 6), (40, 50)];
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 2,
            min_cluster_size: 3,
        });

        assert_eq!(ids(&clusterer.assign(&pairs)), vec![1, 1, 1, 0]);
    }

    #[test]
    fn no_surviving_component_leaves_everything_unassigned() {
        let pairs = vec![(1, 5), (10, 20), (30, 40)];
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 3,
            min_cluster_size: 2,
        });

        assert!(clusterer.assign(&pairs).iter().all(Option::is_none));
    }

    #[test]
    fn surplus_keeps_the_largest_candidates() {
        // Component sizes 2, 4, 3 in discovery order; K = 2 keeps 4 and 3.
        let pairs = vec![
            (1, 10),
            (1, 11),
            (20, 30),
            (20, 31),
            (21, 30),
            (21, 31),
            (50, 60),
            (50, 61),
            (51, 61),
        ];
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 2,
            min_cluster_size: 2,
        });

        assert_eq!(
            ids(&clusterer.assign(&pairs)),
            vec![0, 0, 1, 1, 1, 1, 2, 2, 2]
        );
    }

    #[test]
    fn deficit_splits_the_largest_component() {
        // A single 8-long chain; K = 2 splits it into two halves numbered
        // in split order.
        let pairs: Vec<(i32, i32)> = (0..8).map(|j| (0, j)).collect();
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 2,
            min_cluster_size: 5,
        });

        assert_eq!(ids(&clusterer.assign(&pairs)), vec![1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn unsplittable_largest_stops_adjustment() {
        let pairs = vec![(1, 5), (1, 6), (2, 6)];
        let clusterer = ContactClusterer::new(ClusterParams {
            cluster_count: 5,
            min_cluster_size: 3,
        });

        // Size 3 is below the splittable minimum; one cluster remains.
        assert_eq!(ids(&clusterer.assign(&pairs)), vec![1, 1, 1]);
    }

    #[test]
    fn assignment_is_deterministic() {
        let pairs: Vec<(i32, i32)> = (0..12)
            .map(|k| (k / 4, 10 + k % 4))
            .chain((0..6).map(|k| (30 + k, 50 + k)))
            .collect();
        let params = ClusterParams {
            cluster_count: 4,
            min_cluster_size: 3,
        };

        let first = ContactClusterer::new(params.clone()).assign(&pairs);
        let second = ContactClusterer::new(params).assign(&pairs);
        assert_eq!(first, second);
    }
}
