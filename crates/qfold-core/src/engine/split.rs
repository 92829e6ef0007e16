//! Two-way partitioning of contact-map points, used by the clustering
//! engine when a connected component must be divided to reach the target
//! cluster count.

/// A deterministic two-way partition over 2-D contact-map coordinates.
///
/// Implementations must be deterministic: identical input slices produce
/// identical partitions on every run.
pub trait SplitStrategy {
    /// Splits `points` into two groups, preserving input order within each
    /// group. Returns `None` when the split is rejected because either side
    /// would end up with fewer than two members.
    fn split(&self, points: &[(i32, i32)]) -> Option<(Vec<(i32, i32)>, Vec<(i32, i32)>)>;
}

/// Lloyd-style 2-means over the integer coordinates with a deterministic
/// seed: the pair of points with the largest squared separation (earliest
/// indices on ties) initializes the two centroids.
#[derive(Debug, Clone)]
pub struct TwoMeansSplit {
    pub max_iterations: usize,
}

impl Default for TwoMeansSplit {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

fn squared_distance(p: (i32, i32), c: (f64, f64)) -> f64 {
    let di = p.0 as f64 - c.0;
    let dj = p.1 as f64 - c.1;
    di * di + dj * dj
}

fn centroid(points: &[(i32, i32)], members: &[usize]) -> (f64, f64) {
    let n = members.len() as f64;
    let (sum_i, sum_j) = members.iter().fold((0.0, 0.0), |(si, sj), &index| {
        (si + points[index].0 as f64, sj + points[index].1 as f64)
    });
    (sum_i / n, sum_j / n)
}

impl TwoMeansSplit {
    /// The two points with the largest squared separation seed the
    /// centroids; earliest index pair wins ties.
    fn seed_centroids(points: &[(i32, i32)]) -> ((f64, f64), (f64, f64)) {
        let mut best = (0, 1);
        let mut best_distance = -1.0_f64;
        for a in 0..points.len() {
            for b in (a + 1)..points.len() {
                let di = (points[a].0 - points[b].0) as f64;
                let dj = (points[a].1 - points[b].1) as f64;
                let distance = di * di + dj * dj;
                if distance > best_distance {
                    best_distance = distance;
                    best = (a, b);
                }
            }
        }
        let (a, b) = best;
        (
            (points[a].0 as f64, points[a].1 as f64),
            (points[b].0 as f64, points[b].1 as f64),
        )
    }
}

impl SplitStrategy for TwoMeansSplit {
    fn split(&self, points: &[(i32, i32)]) -> Option<(Vec<(i32, i32)>, Vec<(i32, i32)>)> {
        if points.len() < 4 {
            return None;
        }

        let (mut centroid_a, mut centroid_b) = Self::seed_centroids(points);
        let mut labels = vec![false; points.len()];

        for _ in 0..self.max_iterations {
            let mut changed = false;
            for (index, &point) in points.iter().enumerate() {
                // Ties go to the first centroid.
                let to_b = squared_distance(point, centroid_b) < squared_distance(point, centroid_a);
                if labels[index] != to_b {
                    labels[index] = to_b;
                    changed = true;
                }
            }

            let group_a: Vec<usize> = (0..points.len()).filter(|&i| !labels[i]).collect();
            let group_b: Vec<usize> = (0..points.len()).filter(|&i| labels[i]).collect();
            if group_a.is_empty() || group_b.is_empty() {
                return None;
            }

            centroid_a = centroid(points, &group_a);
            centroid_b = centroid(points, &group_b);

            if !changed {
                break;
            }
        }

        let group_a: Vec<(i32, i32)> = points
            .iter()
            .zip(&labels)
            .filter(|&(_, &to_b)| !to_b)
            .map(|(&p, _)| p)
            .collect();
        let group_b: Vec<(i32, i32)> = points
            .iter()
            .zip(&labels)
            .filter(|&(_, &to_b)| to_b)
            .map(|(&p, _)| p)
            .collect();

        if group_a.len() < 2 || group_b.len() < 2 {
            return None;
        }

        Some((group_a, group_b))
    }
}
