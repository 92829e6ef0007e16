//! Per-frame contact formation: which native contacts are formed in a
//! frame, the global `q` fraction, and per-cluster filling fractions.

use crate::core::models::contact::ContactSet;
use crate::core::models::frame::{Frame, FrameResult};
use std::collections::BTreeMap;

/// Evaluates frames against a fixed contact set.
///
/// A contact `(i, j)` with reference distance `r` counts as formed when the
/// frame carries positions for both residues and their distance is strictly
/// below `r * cutoff_distance`. Contacts with a missing residue are simply
/// not formed.
pub struct FrameEvaluator<'a> {
    contacts: &'a ContactSet,
    cutoff_distance: f64,
}

impl<'a> FrameEvaluator<'a> {
    pub fn new(contacts: &'a ContactSet, cutoff_distance: f64) -> Self {
        Self {
            contacts,
            cutoff_distance,
        }
    }

    pub fn evaluate(&self, frame: &Frame) -> FrameResult {
        let mut formed_pairs = Vec::new();
        let mut formed_per_cluster: BTreeMap<u32, usize> = BTreeMap::new();

        for contact in self.contacts.contacts() {
            let (Some(a), Some(b)) = (frame.position(contact.i), frame.position(contact.j))
            else {
                continue;
            };
            if (a - b).norm() < contact.r * self.cutoff_distance {
                formed_pairs.push(contact.pair());
                *formed_per_cluster.entry(contact.cluster_index()).or_insert(0) += 1;
            }
        }

        let total = self.contacts.total();
        let formed = formed_pairs.len();
        let q = if total == 0 {
            0.0
        } else {
            formed as f64 / total as f64
        };

        // Every cluster of the set appears in the filling map, formed or not.
        let filling = self
            .contacts
            .cluster_sizes()
            .iter()
            .map(|(&id, &size)| {
                let count = formed_per_cluster.get(&id).copied().unwrap_or(0);
                (id, count as f64 / size as f64)
            })
            .collect();

        FrameResult {
            frame: frame.id,
            formed,
            q,
            formed_pairs,
            filling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::contact::{ClusterId, Contact};
    use nalgebra::Point3;

    fn contact(i: i32, j: i32, r: f64, cluster: u32) -> Contact {
        Contact {
            i,
            j,
            r,
            cluster: ClusterId::new(cluster),
        }
    }

    fn frame(id: i32, positions: &[(i32, [f64; 3])]) -> Frame {
        let mut frame = Frame::new(id);
        for &(residue, [x, y, z]) in positions {
            frame.coordinates.insert(residue, Point3::new(x, y, z));
        }
        frame
    }

    #[test]
    fn formed_contacts_drive_q_and_filling() {
        let set = ContactSet::new(vec![
            contact(1, 5, 8.0, 1),
            contact(1, 6, 8.0, 1),
            contact(2, 9, 8.0, 2),
            contact(3, 9, 8.0, 2),
        ])
        .unwrap();

        // Residues 1, 5, 6 are close; 2, 3, 9 are far apart.
        let frame = frame(
            7,
            &[
                (1, [0.0, 0.0, 0.0]),
                (5, [4.0, 0.0, 0.0]),
                (6, [0.0, 4.0, 0.0]),
                (2, [100.0, 0.0, 0.0]),
                (3, [200.0, 0.0, 0.0]),
                (9, [300.0, 0.0, 0.0]),
            ],
        );

        let result = FrameEvaluator::new(&set, 1.2).evaluate(&frame);
        assert_eq!(result.frame, 7);
        assert_eq!(result.formed, 2);
        assert!((result.q - 0.5).abs() < 1e-12);
        assert_eq!(result.formed_pairs, vec![(1, 5), (1, 6)]);
        assert_eq!(result.filling.get(&1), Some(&1.0));
        assert_eq!(result.filling.get(&2), Some(&0.0));
    }

    #[test]
    fn missing_residue_means_not_formed() {
        let set = ContactSet::new(vec![contact(1, 5, 8.0, 1)]).unwrap();
        let frame = frame(1, &[(1, [0.0, 0.0, 0.0])]);

        let result = FrameEvaluator::new(&set, 1.2).evaluate(&frame);
        assert_eq!(result.formed, 0);
        assert_eq!(result.q, 0.0);
        assert_eq!(result.filling.get(&1), Some(&0.0));
    }

    #[test]
    fn distance_exactly_at_threshold_is_not_formed() {
        let set = ContactSet::new(vec![contact(1, 5, 10.0, 1)]).unwrap();
        // 10.0 * 1.2 = 12.0; place the pair exactly 12.0 apart.
        let frame = frame(1, &[(1, [0.0, 0.0, 0.0]), (5, [12.0, 0.0, 0.0])]);

        let result = FrameEvaluator::new(&set, 1.2).evaluate(&frame);
        assert_eq!(result.formed, 0);
    }

    #[test]
    fn unassigned_contacts_fill_cluster_zero() {
        let set = ContactSet::new(vec![contact(1, 5, 8.0, 0), contact(2, 6, 8.0, 0)]).unwrap();
        let frame = frame(
            1,
            &[
                (1, [0.0, 0.0, 0.0]),
                (5, [1.0, 0.0, 0.0]),
                (2, [0.0, 0.0, 0.0]),
                (6, [50.0, 0.0, 0.0]),
            ],
        );

        let result = FrameEvaluator::new(&set, 1.2).evaluate(&frame);
        assert_eq!(result.filling.get(&0), Some(&0.5));
    }
}
