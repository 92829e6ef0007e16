use nalgebra::Point3;
use std::collections::{BTreeMap, HashMap};

/// One time-sampled snapshot of a trajectory: CA positions per residue.
///
/// Frames are identified by the model number of the structure file that
/// produced them; identifiers need not arrive in monotonic order.
#[derive(Debug, Clone)]
pub struct Frame {
    pub id: i32,
    pub coordinates: HashMap<i32, Point3<f64>>,
}

impl Frame {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            coordinates: HashMap::new(),
        }
    }

    pub fn position(&self, residue: i32) -> Option<&Point3<f64>> {
        self.coordinates.get(&residue)
    }
}

/// Contact-formation result for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub frame: i32,
    /// Number of native contacts formed in this frame.
    pub formed: usize,
    /// Fraction of all native contacts formed, `formed / total`.
    pub q: f64,
    /// The formed `(i, j)` pairs, in contact-table order.
    pub formed_pairs: Vec<(i32, i32)>,
    /// Filling fraction per numeric cluster id (0 = unassigned bucket);
    /// every cluster of the contact set is present, formed or not.
    pub filling: BTreeMap<u32, f64>,
}

/// Per-cluster aggregate over a run of consecutive frames, keyed by the
/// frame id of the window's first member. Values are means in float mode,
/// exactly 0.0 or 1.0 after binarization.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub frame: i32,
    pub values: BTreeMap<u32, f64>,
}

/// Centered running average of `q` and of the per-cluster filling
/// fractions for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedFrame {
    pub frame: i32,
    pub q_smooth: f64,
    pub cluster_smooth: BTreeMap<u32, f64>,
}
