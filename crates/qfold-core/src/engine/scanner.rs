//! Streaming trajectory scan: pulls frames from a [`FrameSource`] one at a
//! time and evaluates contact formation for each, so trajectories never
//! need to fit in memory as coordinates.

use crate::core::io::traits::FrameSource;
use crate::core::models::contact::ContactSet;
use crate::core::models::frame::FrameResult;
use crate::engine::error::EngineError;
use crate::engine::evaluator::FrameEvaluator;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct TrajectoryScanner {
    pub cutoff_distance: f64,
    /// Stop after this many distinct frame ids; `None` scans to the end.
    pub max_frames: Option<usize>,
}

impl TrajectoryScanner {
    pub fn new(cutoff_distance: f64) -> Self {
        Self {
            cutoff_distance,
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Evaluates every frame of `source` against `contacts` and returns
    /// the results ordered by frame id. When the source repeats a frame id,
    /// the last occurrence wins. An exhausted source yields an empty vec.
    pub fn scan<S: FrameSource>(
        &self,
        source: &mut S,
        contacts: &ContactSet,
        reporter: &ProgressReporter,
    ) -> Result<Vec<FrameResult>, EngineError> {
        let evaluator = FrameEvaluator::new(contacts, self.cutoff_distance);
        let mut results: BTreeMap<i32, FrameResult> = BTreeMap::new();

        reporter.report(Progress::ScanStart {
            total_frames: self.max_frames.map(|n| n as u64),
        });

        loop {
            let frame = source
                .next_frame()
                .map_err(|e| EngineError::FrameSource(Box::new(e)))?;
            let Some(frame) = frame else {
                break;
            };

            results.insert(frame.id, evaluator.evaluate(&frame));
            reporter.report(Progress::FrameScanned);

            if self.max_frames.is_some_and(|limit| results.len() >= limit) {
                break;
            }
        }

        reporter.report(Progress::ScanFinish {
            frames: results.len(),
        });

        // An empty source yields an empty sequence; whether that is fatal
        // is the caller's call.
        Ok(results.into_values().collect())
    }
}
