use thiserror::Error;

use crate::core::io::contact_table::ContactTableError;
use crate::core::io::pdb::PdbError;
use crate::core::io::results::ResultTableError;
use crate::core::models::contact::ContactSetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Contact table error: {0}")]
    ContactTable(#[from] ContactTableError),

    #[error("Trajectory file error: {0}")]
    Trajectory(#[from] PdbError),

    #[error("Result table error: {0}")]
    ResultTable(#[from] ResultTableError),

    #[error(transparent)]
    ContactSet(#[from] ContactSetError),

    #[error("Frame source failed: {0}")]
    FrameSource(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("No frames found in trajectory")]
    EmptyTrajectory,

    #[error("Frame results are empty; nothing to aggregate")]
    EmptyResults,

    #[error("Window summary is empty; cannot determine formation order")]
    EmptySummary,

    #[error("No clusters present in window summary (cluster 0 is excluded)")]
    NoClusters,

    #[error("No cluster is ever formed; formation order is undefined")]
    NoFormedClusters,

    #[error("Window size must be at least 1")]
    InvalidWindowSize,
}
