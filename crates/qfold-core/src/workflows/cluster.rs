//! Contact clustering workflow: raw `i j r6 r12` table in, clustered
//! `i,j,r,cluster` CSV out.

use crate::core::io::contact_table::{read_raw_contact_table, write_contact_table};
use crate::core::models::contact::{Contact, ContactSet};
use crate::engine::clustering::{ClusterParams, ContactClusterer};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Raw native-contact table, whitespace-separated `i j r6 r12`.
    pub contacts_path: PathBuf,
    /// Destination of the clustered `i,j,r,cluster` CSV.
    pub output_path: PathBuf,
    pub params: ClusterParams,
}

#[derive(Debug, Clone)]
pub struct ClusterReport {
    pub total: usize,
    pub assigned: usize,
    pub clusters: usize,
}

#[instrument(skip_all, name = "cluster_workflow")]
pub fn run(config: &ClusterConfig, reporter: &ProgressReporter) -> Result<ClusterReport, EngineError> {
    reporter.report(Progress::StageStart { name: "Clustering" });
    info!(
        path = %config.contacts_path.display(),
        "Loading raw contact table."
    );

    let contacts = read_raw_contact_table(&config.contacts_path)?;
    let pairs: Vec<(i32, i32)> = contacts.iter().map(Contact::pair).collect();

    let assignment = ContactClusterer::new(config.params.clone()).assign(&pairs);
    let clustered: Vec<Contact> = contacts
        .into_iter()
        .zip(assignment)
        .map(|(contact, cluster)| Contact { cluster, ..contact })
        .collect();

    let set = ContactSet::new(clustered)?;
    write_contact_table(&set, &config.output_path)?;
    reporter.report(Progress::StageFinish);

    let report = ClusterReport {
        total: set.total(),
        assigned: set.assigned(),
        clusters: set.retained_clusters(),
    };
    info!(
        total = report.total,
        assigned = report.assigned,
        clusters = report.clusters,
        "Clustering complete."
    );
    Ok(report)
}
