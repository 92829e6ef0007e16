use crate::cli::ClusterArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qfold::engine::clustering::ClusterParams;
use qfold::engine::progress::ProgressReporter;
use qfold::workflows::cluster::{self, ClusterConfig};
use tracing::info;

pub fn run(args: ClusterArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling(&args.input, "_clustered.csv"));

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the clustering workflow...");
    let report = cluster::run(
        &ClusterConfig {
            contacts_path: args.input.clone(),
            output_path: output.clone(),
            params: ClusterParams {
                cluster_count: args.clusters,
                min_cluster_size: args.min_size,
            },
        },
        &reporter,
    )?;

    println!(
        "✓ Assigned {}/{} contacts to {} cluster(s): {}",
        report.assigned,
        report.total,
        report.clusters,
        output.display()
    );

    Ok(())
}
