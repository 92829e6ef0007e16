use crate::cli::ClassifyArgs;
use crate::error::Result;
use qfold::core::io::results::{read_window_summary, write_formation_order};
use qfold::engine::order::formation_order;
use tracing::info;

pub fn run(args: ClassifyArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| super::sibling(&args.input, "_class.txt"));

    info!(path = %args.input.display(), "Loading binarized window summary.");
    let summaries = read_window_summary(&args.input)?;

    let order = formation_order(&summaries)?;
    write_formation_order(&order, &output)?;

    let formatted = order
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ");
    println!("✓ Cluster formation order: {} ({})", formatted, output.display());

    Ok(())
}
