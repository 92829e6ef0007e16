use crate::cli::AnalyzeArgs;
use crate::config::build_analyze_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qfold::engine::progress::ProgressReporter;
use qfold::workflows::analyze;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_analyze_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting trajectory analysis...");
    info!("Invoking the core analysis workflow...");
    let result = analyze::run(&config, &reporter)?;

    println!("✓ Analyzed {} frame(s).", result.frames);
    println!("  Per-frame results:  {}", result.outputs.parsed.display());
    println!("  Window summary:     {}", result.outputs.summary.display());
    println!(
        "  Binary summary:     {}",
        result.outputs.summary_binary.display()
    );
    if let Some(smoothed) = &result.outputs.smoothed {
        println!("  Smoothed results:   {}", smoothed.display());
    }
    println!(
        "✓ Cluster formation order: {} ({})",
        format_order(&result.formation_order),
        result.outputs.formation_order.display()
    );

    Ok(())
}

fn format_order(order: &[u32]) -> String {
    order
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
