use crate::cli::SummarizeArgs;
use crate::error::Result;
use qfold::core::io::results::{read_frame_results, write_window_summary};
use qfold::engine::window::summarize;
use tracing::info;

pub fn run(args: SummarizeArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| {
        let suffix = if args.cutoff.is_some() {
            "_summary_binary.csv"
        } else {
            "_summary.csv"
        };
        super::sibling(&args.input, suffix)
    });

    info!(path = %args.input.display(), "Loading per-frame results.");
    let results = read_frame_results(&args.input)?;

    let summaries = summarize(&results, args.window_size, args.cutoff)?;
    write_window_summary(&summaries, &output)?;

    println!(
        "✓ Summarized {} frame(s) into {} window(s): {}",
        results.len(),
        summaries.len(),
        output.display()
    );

    Ok(())
}
