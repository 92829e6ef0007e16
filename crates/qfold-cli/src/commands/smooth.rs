use crate::cli::SmoothArgs;
use crate::error::Result;
use qfold::core::io::results::{read_frame_results, write_smoothed};
use qfold::engine::smoothing::smooth;
use tracing::info;

pub fn run(args: SmoothArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| {
        super::sibling(&args.input, &format!("_{}_smoothed.csv", args.window_size))
    });

    info!(path = %args.input.display(), "Loading per-frame results.");
    let results = read_frame_results(&args.input)?;

    let smoothed = smooth(&results, args.window_size)?;
    write_smoothed(&smoothed, &output)?;

    println!(
        "✓ Smoothed {} frame(s) with a window of {}: {}",
        smoothed.len(),
        args.window_size,
        output.display()
    );

    Ok(())
}
