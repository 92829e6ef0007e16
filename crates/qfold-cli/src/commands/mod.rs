pub mod analyze;
pub mod classify;
pub mod cluster;
pub mod smooth;
pub mod summarize;

use std::path::{Path, PathBuf};

/// Derives a default output path next to `input`: `<stem><suffix>`.
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("results");
    input.with_file_name(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_replaces_the_file_name() {
        assert_eq!(
            sibling(Path::new("data/run.pdb"), "_parsed.csv"),
            PathBuf::from("data/run_parsed.csv")
        );
        assert_eq!(
            sibling(Path::new("contacts.txt"), "_clustered.csv"),
            PathBuf::from("contacts_clustered.csv")
        );
    }
}
