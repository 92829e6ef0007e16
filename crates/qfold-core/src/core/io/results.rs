use crate::core::models::frame::{FrameResult, SmoothedFrame, WindowSummary};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON cell error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing required column '{0}' in result table")]
    MissingColumn(String),
    #[error("Parse error in row {row}: {message}")]
    Parse { row: usize, message: String },
}

/// Per-frame result row. The two composite cells carry structured JSON:
/// `formed_pairs` a nested array of `[i, j]` pairs, `cluster_filling` an
/// object keyed by numeric cluster id.
#[derive(Debug, Serialize, Deserialize)]
struct FrameRow {
    frame: i32,
    contacts: usize,
    q: f64,
    formed_pairs: String,
    cluster_filling: String,
}

const FRAME_COLUMNS: [&str; 5] = ["frame", "contacts", "q", "formed_pairs", "cluster_filling"];

pub fn write_frame_results<P: AsRef<Path>>(
    results: &[FrameResult],
    path: P,
) -> Result<(), ResultTableError> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(FrameRow {
            frame: result.frame,
            contacts: result.formed,
            q: result.q,
            formed_pairs: serde_json::to_string(&result.formed_pairs)?,
            cluster_filling: serde_json::to_string(&result.filling)?,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_frame_results<P: AsRef<Path>>(path: P) -> Result<Vec<FrameResult>, ResultTableError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in FRAME_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ResultTableError::MissingColumn(column.to_string()));
        }
    }

    let mut results = Vec::new();
    for row in reader.deserialize::<FrameRow>() {
        let row = row?;
        results.push(FrameResult {
            frame: row.frame,
            formed: row.contacts,
            q: row.q,
            formed_pairs: serde_json::from_str(&row.formed_pairs)?,
            filling: serde_json::from_str(&row.cluster_filling)?,
        });
    }

    Ok(results)
}

/// Sorted union of the cluster ids present across a window summary.
fn summary_cluster_ids(summaries: &[WindowSummary]) -> Vec<u32> {
    summaries
        .iter()
        .flat_map(|s| s.values.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Writes a window summary table: `frame` (window key) followed by one
/// `cluster_<id>` column per cluster, ascending id.
pub fn write_window_summary<P: AsRef<Path>>(
    summaries: &[WindowSummary],
    path: P,
) -> Result<(), ResultTableError> {
    let cluster_ids = summary_cluster_ids(summaries);

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["frame".to_string()];
    header.extend(cluster_ids.iter().map(|id| format!("cluster_{}", id)));
    writer.write_record(&header)?;

    for summary in summaries {
        let mut row = vec![summary.frame.to_string()];
        for id in &cluster_ids {
            row.push(summary.values.get(id).copied().unwrap_or(0.0).to_string());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_window_summary<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<WindowSummary>, ResultTableError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let frame_column = headers
        .iter()
        .position(|h| h == "frame")
        .ok_or_else(|| ResultTableError::MissingColumn("frame".to_string()))?;

    let cluster_columns: Vec<(usize, u32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            column
                .strip_prefix("cluster_")
                .and_then(|id| id.parse::<u32>().ok())
                .map(|id| (index, id))
        })
        .collect();

    let mut summaries = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = row_index + 1;

        let parse = |field: Option<&str>, name: &str| {
            field
                .ok_or_else(|| ResultTableError::Parse {
                    row: row_number,
                    message: format!("missing value for '{}'", name),
                })
                .and_then(|value| {
                    value.parse::<f64>().map_err(|_| ResultTableError::Parse {
                        row: row_number,
                        message: format!("invalid value for '{}': '{}'", name, value),
                    })
                })
        };

        let frame = record
            .get(frame_column)
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(|| ResultTableError::Parse {
                row: row_number,
                message: "invalid frame value".to_string(),
            })?;

        let mut values = BTreeMap::new();
        for (index, id) in &cluster_columns {
            let value = parse(record.get(*index), &format!("cluster_{}", id))?;
            values.insert(*id, value);
        }

        summaries.push(WindowSummary { frame, values });
    }

    Ok(summaries)
}

/// Writes a smoothed-trajectory table: `frame, q_smooth` followed by one
/// `cluster_<id>_smooth` column per cluster, ascending id.
pub fn write_smoothed<P: AsRef<Path>>(
    smoothed: &[SmoothedFrame],
    path: P,
) -> Result<(), ResultTableError> {
    let cluster_ids: Vec<u32> = smoothed
        .iter()
        .flat_map(|s| s.cluster_smooth.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["frame".to_string(), "q_smooth".to_string()];
    header.extend(cluster_ids.iter().map(|id| format!("cluster_{}_smooth", id)));
    writer.write_record(&header)?;

    for frame in smoothed {
        let mut row = vec![frame.frame.to_string(), frame.q_smooth.to_string()];
        for id in &cluster_ids {
            row.push(
                frame
                    .cluster_smooth
                    .get(id)
                    .copied()
                    .unwrap_or(0.0)
                    .to_string(),
            );
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a formation-order record: one line of comma-separated cluster
/// ids, in stabilization order.
pub fn write_formation_order<P: AsRef<Path>>(
    order: &[u32],
    path: P,
) -> Result<(), ResultTableError> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let line = order
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}
