use crate::core::models::contact::{ClusterId, Contact, ContactSet, ContactSetError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column '{0}' in contact table")]
    MissingColumn(String),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    InvalidSet(#[from] ContactSetError),
}

/// Reference distance from the raw pair-potential coefficients.
///
/// `r = 10 * sqrt(1.2 * r12 / r6)`, in angstroms.
pub fn native_distance(r6: f64, r12: f64) -> f64 {
    10.0 * (1.2 * r12 / r6).sqrt()
}

/// Reads a raw native-contact table: whitespace-separated columns
/// `i j r6 r12`, no header. The reference distance is derived from the
/// coefficients; all contacts start unassigned.
pub fn read_raw_contact_table<P: AsRef<Path>>(path: P) -> Result<Vec<Contact>, ContactTableError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut contacts = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(ContactTableError::Parse {
                line: line_number,
                message: format!("expected 4 columns (i j r6 r12), found {}", fields.len()),
            });
        }

        let parse_int = |field: &str, name: &str| {
            field.parse::<i32>().map_err(|_| ContactTableError::Parse {
                line: line_number,
                message: format!("invalid integer for '{}': '{}'", name, field),
            })
        };
        let parse_float = |field: &str, name: &str| {
            field.parse::<f64>().map_err(|_| ContactTableError::Parse {
                line: line_number,
                message: format!("invalid float for '{}': '{}'", name, field),
            })
        };

        let i = parse_int(fields[0], "i")?;
        let j = parse_int(fields[1], "j")?;
        let r6 = parse_float(fields[2], "r6")?;
        let r12 = parse_float(fields[3], "r12")?;

        contacts.push(Contact {
            i,
            j,
            r: native_distance(r6, r12),
            cluster: None,
        });
    }

    Ok(contacts)
}

#[derive(Debug, Serialize, Deserialize)]
struct ContactRow {
    i: i32,
    j: i32,
    r: f64,
    cluster: u32,
}

const CONTACT_COLUMNS: [&str; 4] = ["i", "j", "r", "cluster"];

/// Reads a clustered contact table: CSV with header `i,j,r,cluster`,
/// where `cluster = 0` marks an unassigned contact.
pub fn read_contact_table<P: AsRef<Path>>(path: P) -> Result<ContactSet, ContactTableError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in CONTACT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ContactTableError::MissingColumn(column.to_string()));
        }
    }

    let mut contacts = Vec::new();
    for row in reader.deserialize::<ContactRow>() {
        let row = row?;
        contacts.push(Contact {
            i: row.i,
            j: row.j,
            r: row.r,
            cluster: ClusterId::new(row.cluster),
        });
    }

    Ok(ContactSet::new(contacts)?)
}

/// Writes a contact set as a clustered contact table (`i,j,r,cluster`).
pub fn write_contact_table<P: AsRef<Path>>(
    set: &ContactSet,
    path: P,
) -> Result<(), ContactTableError> {
    let mut writer = csv::Writer::from_path(path)?;
    for contact in set.contacts() {
        writer.serialize(ContactRow {
            i: contact.i,
            j: contact.j,
            r: contact.r,
            cluster: contact.cluster_index(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn raw_table_derives_native_distance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "1 5 1.0 1.44").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2 6 2.0 1.0").unwrap();

        let contacts = read_raw_contact_table(&path).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].pair(), (1, 5));
        assert!((contacts[0].r - 10.0 * (1.2f64 * 1.44).sqrt()).abs() < 1e-12);
        assert!((contacts[1].r - 10.0 * (1.2f64 * 0.5).sqrt()).abs() < 1e-12);
        assert!(contacts.iter().all(|c| c.cluster.is_none()));
    }

    #[test]
    fn raw_table_rejects_short_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "1 5 1.0").unwrap();

        let err = read_raw_contact_table(&path).unwrap_err();
        assert!(matches!(err, ContactTableError::Parse { line: 1, .. }));
    }

    #[test]
    fn clustered_table_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clustered.csv");

        let set = ContactSet::new(vec![
            Contact {
                i: 1,
                j: 5,
                r: 8.25,
                cluster: ClusterId::new(1),
            },
            Contact {
                i: 2,
                j: 6,
                r: 9.5,
                cluster: None,
            },
        ])
        .unwrap();

        write_contact_table(&set, &path).unwrap();
        let loaded = read_contact_table(&path).unwrap();

        assert_eq!(loaded.total(), 2);
        assert_eq!(loaded.contacts()[0].cluster, ClusterId::new(1));
        assert_eq!(loaded.contacts()[1].cluster, None);
        assert_eq!(loaded.contacts()[0].r, 8.25);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "i,j,r").unwrap();
        writeln!(file, "1,5,8.0").unwrap();

        let err = read_contact_table(&path).unwrap_err();
        assert!(matches!(err, ContactTableError::MissingColumn(c) if c == "cluster"));
    }

    #[test]
    fn duplicate_pairs_fail_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "i,j,r,cluster").unwrap();
        writeln!(file, "1,5,8.0,1").unwrap();
        writeln!(file, "1,5,8.0,2").unwrap();

        let err = read_contact_table(&path).unwrap_err();
        assert!(matches!(err, ContactTableError::InvalidSet(_)));
    }

}
