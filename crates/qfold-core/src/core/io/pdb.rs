use crate::core::io::traits::FrameSource;
use crate::core::models::frame::Frame;
use nalgebra::Point3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid MODEL record on line {line}: '{content}'")]
    InvalidModelRecord { line: usize, content: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Streaming frame source over a multi-model PDB file.
///
/// Each `MODEL n` record opens frame `n`; `ENDMDL` closes it. A trailing
/// model without `ENDMDL` is still emitted, and a file with no `MODEL`
/// records at all yields a single frame with id 1. Only CA atoms are
/// collected (atom-name columns 13-16); ATOM lines that are too short or
/// fail to parse are skipped silently.
pub struct PdbFrames<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    current_id: Option<i32>,
    coordinates: HashMap<i32, Point3<f64>>,
    saw_model: bool,
    done: bool,
}

impl PdbFrames<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdbError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> PdbFrames<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            current_id: None,
            coordinates: HashMap::new(),
            saw_model: false,
            done: false,
        }
    }

    fn take_frame(&mut self, id: i32) -> Frame {
        Frame {
            id,
            coordinates: std::mem::take(&mut self.coordinates),
        }
    }

    fn parse_model_id(&self, line: &str) -> Result<i32, PdbError> {
        line.split_whitespace()
            .nth(1)
            .and_then(|token| token.parse::<i32>().ok())
            .ok_or_else(|| PdbError::InvalidModelRecord {
                line: self.line_number,
                content: line.to_string(),
            })
    }

    fn collect_ca_atom(&mut self, line: &str) {
        if line.len() < 54 || slice_and_trim(line, 12, 16) != "CA" {
            return;
        }

        let residue = slice_and_trim(line, 22, 26).parse::<i32>();
        let x = slice_and_trim(line, 30, 38).parse::<f64>();
        let y = slice_and_trim(line, 38, 46).parse::<f64>();
        let z = slice_and_trim(line, 46, 54).parse::<f64>();

        if let (Ok(residue), Ok(x), Ok(y), Ok(z)) = (residue, x, y, z) {
            self.coordinates.insert(residue, Point3::new(x, y, z));
        }
    }
}

impl<R: BufRead> FrameSource for PdbFrames<R> {
    type Error = PdbError;

    fn next_frame(&mut self) -> Result<Option<Frame>, PdbError> {
        if self.done {
            return Ok(None);
        }

        while let Some(line) = self.lines.next() {
            let line = line?;
            self.line_number += 1;

            if line.starts_with("MODEL") {
                let new_id = self.parse_model_id(&line)?;
                let previous = self.current_id.replace(new_id);
                self.saw_model = true;
                match previous {
                    // Previous model never saw ENDMDL; emit it now.
                    Some(id) => return Ok(Some(self.take_frame(id))),
                    // Atoms before the first MODEL belong to no frame.
                    None => self.coordinates.clear(),
                }
            } else if line.starts_with("ATOM") {
                self.collect_ca_atom(&line);
            } else if line.starts_with("ENDMDL") {
                if let Some(id) = self.current_id.take() {
                    return Ok(Some(self.take_frame(id)));
                }
            }
        }

        self.done = true;

        if let Some(id) = self.current_id.take() {
            if !self.coordinates.is_empty() {
                return Ok(Some(self.take_frame(id)));
            }
        }
        if !self.saw_model && !self.coordinates.is_empty() {
            return Ok(Some(self.take_frame(1)));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ca_line(serial: usize, residue: i32, x: f64, y: f64, z: f64) -> String {
        format!(
            "ATOM  {:>5}  CA  ALA A{:>4}    {:>8.3}{:>8.3}{:>8.3}",
            serial, residue, x, y, z
        )
    }

    fn drain<R: BufRead>(mut source: PdbFrames<R>) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn reads_multi_model_file() {
        let pdb = format!(
            "MODEL        1\n{}\n{}\nENDMDL\nMODEL        2\n{}\nENDMDL\n",
            ca_line(1, 1, 0.0, 0.0, 0.0),
            ca_line(2, 2, 3.0, 4.0, 0.0),
            ca_line(1, 1, 1.0, 1.0, 1.0),
        );

        let frames = drain(PdbFrames::from_reader(Cursor::new(pdb)));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].id, 1);
        assert_eq!(frames[0].coordinates.len(), 2);
        assert_eq!(frames[0].position(2), Some(&Point3::new(3.0, 4.0, 0.0)));
        assert_eq!(frames[1].id, 2);
        assert_eq!(frames[1].position(1), Some(&Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn trailing_model_without_endmdl_is_kept() {
        let pdb = format!(
            "MODEL        1\n{}\nENDMDL\nMODEL        2\n{}\n",
            ca_line(1, 1, 0.0, 0.0, 0.0),
            ca_line(1, 1, 2.0, 2.0, 2.0),
        );

        let frames = drain(PdbFrames::from_reader(Cursor::new(pdb)));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].id, 2);
    }

    #[test]
    fn headerless_single_model_gets_id_one() {
        let pdb = format!("{}\n{}\n", ca_line(1, 1, 0.0, 0.0, 0.0), ca_line(2, 2, 1.0, 0.0, 0.0));

        let frames = drain(PdbFrames::from_reader(Cursor::new(pdb)));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, 1);
        assert_eq!(frames[0].coordinates.len(), 2);
    }

    #[test]
    fn non_ca_and_malformed_atom_lines_are_skipped() {
        let pdb = concat!(
            "MODEL        1\n",
            "ATOM      1  N   ALA A   1       0.000   0.000   0.000\n",
            "ATOM      2  CA  ALA\n",
            "ATOM      3  CA  ALA A   7       1.000   2.000   3.000\n",
            "ENDMDL\n"
        );

        let frames = drain(PdbFrames::from_reader(Cursor::new(pdb)));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].coordinates.len(), 1);
        assert_eq!(frames[0].position(7), Some(&Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn invalid_model_record_is_an_error() {
        let mut source = PdbFrames::from_reader(Cursor::new("MODEL abc\n"));
        assert!(matches!(
            source.next_frame(),
            Err(PdbError::InvalidModelRecord { line: 1, .. })
        ));
    }

    #[test]
    fn empty_file_yields_no_frames() {
        let frames = drain(PdbFrames::from_reader(Cursor::new("")));
        assert!(frames.is_empty());
    }
}
