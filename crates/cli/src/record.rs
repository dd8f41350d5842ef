//! JSON-lines recording of counterexamples.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use busyperiod_search::Counterexample;

use crate::error::CliError;

/// Appends one JSON object per counterexample to a file.
///
/// Every record is flushed immediately so a killed endless search keeps
/// everything found so far.
#[derive(Debug)]
pub struct Recorder {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Recorder {
    /// Open `path` for appending, creating it if needed.
    pub fn create(path: &Path) -> Result<Self, CliError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CliError::Record {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one counterexample.
    pub fn record(&mut self, found: &Counterexample) -> Result<(), CliError> {
        self.write_line(found).map_err(|source| CliError::Record {
            path: self.path.clone(),
            source,
        })
    }

    fn write_line(&mut self, found: &Counterexample) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, found)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
