//! PharmExtract Result Store
//!
//! Append-only JSON Lines log of extraction results.
//!
//! # Architecture
//!
//! - One JSON object per line, each independently parseable
//! - Earlier lines are never rewritten, deleted or validated
//! - "Most recent" is the physically last line of the file
//!
//! # Examples
//!
//! ```no_run
//! use pharmextract_domain::ExtractionResult;
//! use pharmextract_store::{JsonlResultStore, Latest};
//!
//! let store = JsonlResultStore::new("extraction_results.jsonl");
//! store.append(&ExtractionResult::default()).unwrap();
//! assert!(matches!(store.load_latest().unwrap(), Latest::Found(_)));
//! ```

#![warn(missing_docs)]

use pharmextract_domain::ExtractionResult;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Bytes read per step when scanning backwards for the last line
const TAIL_CHUNK_SIZE: u64 = 8 * 1024;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A result could not be encoded as JSON
    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// The most recent line is not valid JSON
    #[error("Latest saved result in {path} is corrupt: {reason}")]
    CorruptRecord {
        /// File holding the record
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

/// Outcome of reading the most recent result
#[derive(Debug, Clone, PartialEq)]
pub enum Latest {
    /// The log file does not exist yet
    NoFile,
    /// The log file exists but holds no bytes
    NoLines,
    /// The last line is empty or whitespace
    BlankLine,
    /// The parsed last line
    Found(Value),
}

impl Latest {
    /// Human-readable status for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            Latest::NoFile => "No saved results found",
            Latest::NoLines => "No results in file",
            Latest::BlankLine => "Empty result file",
            Latest::Found(_) => "Loaded from saved results",
        }
    }

    /// The record, if one was found
    pub fn into_record(self) -> Option<Value> {
        match self {
            Latest::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// JSON Lines result log
///
/// # Concurrency
///
/// Each record is written with a single `write_all` on a handle opened in
/// append mode, so concurrent appends from several requests land as whole,
/// uninterleaved lines. No in-process lock is taken.
#[derive(Debug, Clone)]
pub struct JsonlResultStore {
    path: PathBuf,
}

impl JsonlResultStore {
    /// Create a store backed by the given file; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one extraction result as a new line
    pub fn append(&self, result: &ExtractionResult) -> Result<(), StoreError> {
        self.append_record(result)
    }

    /// Append any serializable record as a new line
    pub fn append_record<T: Serialize>(&self, record: &T) -> Result<(), StoreError> {
        // serde_json escapes embedded newlines, so the encoding is one line
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        file.write_all(&line).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        debug!("Appended {} bytes to {}", line.len(), self.path.display());
        Ok(())
    }

    /// Read and parse only the last line of the log
    ///
    /// Missing, empty and blank-tailed files are reported as absent rather
    /// than as errors. A last line that is not JSON is a
    /// [`StoreError::CorruptRecord`]. Earlier lines are never inspected.
    pub fn load_latest(&self) -> Result<Latest, StoreError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Latest::NoFile),
            Err(e) => return Err(self.io_error(e)),
        };

        let line = match read_last_line(&mut file).map_err(|e| self.io_error(e))? {
            None => return Ok(Latest::NoLines),
            Some(line) => line,
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Latest::BlankLine);
        }

        serde_json::from_str(trimmed)
            .map(Latest::Found)
            .map_err(|e| StoreError::CorruptRecord {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Read the last line of a file by scanning backwards from the end
///
/// Line semantics match `str::lines`: a single trailing `\n` (or `\r\n`)
/// terminates the last line rather than starting a new empty one. Returns
/// `None` for an empty file.
fn read_last_line<R: Read + Seek>(reader: &mut R) -> io::Result<Option<String>> {
    let len = reader.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(None);
    }

    let mut pos = len;
    let mut tail: Vec<u8> = Vec::new();
    let mut ends_with_newline = None;

    loop {
        let step = TAIL_CHUNK_SIZE.min(pos);
        pos -= step;
        reader.seek(SeekFrom::Start(pos))?;

        let mut chunk = vec![0u8; step as usize];
        reader.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&tail);
        tail = chunk;

        let terminated = *ends_with_newline.get_or_insert(tail.last() == Some(&b'\n'));
        let search_end = if terminated { tail.len() - 1 } else { tail.len() };

        if let Some(idx) = tail[..search_end].iter().rposition(|&b| b == b'\n') {
            tail.drain(..=idx);
            break;
        }
        if pos == 0 {
            break;
        }
    }

    if tail.last() == Some(&b'\n') {
        tail.pop();
        if tail.last() == Some(&b'\r') {
            tail.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&tail).into_owned()))
}
