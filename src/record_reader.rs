use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::errors::{PresortError, Result};
use crate::id_policy::IdPolicy;
use crate::record::Record;

/// Decodes records line by line from a buffered source.
pub struct RecordReader<R: BufRead> {
    source_name: String,
    reader: R,
    line_number: usize,
    id_policy: IdPolicy,
    ignore_empty: bool,
    ignore_lines: Option<Regex>,
}

impl RecordReader<BufReader<File>> {
    /// Open `path` for reading. Failure to open is reported as [PresortError::FileOpen].
    pub fn open(path: &Path, id_policy: IdPolicy) -> Result<RecordReader<BufReader<File>>> {
        let file = File::open(path).map_err(|source| PresortError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(RecordReader::new(path.to_string_lossy().to_string(), BufReader::new(file), id_policy))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap a reader. `source_name` is used in error messages.
    pub fn new(source_name: String, reader: R, id_policy: IdPolicy) -> RecordReader<R> {
        RecordReader {
            source_name,
            reader,
            line_number: 0,
            id_policy,
            ignore_empty: true,
            ignore_lines: None,
        }
    }

    /// Skip empty lines. The default is true.
    pub fn with_ignore_empty(mut self, ignore_empty: bool) -> RecordReader<R> {
        self.ignore_empty = ignore_empty;
        self
    }

    /// Skip lines matching `ignore_lines`.
    pub fn with_ignore_lines(mut self, ignore_lines: Option<Regex>) -> RecordReader<R> {
        self.ignore_lines = ignore_lines;
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of lines consumed so far, including skipped ones.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next record, `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.ignore_empty && line.trim().is_empty() {
                continue;
            }

            if let Some(r) = &self.ignore_lines {
                if r.is_match(line.trim()) {
                    continue;
                }
            }

            let record = Record::decode(&line, self.id_policy).map_err(|e| PresortError::MalformedRecord {
                source_name: self.source_name.clone(),
                line: self.line_number,
                reason: e.to_string(),
            })?;
            return Ok(Some(record));
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
