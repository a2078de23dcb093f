use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a streaming merge
#[derive(Clone, Debug)]
pub struct MergeReport {
    pub output: PathBuf,
    pub records_written: usize,
    pub duplicates: usize,
    pub merge_time: Duration,
}

/// Outcome of an in-memory sort or sort merge
#[derive(Clone, Debug)]
pub struct SortReport {
    pub output: PathBuf,
    /// Records loaded from all inputs
    pub records: usize,
    pub records_written: usize,
    /// Records dropped as duplicates, always 0 for a plain sort
    pub duplicates: usize,
    /// Whether duplicates were dropped, true for a sort merge
    pub deduplicated: bool,
    pub read_time: Duration,
    pub sort_time: Duration,
    pub write_time: Duration,
}

impl Display for MergeReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "out: {}", self.output.display())?;
        writeln!(f, "dup: {}", self.duplicates)?;
        write!(f, "merge: {}ms", self.merge_time.as_millis())
    }
}

impl Display for SortReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.deduplicated {
            writeln!(f, "out: {} (ndat={})", self.output.display(), self.records)?;
        } else {
            writeln!(f, "out: {}", self.output.display())?;
        }
        writeln!(f, "read: {}ms", self.read_time.as_millis())?;
        writeln!(f, "sort: {}ms", self.sort_time.as_millis())?;
        write!(f, "write: {}ms", self.write_time.as_millis())
    }
}
