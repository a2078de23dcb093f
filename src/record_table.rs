use std::cmp::Ordering;
use std::io::Write;

use crate::dedup::{resolve, DedupPolicy, Resolution};
use crate::errors::{PresortError, Result};
use crate::key::{compare_key, compare_sort};
use crate::key_mode::KeyMode;
use crate::record::Record;

/// Capacity used by the plain sort unless configured otherwise
pub const DEFAULT_SORT_CAPACITY: usize = 3_340_000;
/// Capacity used by the sort merge unless configured otherwise
pub const DEFAULT_SORT_MERGE_CAPACITY: usize = 2 * DEFAULT_SORT_CAPACITY;

/// Counters collected while writing a [RecordTable]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub records_written: usize,
    pub duplicates: usize,
}

/// All records of a run, held in memory with a checked upper bound on their number.
#[derive(Debug)]
pub struct RecordTable {
    records: Vec<Record>,
    capacity: usize,
}

impl RecordTable {
    pub fn with_capacity(capacity: usize) -> RecordTable {
        RecordTable {
            records: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Add a record, failing with [PresortError::CapacityExceeded] when the table is full.
    pub fn push(&mut self, record: Record) -> Result<()> {
        if self.records.len() >= self.capacity {
            return Err(PresortError::CapacityExceeded { capacity: self.capacity });
        }
        self.records.push(record);
        Ok(())
    }

    /// Append every record of `source`, returning how many were added.
    pub fn load<I>(&mut self, source: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let before = self.records.len();
        for record in source {
            self.push(record?)?;
        }
        Ok(self.records.len() - before)
    }

    /// Sort by primary key, then `updated_at` ascending. Records equal in both keep their
    /// load order.
    pub fn sort(&mut self, mode: KeyMode) {
        self.records.sort_by(|a, b| compare_sort(a, b, mode));
    }

    /// Write every record in the current order.
    pub fn write_all<W: Write>(&self, writer: &mut W) -> Result<WriteStats> {
        for record in &self.records {
            record.encode(writer)?;
        }
        Ok(
            WriteStats {
                records_written: self.records.len(),
                duplicates: 0,
            }
        )
    }

    /// Write one record for each run of equal keys. The table must be sorted with
    /// [RecordTable::sort] under the same `mode`.
    pub fn write_deduplicated<W: Write>(&self, writer: &mut W, mode: KeyMode, policy: DedupPolicy) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        let mut records = self.records.iter();
        let mut held = match records.next() {
            Some(record) => record,
            None => return Ok(stats),
        };

        for record in records {
            if compare_key(held, record, mode) == Ordering::Equal {
                stats.duplicates += 1;
                if policy == DedupPolicy::KeepLatest && resolve(held, record) == Resolution::TakeIncoming {
                    held = record;
                }
            } else {
                held.encode(writer)?;
                stats.records_written += 1;
                held = record;
            }
        }
        held.encode(writer)?;
        stats.records_written += 1;
        Ok(stats)
    }
}
