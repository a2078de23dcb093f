use std::cmp::Ordering;
use std::io::Write;

use crate::dedup::{resolve, Resolution};
use crate::errors::Result;
use crate::key::compare_key;
use crate::key_mode::KeyMode;
use crate::record::Record;

/// Where the two-way merge stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeState {
    /// Both inputs have a pending record
    Advancing,
    /// Only the left input has records left
    DrainingLeft,
    /// Only the right input has records left
    DrainingRight,
    Done,
}

impl MergeState {
    fn from_pending(left: &Option<Record>, right: &Option<Record>) -> MergeState {
        match (left, right) {
            (Some(_), Some(_)) => MergeState::Advancing,
            (Some(_), None) => MergeState::DrainingLeft,
            (None, Some(_)) => MergeState::DrainingRight,
            (None, None) => MergeState::Done,
        }
    }
}

/// Counters collected by [merge_sorted]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records written to the output, one per distinct key
    pub records_written: usize,
    /// Records that collided with the held record of the same key
    pub duplicates: usize,
}

/// Holds the last committed record until a record with a different key arrives.
struct Committer<'a, W: Write> {
    writer: &'a mut W,
    mode: KeyMode,
    held: Option<Record>,
    stats: MergeStats,
}

impl<'a, W: Write> Committer<'a, W> {
    fn new(writer: &'a mut W, mode: KeyMode) -> Committer<'a, W> {
        Committer {
            writer,
            mode,
            held: None,
            stats: MergeStats::default(),
        }
    }

    fn commit(&mut self, record: Record) -> Result<()> {
        match self.held.take() {
            Some(held) if compare_key(&held, &record, self.mode) == Ordering::Equal => {
                self.stats.duplicates += 1;
                let survivor = match resolve(&held, &record) {
                    Resolution::KeepHeld => held,
                    Resolution::TakeIncoming => record,
                };
                self.held = Some(survivor);
            }
            Some(held) => {
                held.encode(&mut *self.writer)?;
                self.stats.records_written += 1;
                self.held = Some(record);
            }
            None => {
                self.held = Some(record);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<MergeStats> {
        if let Some(held) = self.held.take() {
            held.encode(&mut *self.writer)?;
            self.stats.records_written += 1;
        }
        Ok(self.stats)
    }
}

fn advance<I, W>(head: &mut Option<Record>, source: &mut I, committer: &mut Committer<W>) -> Result<()>
where
    I: Iterator<Item = Result<Record>>,
    W: Write,
{
    if let Some(record) = head.take() {
        committer.commit(record)?;
        *head = source.next().transpose()?;
    }
    Ok(())
}

/// Merge two inputs, each sorted ascending by `mode`, into `writer`.
///
/// Records sharing a key are collapsed into one, keeping the greatest `updated_at`. When the
/// pending records of both inputs have equal keys the right one is committed first, so on an
/// `updated_at` tie the right input's record survives.
///
/// Unsorted inputs are not detected and produce output that is neither sorted nor fully
/// deduplicated.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use keyed_presort::id_policy::IdPolicy;
/// use keyed_presort::key_mode::KeyMode;
/// use keyed_presort::merge::merge_sorted;
/// use keyed_presort::record_reader::RecordReader;
///
/// let left = RecordReader::new("left".to_string(), Cursor::new("1,a,b,t1\n"), IdPolicy::Strict);
/// let right = RecordReader::new("right".to_string(), Cursor::new("1,a,b,t2\n"), IdPolicy::Strict);
/// let mut output = Vec::new();
/// let stats = merge_sorted(left, right, KeyMode::Id, &mut output).unwrap();
/// assert_eq!(stats.duplicates, 1);
/// assert_eq!(String::from_utf8(output).unwrap(), "1,a,b,t2\n");
/// ```
pub fn merge_sorted<L, R, W>(mut left: L, mut right: R, mode: KeyMode, writer: &mut W) -> Result<MergeStats>
where
    L: Iterator<Item = Result<Record>>,
    R: Iterator<Item = Result<Record>>,
    W: Write,
{
    let mut committer = Committer::new(writer, mode);
    let mut left_head = left.next().transpose()?;
    let mut right_head = right.next().transpose()?;

    let mut state = MergeState::from_pending(&left_head, &right_head);
    while state != MergeState::Done {
        match state {
            MergeState::Advancing => {
                let left_first = match (&left_head, &right_head) {
                    (Some(l), Some(r)) => compare_key(l, r, mode) == Ordering::Less,
                    _ => false,
                };
                if left_first {
                    advance(&mut left_head, &mut left, &mut committer)?;
                } else {
                    advance(&mut right_head, &mut right, &mut committer)?;
                }
            }
            MergeState::DrainingLeft => {
                advance(&mut left_head, &mut left, &mut committer)?;
            }
            MergeState::DrainingRight => {
                advance(&mut right_head, &mut right, &mut committer)?;
            }
            MergeState::Done => {}
        }

        let next = MergeState::from_pending(&left_head, &right_head);
        if next != state {
            log::debug!("Merge state {:?} -> {:?}", state, next);
        }
        state = next;
    }

    committer.finish()
}
