use crate::record::Record;

/// Outcome of comparing two records that share a primary key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The record currently held survives
    KeepHeld,
    /// The incoming record replaces the held one
    TakeIncoming,
}

/// Which record of an equal-key run survives.
///
/// The two tools resolve duplicates differently and both behaviors are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupPolicy {
    /// The greatest `updated_at` wins, ties keep the record seen first. Used by the streaming
    /// merge.
    KeepLatest,
    /// The first record of the run in `(key, updated_at ascending)` order wins, that is the
    /// smallest `updated_at`. Used by the in-memory sort merge.
    KeepFirstInOrder,
}

/// Decide between the held record and an incoming record with an equal key.
///
/// # Examples
/// ```
/// use keyed_presort::dedup::{resolve, Resolution};
/// use keyed_presort::record::Record;
/// let held = Record::new(3, "a", "b", "2020-01-01");
/// let incoming = Record::new(3, "a", "b", "2020-06-01");
/// assert_eq!(resolve(&held, &incoming), Resolution::TakeIncoming);
/// ```
pub fn resolve(held: &Record, incoming: &Record) -> Resolution {
    if held.updated_at().as_bytes() < incoming.updated_at().as_bytes() {
        Resolution::TakeIncoming
    } else {
        Resolution::KeepHeld
    }
}
