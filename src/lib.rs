//! This crate sorts, merges and deduplicates delimited record files keyed by a composite primary
//! key.
//!
//! Every line is a record of four comma separated fields, `id,a,b,updated_at`, where `id` is an
//! integer and `updated_at` is compared as text. The primary key is selected by a
//! [KeyMode](key_mode::KeyMode): `id`, (`id`, `a`), (`id`, `a`, `b`) or (`id`, `b`, `a`).
//! The motivation was preparing table dumps from two sources for a bulk load, where both
//! dumps hold versions of the same rows and the most recently updated version should win.
//!
//! Three operations are provided by [Presort](presort::Presort):
//! * `merge` - a streaming two-way merge of files already sorted by key. Records sharing a key
//!   collapse into the one with the greatest `updated_at`. Memory use does not depend on the
//!   input size.
//! * `sort` - an in-memory sort of one file by key and `updated_at`, keeping every record.
//! * `sort_merge` - an in-memory sort of several files, keeping the first record of each key in
//!   sorted order, that is the one with the smallest `updated_at`.
//!
//! The in-memory operations hold at most a configured number of records and fail with
//! [PresortError::CapacityExceeded](errors::PresortError::CapacityExceeded) beyond it.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use keyed_presort::key_mode::KeyMode;
//! use keyed_presort::presort::Presort;
//!
//! fn presort(dump_a: PathBuf, dump_b: PathBuf, tmp: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let sorted_a = tmp.join("a.csv");
//!     let sorted_b = tmp.join("b.csv");
//!
//!     for (input, sorted) in [(dump_a, &sorted_a), (dump_b, &sorted_b)] {
//!         let mut sort = Presort::new(vec![input], sorted.clone());
//!         sort.with_key_mode(KeyMode::IdAB);
//!         sort.sort()?;
//!     }
//!
//!     let mut merge = Presort::new(vec![sorted_a, sorted_b], output);
//!     merge.with_key_mode(KeyMode::IdAB);
//!     let report = merge.merge()?;
//!     log::info!("duplicates: {}", report.duplicates);
//!     Ok(())
//! }
//! ```
//!

pub(crate) mod config;
pub(crate) mod output_file;

pub mod errors;
pub mod key_mode;
pub mod id_policy;
pub mod record;
pub mod record_reader;
pub mod key;
pub mod dedup;
pub mod merge;
pub mod record_table;
pub mod report;
pub mod presort;
