use std::cmp::Ordering;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use regex::Regex;

use crate::config::Config;
use crate::dedup::DedupPolicy;
use crate::errors::PresortError;
use crate::id_policy::IdPolicy;
use crate::key::compare_key;
use crate::key_mode::KeyMode;
use crate::merge::merge_sorted;
use crate::output_file::{default_tmp_dir, OutputFile};
use crate::record::Record;
use crate::record_reader::RecordReader;
use crate::record_table::{RecordTable, DEFAULT_SORT_CAPACITY, DEFAULT_SORT_MERGE_CAPACITY};
use crate::report::{MergeReport, SortReport};

type FileRecordReader = RecordReader<BufReader<File>>;

/// Sort, merge and deduplicate record files keyed by a primary key
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use keyed_presort::key_mode::KeyMode;
/// use keyed_presort::presort::Presort;
///
/// // merge two files, each already sorted by (id, a), keeping the latest version of each key
/// fn merge_tables(left: PathBuf, right: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
///     let mut presort = Presort::new(vec![left, right], output);
///     presort.with_key_mode(KeyMode::IdA);
///     let report = presort.merge()?;
///     println!("{}", report);
///     Ok(())
/// }
/// ```
pub struct Presort {
    input_files: Vec<PathBuf>,
    output: PathBuf,
    tmp: Option<PathBuf>,
    key_mode: KeyMode,
    id_policy: IdPolicy,
    capacity: Option<usize>,
    ignore_empty: bool,
    ignore_lines: Option<Regex>,
}

impl Presort {
    /// Create a default Presort definition.
    ///
    /// * The key mode is [KeyMode::Id]
    /// * Invalid ids fail the run, see [IdPolicy]
    /// * The in-memory capacity is 3,340,000 records for [Presort::sort] and twice that for
    ///   [Presort::sort_merge]
    /// * Empty lines are skipped
    /// * The output is staged in the output's directory
    pub fn new(input_files: Vec<PathBuf>, output: PathBuf) -> Presort {
        Presort {
            input_files,
            output,
            tmp: None,
            key_mode: KeyMode::Id,
            id_policy: IdPolicy::Strict,
            capacity: None,
            ignore_empty: true,
            ignore_lines: None,
        }
    }

    /// Set the primary key composition
    pub fn with_key_mode(&mut self, key_mode: KeyMode) {
        self.key_mode = key_mode;
    }

    /// Set the handling of lines whose id is not an integer
    pub fn with_id_policy(&mut self, id_policy: IdPolicy) {
        self.id_policy = id_policy;
    }

    /// Set the maximum number of records held in memory by [Presort::sort] and
    /// [Presort::sort_merge]
    pub fn with_capacity(&mut self, capacity: usize) {
        self.capacity = Some(capacity);
    }

    /// Skip empty lines. The default is true, otherwise an empty line is a malformed record.
    pub fn with_ignore_empty(&mut self, ignore_empty: bool) {
        self.ignore_empty = ignore_empty;
    }

    /// Specify which lines to ignore. Each line matching the regex is skipped and will not
    /// appear in the output.
    pub fn with_ignore_lines(&mut self, r: Regex) {
        self.ignore_lines = Some(r);
    }

    /// Set the directory for the staged output. It should be on the same file system as the
    /// output.
    pub fn with_tmp_dir(&mut self, tmp: PathBuf) {
        self.tmp = Some(tmp);
    }

    fn create_config(&self) -> Config {
        let tmp = self.tmp.clone().unwrap_or_else(|| default_tmp_dir(&self.output));
        Config::new(
            tmp,
            ".presort-".to_string(),
            ".partial".to_string(),
            self.key_mode,
            self.id_policy,
            self.capacity,
            self.ignore_empty,
            self.ignore_lines.clone(),
        )
    }

    fn require_inputs(&self, operation: &'static str, expected: &'static str, accepted: fn(usize) -> bool) -> Result<(), PresortError> {
        if accepted(self.input_files.len()) {
            Ok(())
        } else {
            Err(
                PresortError::InputCount {
                    operation,
                    expected,
                    actual: self.input_files.len(),
                }
            )
        }
    }

    fn require_streamable(operation: &'static str, key_mode: KeyMode) -> Result<(), PresortError> {
        if key_mode.streamable() {
            Ok(())
        } else {
            Err(
                PresortError::UnsupportedKeyMode {
                    mode: key_mode.to_string(),
                    operation,
                }
            )
        }
    }

    fn open_reader(path: &Path, config: &Config) -> Result<FileRecordReader, PresortError> {
        let reader = RecordReader::open(path, config.id_policy())?
            .with_ignore_empty(config.ignore_empty())
            .with_ignore_lines(config.ignore_lines().clone());
        Ok(reader)
    }

    /// Open every input, then the output. Nothing is read before all of them are open.
    fn open_all(&self, config: &Config) -> Result<(Vec<FileRecordReader>, OutputFile), anyhow::Error> {
        let mut readers = Vec::with_capacity(self.input_files.len());
        for path in &self.input_files {
            readers.push(Self::open_reader(path, config)?);
        }
        let output = OutputFile::create(&self.output, config)?;
        Ok((readers, output))
    }

    /// Merge two input files, each sorted by the key mode, into the output.
    ///
    /// Records sharing a key are collapsed into the one with the greatest `updated_at`. The
    /// inputs are not checked for order, see [Presort::check].
    pub fn merge(&self) -> Result<MergeReport, anyhow::Error> {
        let config = self.create_config();
        self.require_inputs("merge", "2", |n| n == 2)?;
        Self::require_streamable("merge", config.key_mode())?;

        let (readers, mut output) = self.open_all(&config)?;
        let actual = readers.len();
        let [left, right]: [FileRecordReader; 2] = readers
            .try_into()
            .map_err(|_| PresortError::InputCount { operation: "merge", expected: "2", actual })?;

        log::info!("Start merge of {} and {}, key mode: {}", left.source_name(), right.source_name(), config.key_mode());
        let start = Instant::now();
        let stats = merge_sorted(left, right, config.key_mode(), output.writer())
            .with_context(|| format!("merge into {}", output.path().display()))?;
        let output = output.persist()?;
        let merge_time = start.elapsed();
        log::info!("Finish merge, written: {}, duplicates: {}", stats.records_written, stats.duplicates);

        Ok(
            MergeReport {
                output,
                records_written: stats.records_written,
                duplicates: stats.duplicates,
                merge_time,
            }
        )
    }

    /// Sort a single input file into the output by key and `updated_at`, keeping every record.
    pub fn sort(&self) -> Result<SortReport, anyhow::Error> {
        let config = self.create_config();
        self.require_inputs("sort", "1", |n| n == 1)?;
        Self::require_streamable("sort", config.key_mode())?;
        self.sort_internal(&config, DEFAULT_SORT_CAPACITY, None)
    }

    /// Sort the concatenation of all input files and write the first record of each key,
    /// which is the one with the smallest `updated_at`.
    pub fn sort_merge(&self) -> Result<SortReport, anyhow::Error> {
        let config = self.create_config();
        self.require_inputs("sortmerge", "1 or more", |n| n >= 1)?;
        self.sort_internal(&config, DEFAULT_SORT_MERGE_CAPACITY, Some(DedupPolicy::KeepFirstInOrder))
    }

    fn sort_internal(&self, config: &Config, default_capacity: usize, dedup: Option<DedupPolicy>) -> Result<SortReport, anyhow::Error> {
        let (readers, mut output) = self.open_all(config)?;
        let mut table = RecordTable::with_capacity(config.capacity_or(default_capacity));

        log::info!("Start reading {} file(s), capacity: {} records", readers.len(), table.capacity());
        let start = Instant::now();
        for reader in readers {
            let source_name = reader.source_name().to_string();
            let loaded = table.load(reader)
                .with_context(|| format!("read {}", source_name))?;
            log::info!("Read {} records from {}", loaded, source_name);
        }
        let read_time = start.elapsed();

        let start = Instant::now();
        table.sort(config.key_mode());
        let sort_time = start.elapsed();
        log::info!("Sorted {} records, key mode: {}", table.len(), config.key_mode());

        let start = Instant::now();
        let stats = match dedup {
            None => table.write_all(output.writer())?,
            Some(policy) => table.write_deduplicated(output.writer(), config.key_mode(), policy)?,
        };
        let output = output.persist()?;
        let write_time = start.elapsed();
        log::info!("Finish writing {}, written: {}, duplicates: {}", output.display(), stats.records_written, stats.duplicates);

        Ok(
            SortReport {
                output,
                records: table.len(),
                records_written: stats.records_written,
                duplicates: stats.duplicates,
                deduplicated: dedup.is_some(),
                read_time,
                sort_time,
                write_time,
            }
        )
    }

    /// Check that every input file is sorted ascending by the key mode. Equal keys are
    /// allowed. This is the precondition of [Presort::merge].
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        let config = self.create_config();

        let mut result = true;
        for path in &self.input_files {
            result = Self::internal_check(path, &config)?;
            if !result {
                break;
            }
        }
        Ok(result)
    }

    fn internal_check(path: &Path, config: &Config) -> Result<bool, anyhow::Error> {
        let mut reader = Self::open_reader(path, config)?;
        let mut previous: Option<Record> = None;
        while let Some(current) = reader.next_record()? {
            if let Some(previous) = &previous {
                if compare_key(previous, &current, config.key_mode()) == Ordering::Greater {
                    log::info!("{} is not sorted by {} at line {}", path.display(), config.key_mode(), reader.line_number());
                    return Ok(false);
                }
            }
            previous = Some(current);
        }
        Ok(true)
    }
}
