use std::path::{Path, PathBuf};

use regex::Regex;

use crate::id_policy::IdPolicy;
use crate::key_mode::KeyMode;

#[derive(Clone, Debug)]
pub(crate) struct Config {
    tmp: PathBuf,
    tmp_prefix: String,
    tmp_suffix: String,
    key_mode: KeyMode,
    id_policy: IdPolicy,
    capacity: Option<usize>,
    ignore_empty: bool,
    ignore_lines: Option<Regex>,
}

impl Config {
    pub(crate) fn new(
        tmp: PathBuf,
        tmp_prefix: String,
        tmp_suffix: String,
        key_mode: KeyMode,
        id_policy: IdPolicy,
        capacity: Option<usize>,
        ignore_empty: bool,
        ignore_lines: Option<Regex>,
    ) -> Config {
        Config {
            tmp,
            tmp_prefix,
            tmp_suffix,
            key_mode,
            id_policy,
            capacity,
            ignore_empty,
            ignore_lines,
        }
    }

    pub(crate) fn tmp(&self) -> &Path {
        &self.tmp
    }

    pub(crate) fn tmp_prefix(&self) -> &str {
        &self.tmp_prefix
    }

    pub(crate) fn tmp_suffix(&self) -> &str {
        &self.tmp_suffix
    }

    pub(crate) fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    pub(crate) fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// The configured capacity or `default` when none was set
    pub(crate) fn capacity_or(&self, default: usize) -> usize {
        self.capacity.unwrap_or(default)
    }

    pub(crate) fn ignore_empty(&self) -> bool {
        self.ignore_empty
    }

    pub(crate) fn ignore_lines(&self) -> &Option<Regex> {
        &self.ignore_lines
    }
}
