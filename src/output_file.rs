use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::{Builder, NamedTempFile};

use crate::config::Config;
use crate::errors::PresortError;

/// The output of a run. Records go to a temporary file next to the target which replaces the
/// target only on [OutputFile::persist]; dropping it unpersisted removes the temporary file.
pub(crate) struct OutputFile {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl OutputFile {
    pub(crate) fn create(path: &Path, config: &Config) -> Result<OutputFile, PresortError> {
        let tmp_file = Builder::new()
            .prefix(config.tmp_prefix())
            .suffix(config.tmp_suffix())
            .tempfile_in(config.tmp())
            .map_err(|source| PresortError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Writing {} through {}", path.display(), tmp_file.path().display());
        Ok(
            OutputFile {
                path: path.to_path_buf(),
                writer: BufWriter::new(tmp_file),
            }
        )
    }

    pub(crate) fn writer(&mut self) -> &mut BufWriter<NamedTempFile> {
        &mut self.writer
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and move the temporary file onto the output path.
    pub(crate) fn persist(mut self) -> Result<PathBuf, anyhow::Error> {
        self.writer.flush()?;
        let tmp_file = self.writer
            .into_inner()
            .map_err(|e| e.into_error())?;
        tmp_file
            .persist(&self.path)
            .with_context(|| format!("Persist output to {}", self.path.display()))?;
        Ok(self.path)
    }
}

/// Directory for the temporary output when none is configured: the output's own directory so
/// that persisting is a rename within one file system.
pub(crate) fn default_tmp_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
