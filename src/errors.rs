use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for record level operations
pub type Result<T> = std::result::Result<T, PresortError>;

/// Failures raised while decoding, collecting and writing records.
#[derive(Error, Debug)]
pub enum PresortError {
    /// The key mode name is not one of `id`, `id_a`, `id_a_b`, `id_b_a`
    #[error("Unknown key mode '{0}', expected one of id, id_a, id_a_b, id_b_a")]
    UnknownKeyMode(String),

    /// The key mode is valid but the operation does not support it
    #[error("Key mode '{mode}' is not supported by {operation}")]
    UnsupportedKeyMode {
        mode: String,
        operation: &'static str,
    },

    /// The operation was given the wrong number of input files
    #[error("{operation} expects {expected} input file(s), got {actual}")]
    InputCount {
        operation: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// An input or output path could not be opened
    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// More records than the in-memory bound allows
    #[error("Record count exceeds the in-memory capacity of {capacity} records")]
    CapacityExceeded {
        capacity: usize,
    },

    /// A line whose id field is not an integer
    #[error("Malformed record at {source_name}:{line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The id field of a line is not a valid integer
#[derive(Error, Debug)]
#[error("invalid id '{text}': {source}")]
pub struct MalformedId {
    pub text: String,
    #[source]
    pub source: std::num::ParseIntError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_message() {
        let error = PresortError::CapacityExceeded { capacity: 10 };
        assert_eq!(format!("{error}"), "Record count exceeds the in-memory capacity of 10 records");
    }

    #[test]
    fn test_malformed_record_message() {
        let error = PresortError::MalformedRecord {
            source_name: "a.csv".to_string(),
            line: 7,
            reason: "invalid id 'x'".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("a.csv:7"));
        assert!(msg.contains("invalid id 'x'"));
    }

    #[test]
    fn test_file_open_message() {
        let error = PresortError::FileOpen {
            path: PathBuf::from("/missing/input.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(format!("{error}").starts_with("Failed to open /missing/input.csv"));
    }
}
