use std::io::Write;
use std::str::FromStr;

use crate::errors::MalformedId;
use crate::id_policy::IdPolicy;

pub(crate) const FIELD_SEPARATOR: char = ',';
pub(crate) const ENDL: char = '\n';

/// A decoded line: `id,field_a,field_b,updated_at`
///
/// Records are never modified after decoding. The id text is kept verbatim so that encoding
/// writes back exactly the fields that were read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    id: i64,
    id_text: String,
    field_a: String,
    field_b: String,
    updated_at: String,
}

impl Record {
    /// Create a record from its field values
    ///
    /// # Examples
    /// ```
    /// use keyed_presort::record::Record;
    /// let record = Record::new(1, "x", "y", "2020-01-01");
    /// assert_eq!(record.id_text(), "1");
    /// ```
    pub fn new(id: i64, field_a: &str, field_b: &str, updated_at: &str) -> Record {
        Record {
            id,
            id_text: id.to_string(),
            field_a: field_a.to_string(),
            field_b: field_b.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    /// Decode one line. A single trailing line terminator is dropped, missing trailing fields
    /// are empty and anything after the third separator belongs to `updated_at`.
    pub fn decode(line: &str, policy: IdPolicy) -> Result<Record, MalformedId> {
        let line = line.strip_suffix(ENDL).unwrap_or(line);
        let mut parts = line.splitn(4, FIELD_SEPARATOR);
        let id_text = parts.next().unwrap_or_default().to_string();
        let field_a = parts.next().unwrap_or_default().to_string();
        let field_b = parts.next().unwrap_or_default().to_string();
        let updated_at = parts.next().unwrap_or_default().to_string();

        let id = match i64::from_str(id_text.trim()) {
            Ok(id) => id,
            Err(source) => match policy {
                IdPolicy::Strict => {
                    return Err(MalformedId { text: id_text, source });
                }
                IdPolicy::Zero => {
                    log::warn!("Invalid id '{}' replaced with 0", id_text);
                    0
                }
            },
        };

        Ok(
            Record {
                id,
                id_text,
                field_a,
                field_b,
                updated_at,
            }
        )
    }

    /// Write the four fields joined by the separator, followed by the line terminator.
    /// Embedded separators are written as is.
    pub fn encode<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(
            writer,
            "{}{sep}{}{sep}{}{sep}{}{endl}",
            self.id_text,
            self.field_a,
            self.field_b,
            self.updated_at,
            sep = FIELD_SEPARATOR,
            endl = ENDL,
        )
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn id_text(&self) -> &str {
        &self.id_text
    }

    pub fn field_a(&self) -> &str {
        &self.field_a
    }

    pub fn field_b(&self) -> &str {
        &self.field_b
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }
}
