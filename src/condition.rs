//! # Non-Fatal Conditions
//!
//! Recoverable conditions are not errors: the operation continues with a
//! documented fallback (skip the memo, skip the column, report `false`).
//! They are delivered to a caller-replaceable sink so embedders can surface
//! them however they like; the default sink logs a warning.
//!
//! Anything without a defined fallback is a fatal `eyre` error instead.

use std::fmt;
use std::path::PathBuf;

/// A recoverable condition reported through the table's condition sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The header expects a memo sidecar but none was found.
    DbtMissing { path: PathBuf },
    /// The memo sidecar cannot be created or opened for writing.
    DbtReadOnly { path: PathBuf },
    /// `add_column` on a table that already holds records.
    RecordsExist,
    /// `add_column` with a name that is already taken.
    ColumnExists { name: String },
    /// A column name longer than the 10-byte descriptor slot; the name is
    /// kept and truncated on write.
    ColumnNameTooLong { name: String },
    /// `update` on a table with no records.
    NoRecordsWhileUpdating,
}

impl Condition {
    /// Short ASCII symbol identifying the condition kind.
    pub fn symbol(&self) -> &'static str {
        match self {
            Condition::DbtMissing { .. } => "DBT_DOESNT_EXIST",
            Condition::DbtReadOnly { .. } => "DBT_READ_ONLY",
            Condition::RecordsExist => "RECORDS_EXIST",
            Condition::ColumnExists { .. } => "COLUMN_EXISTS",
            Condition::ColumnNameTooLong { .. } => "COLUMN_NAME_TOO_LONG",
            Condition::NoRecordsWhileUpdating => "NO_RECORDS_WHILE_UPDATING",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::DbtMissing { path } => {
                write!(f, "{}: {}", self.symbol(), path.display())
            }
            Condition::DbtReadOnly { path } => {
                write!(f, "{}: {}", self.symbol(), path.display())
            }
            Condition::ColumnExists { name } | Condition::ColumnNameTooLong { name } => {
                write!(f, "{}: {}", self.symbol(), name)
            }
            _ => f.write_str(self.symbol()),
        }
    }
}

/// Caller-replaceable receiver for non-fatal conditions.
pub type ConditionSink = Box<dyn FnMut(&Condition) + Send>;

/// The default sink logs each condition as a warning.
pub fn default_sink() -> ConditionSink {
    Box::new(|condition| tracing::warn!(condition = %condition, "table condition"))
}
