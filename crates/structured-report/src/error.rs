//! Error types for report construction and rendering.
//!
//! [`ReportError`] is the single error type returned by every public operation.
//! Cell formatting failures are carried as a boxed [`FormatError`] so the
//! common variants stay small.

use crate::column::Target;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while defining columns, appending rows or rendering.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A column with this id is already registered.
    #[error("column '{id}' already exists")]
    ColumnAlreadyExists { id: String },

    /// The requested column type is not one of the recognized variants.
    #[error("invalid type '{given}' for column '{id}' (expected string, numeric, float or currency)")]
    InvalidColumnType { id: String, given: String },

    /// The column's format string could not be parsed.
    #[error("invalid format '{format}' for column '{id}': {cause}")]
    InvalidFormat {
        id: String,
        format: String,
        cause: FormatCause,
    },

    /// Row data does not supply exactly one value per defined column.
    #[error("row supplies {given} of {expected} column values")]
    MissingColumnData { expected: usize, given: usize },

    /// A keyed row named a column that does not exist (strict mode only).
    #[error("column '{id}' not found")]
    ColumnNotFound { id: String },

    /// Row input was neither a keyed mapping nor a positional sequence.
    #[error("row must be an object or an array, got {found}")]
    InvalidRowShape { found: &'static str },

    /// A cell value could not be formatted.
    #[error(transparent)]
    Format(#[from] Box<FormatError>),

    /// The delimited-text encoder failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// The spreadsheet markup writer failed.
    #[error("spreadsheet markup failed: {0}")]
    Markup(String),

    /// Encoded output was not valid UTF-8.
    #[error("encoded output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A report schema could not be loaded.
    #[error("invalid report schema: {0}")]
    Schema(String),

    /// Unknown output format name.
    #[error("unknown output format '{0}' (expected csv, xls or text)")]
    UnknownOutputFormat(String),
}

impl From<FormatError> for ReportError {
    fn from(err: FormatError) -> Self {
        ReportError::Format(Box::new(err))
    }
}

impl From<serde_yaml::Error> for ReportError {
    fn from(err: serde_yaml::Error) -> Self {
        ReportError::Schema(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Schema(err.to_string())
    }
}

/// A cell value that could not be formatted, with everything needed to find it.
#[derive(Debug, Error)]
#[error(
    "cannot format {value} (display value {display}) for {target} output using '{format}' (display key '{display_key}'): {cause}"
)]
pub struct FormatError {
    /// The raw value as stored in the column.
    pub value: Value,
    /// The value after display-key resolution.
    pub display: Value,
    /// The output the cell was being rendered for.
    pub target: Target,
    /// The display key used to unwrap keyed values.
    pub display_key: String,
    /// The column's format string.
    pub format: String,
    /// What went wrong.
    #[source]
    pub cause: FormatCause,
}

/// The underlying reason a format string or value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatCause {
    /// `%` at the end of the format string.
    #[error("incomplete conversion at end of format")]
    Incomplete,

    /// Width or precision too large for `usize`.
    #[error("width or precision '{0}' is too large")]
    FieldTooLarge(String),

    /// Conversion character that is not supported.
    #[error("unsupported conversion '%{0}'")]
    UnsupportedConversion(char),

    /// More than one value conversion in a single cell format.
    #[error("format has {0} conversions, a cell takes exactly one value")]
    TooManyConversions(usize),

    /// Value cannot be converted to an integer.
    #[error("invalid value for integer conversion: {0}")]
    NotAnInteger(String),

    /// Value cannot be converted to a float.
    #[error("invalid value for float conversion: {0}")]
    NotAFloat(String),

    /// Value has no scalar text representation.
    #[error("cannot format {0} as text")]
    NotScalar(&'static str),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = ReportError::ColumnAlreadyExists {
            id: "date".to_string(),
        };
        assert_eq!(err.to_string(), "column 'date' already exists");
    }

    #[test]
    fn test_missing_data_display() {
        let err = ReportError::MissingColumnData {
            expected: 3,
            given: 2,
        };
        assert!(err.to_string().contains("2 of 3"));
    }

    #[test]
    fn test_format_error_carries_context() {
        let err: ReportError = FormatError {
            value: json!({"text": "abc"}),
            display: json!("abc"),
            target: Target::Text,
            display_key: "text".to_string(),
            format: "%d".to_string(),
            cause: FormatCause::NotAnInteger("abc".to_string()),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("%d"));
        assert!(msg.contains("text output"));
        assert!(msg.contains("display key 'text'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
