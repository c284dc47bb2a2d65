//! Typed report columns.
//!
//! A [`Column`] pairs a definition (id, title, type, format) with the raw
//! values appended to it, one per report row. Columns are created from
//! [`ColumnOptions`], either built in code or deserialized from a schema.
//!
//! ```rust
//! use structured_report::{Column, ColumnOptions, ColumnType, Target};
//! use serde_json::json;
//!
//! let cost = Column::new("cost", ColumnOptions::new("Cost").column_type(ColumnType::Currency)).unwrap();
//! assert_eq!(cost.format().as_str(), "$%.2f");
//! assert_eq!(cost.format_value(&json!("10"), Target::Text).unwrap(), "$10.00");
//! assert_eq!(cost.format_value(&json!("10"), Target::Spreadsheet).unwrap(), "10.00");
//! ```

use crate::error::{FormatError, ReportError, Result};
use crate::format::FormatSpec;
use crate::value::{numeric_text, resolve_display, DEFAULT_DISPLAY_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The kind of data a column holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text.
    #[default]
    String,
    /// Whole numbers.
    Numeric,
    /// Decimal numbers.
    Float,
    /// Money amounts, shown with a currency symbol and two decimals.
    Currency,
}

impl ColumnType {
    /// All recognized column types.
    pub const ALL: [ColumnType; 4] = [
        ColumnType::String,
        ColumnType::Numeric,
        ColumnType::Float,
        ColumnType::Currency,
    ];

    /// The format string used when a column does not set one.
    pub fn default_format(self) -> &'static str {
        match self {
            ColumnType::String => "%s",
            ColumnType::Numeric => "%d",
            ColumnType::Float => "%f",
            ColumnType::Currency => "$%.2f",
        }
    }

    /// The cell data type written to spreadsheet markup.
    pub fn spreadsheet_type(self) -> SpreadsheetType {
        match self {
            ColumnType::String => SpreadsheetType::String,
            ColumnType::Numeric | ColumnType::Float | ColumnType::Currency => {
                SpreadsheetType::Number
            }
        }
    }

    /// Numeric columns are right-aligned in text output.
    pub fn is_numeric(self) -> bool {
        self.spreadsheet_type() == SpreadsheetType::Number
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Numeric => "numeric",
            ColumnType::Float => "float",
            ColumnType::Currency => "currency",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Spreadsheet cell data type (`ss:Type`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadsheetType {
    String,
    Number,
}

impl SpreadsheetType {
    pub fn as_str(self) -> &'static str {
        match self {
            SpreadsheetType::String => "String",
            SpreadsheetType::Number => "Number",
        }
    }
}

/// The output a cell is being formatted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Delimited and fixed-width text.
    Text,
    /// Spreadsheet markup cells.
    Spreadsheet,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Text => f.write_str("text"),
            Target::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// Options for defining a column.
///
/// The type is kept as text until the column is built so that an
/// unrecognized type, whether from code or from a schema file, is reported
/// as [`ReportError::InvalidColumnType`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnOptions {
    title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    column_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_key: Option<String>,
}

impl ColumnOptions {
    /// Options for a string column with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        ColumnOptions {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the column type. Accepts a [`ColumnType`] or its name.
    pub fn column_type(mut self, column_type: impl ToString) -> Self {
        self.column_type = Some(column_type.to_string());
        self
    }

    /// Override the type's default format string.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set an explicit spreadsheet column width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the key used to pick the display value out of keyed cells.
    pub fn display_key(mut self, key: impl Into<String>) -> Self {
        self.display_key = Some(key.into());
        self
    }
}

/// A column definition together with its values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    id: String,
    title: String,
    column_type: ColumnType,
    format: FormatSpec,
    width: Option<f64>,
    display_key: String,
    data: Vec<Value>,
}

impl Column {
    /// Builds an empty column from its options.
    pub fn new(id: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        let id = id.into();
        let column_type = match options.column_type {
            Some(given) => {
                given
                    .parse::<ColumnType>()
                    .map_err(|given| ReportError::InvalidColumnType {
                        id: id.clone(),
                        given,
                    })?
            }
            None => ColumnType::default(),
        };

        let source = options
            .format
            .unwrap_or_else(|| column_type.default_format().to_string());
        let format = FormatSpec::parse(&source).map_err(|cause| ReportError::InvalidFormat {
            id: id.clone(),
            format: source.clone(),
            cause,
        })?;

        Ok(Column {
            id,
            title: options.title,
            column_type,
            format,
            width: options.width,
            display_key: options
                .display_key
                .unwrap_or_else(|| DEFAULT_DISPLAY_KEY.to_string()),
            data: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn format(&self) -> &FormatSpec {
        &self.format
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn display_key(&self) -> &str {
        &self.display_key
    }

    /// Raw values, indexed by row.
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends a raw value. No conversion or validation takes place.
    pub(crate) fn push(&mut self, value: Value) {
        self.data.push(value);
    }

    /// Pads the column with blank cells up to `rows` entries.
    pub(crate) fn backfill(&mut self, rows: usize) {
        if self.data.len() < rows {
            self.data.resize(rows, Value::Null);
        }
    }

    /// Formats one value of this column for the given output.
    ///
    /// Blank values (and keyed values without the display key) produce an
    /// empty string. For spreadsheet output of numeric columns everything
    /// but digits, `.` and `-` is removed so the cell parses as a number.
    pub fn format_value(&self, value: &Value, target: Target) -> Result<String> {
        let Some(display) = resolve_display(value, &self.display_key) else {
            return Ok(String::new());
        };

        let formatted = self.format.apply(display).map_err(|cause| FormatError {
            value: value.clone(),
            display: display.clone(),
            target,
            display_key: self.display_key.clone(),
            format: self.format.as_str().to_string(),
            cause,
        })?;

        if target == Target::Spreadsheet && self.column_type.is_numeric() {
            Ok(numeric_text(&formatted))
        } else {
            Ok(formatted)
        }
    }
}
