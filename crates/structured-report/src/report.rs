//! The report: ordered columns plus row bookkeeping.
//!
//! Column registration order is the output order for every renderer. Rows
//! are appended either by column id ([`RowInput::Keyed`]) or by position
//! ([`RowInput::Positional`]); in both cases the row is validated before any
//! column is touched, so a rejected row leaves the report unchanged.
//!
//! ```rust
//! use structured_report::{Report, ColumnOptions, ColumnType, RowInput};
//!
//! let mut report = Report::with_columns([
//!     ("date", ColumnOptions::new("Date")),
//!     ("cost", ColumnOptions::new("Cost").column_type(ColumnType::Currency)),
//! ]).unwrap();
//!
//! report.add_row(RowInput::positional(["1/1/2001", "10"])).unwrap();
//! report.add_row(RowInput::keyed([("cost", "5"), ("date", "1/2/2001")])).unwrap();
//!
//! assert_eq!(report.count(), 2);
//! assert_eq!(report.to_csv().unwrap(), "Date,Cost\n1/1/2001,$10.00\n1/2/2001,$5.00\n");
//! ```

use crate::column::{Column, ColumnOptions};
use crate::error::{ReportError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of raw values, keyed by column id in column order.
pub type Row<'a> = IndexMap<&'a str, &'a Value>;

/// What to do with keys in a keyed row that match no column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Skip them.
    #[default]
    Ignore,
    /// Fail with [`ReportError::ColumnNotFound`].
    Reject,
}

/// Row data passed to [`Report::add_row`].
#[derive(Clone, Debug, PartialEq)]
pub enum RowInput {
    /// Values by column id. Key order does not matter.
    Keyed(IndexMap<String, Value>),
    /// Values in column registration order. Extra trailing values are dropped.
    Positional(Vec<Value>),
}

impl RowInput {
    pub fn keyed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        RowInput::Keyed(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        RowInput::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Number of values supplied.
    pub fn len(&self) -> usize {
        match self {
            RowInput::Keyed(map) => map.len(),
            RowInput::Positional(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Value>> for RowInput {
    fn from(values: Vec<Value>) -> Self {
        RowInput::Positional(values)
    }
}

impl From<IndexMap<String, Value>> for RowInput {
    fn from(map: IndexMap<String, Value>) -> Self {
        RowInput::Keyed(map)
    }
}

impl From<serde_json::Map<String, Value>> for RowInput {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        RowInput::Keyed(map.into_iter().collect())
    }
}

/// Objects become keyed rows and arrays positional rows.
impl TryFrom<Value> for RowInput {
    type Error = ReportError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into()),
            Value::Array(values) => Ok(values.into()),
            Value::Null => Err(ReportError::InvalidRowShape { found: "null" }),
            Value::Bool(_) => Err(ReportError::InvalidRowShape { found: "boolean" }),
            Value::Number(_) => Err(ReportError::InvalidRowShape { found: "number" }),
            Value::String(_) => Err(ReportError::InvalidRowShape { found: "string" }),
        }
    }
}

/// An in-memory table of typed columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    columns: IndexMap<String, Column>,
    count: usize,
    unknown_keys: UnknownKeys,
}

impl Report {
    /// Creates a report with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report with the given columns, in order.
    pub fn with_columns<I, K>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ColumnOptions)>,
        K: Into<String>,
    {
        let mut report = Report::new();
        report.add_columns(columns)?;
        Ok(report)
    }

    /// Sets the policy for keyed rows naming unknown columns.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn set_unknown_keys(&mut self, policy: UnknownKeys) {
        self.unknown_keys = policy;
    }

    /// Registers a column after the existing ones.
    ///
    /// When rows already exist the new column is filled with blank cells
    /// for them.
    pub fn add_column(&mut self, id: impl Into<String>, options: ColumnOptions) -> Result<&Column> {
        let id = id.into();
        if self.columns.contains_key(&id) {
            return Err(ReportError::ColumnAlreadyExists { id });
        }

        let mut column = Column::new(id.clone(), options)?;
        column.backfill(self.count);
        tracing::debug!(
            column = %id,
            column_type = %column.column_type(),
            backfilled = self.count,
            "added report column"
        );

        let index = self.columns.insert_full(id, column).0;
        Ok(&self.columns[index])
    }

    /// Registers several columns in order, stopping at the first failure.
    pub fn add_columns<I, K>(&mut self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, ColumnOptions)>,
        K: Into<String>,
    {
        for (id, options) in columns {
            self.add_column(id, options)?;
        }
        Ok(())
    }

    /// Appends one row.
    ///
    /// Keyed rows must name every column exactly once; keys that match no
    /// column are skipped unless the report rejects unknown keys. Positional
    /// rows must have at least one value per column.
    pub fn add_row(&mut self, row: impl Into<RowInput>) -> Result<()> {
        let expected = self.columns.len();

        match row.into() {
            RowInput::Keyed(entries) => {
                let mut matched = Vec::with_capacity(expected);
                for (key, value) in entries {
                    match self.columns.get_index_of(key.as_str()) {
                        Some(index) => matched.push((index, value)),
                        None if self.unknown_keys == UnknownKeys::Reject => {
                            return Err(ReportError::ColumnNotFound { id: key });
                        }
                        None => tracing::trace!(key = %key, "ignoring unknown row key"),
                    }
                }
                if matched.len() != expected {
                    return Err(ReportError::MissingColumnData {
                        expected,
                        given: matched.len(),
                    });
                }
                for (index, value) in matched {
                    if let Some((_, column)) = self.columns.get_index_mut(index) {
                        column.push(value);
                    }
                }
            }
            RowInput::Positional(values) => {
                if values.len() < expected {
                    return Err(ReportError::MissingColumnData {
                        expected,
                        given: values.len(),
                    });
                }
                for (column, value) in self.columns.values_mut().zip(values) {
                    column.push(value);
                }
            }
        }

        self.count += 1;
        tracing::trace!(row = self.count - 1, "appended report row");
        Ok(())
    }

    /// Appends rows in order, stopping at the first failure.
    pub fn add_rows<I, R>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RowInput>,
    {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    /// Number of rows appended so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in registration order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id)
    }

    /// The raw values of row `index`, keyed by column id.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        if index >= self.count {
            return None;
        }
        Some(
            self.columns
                .values()
                .filter_map(|column| column.data().get(index).map(|v| (column.id(), v)))
                .collect(),
        )
    }

    /// Iterates rows in append order.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            report: self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = Row<'a>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Iterator over report rows, created by [`Report::rows`].
#[derive(Clone, Debug)]
pub struct Rows<'a> {
    report: &'a Report,
    next: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.report.row(self.next)?;
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.report.count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
