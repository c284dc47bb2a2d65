//! # Structured Report - Typed In-Memory Tables
//!
//! `structured-report` collects rows of values under a fixed set of named,
//! typed columns and renders the result as delimited text (CSV), XML
//! spreadsheet markup, or an aligned fixed-width text table.
//!
//! ## Core Concepts
//!
//! - [`Report`]: ordered columns, row count, row insertion and rendering
//! - [`Column`]: a typed column definition plus its raw values
//! - [`ColumnType`]: `string`, `numeric`, `float` or `currency`, each with a
//!   default printf-style format (`%s`, `%d`, `%f`, `$%.2f`)
//! - [`RowInput`]: a row given by column id (keyed) or by position
//! - [`ReportSchema`]: column definitions loaded from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use structured_report::{ColumnOptions, ColumnType, Report, RowInput};
//!
//! let mut report = Report::with_columns([
//!     ("date", ColumnOptions::new("Date")),
//!     ("cost", ColumnOptions::new("Cost").column_type(ColumnType::Currency)),
//! ])
//! .unwrap();
//!
//! report.add_row(RowInput::positional(["1/1/2001", "10"])).unwrap();
//! report.add_row(RowInput::positional(["1/2/2001", "5"])).unwrap();
//! report.add_row(RowInput::positional(["1/3/2001", "20"])).unwrap();
//!
//! assert_eq!(
//!     report.to_csv().unwrap(),
//!     "Date,Cost\n1/1/2001,$10.00\n1/2/2001,$5.00\n1/3/2001,$20.00\n"
//! );
//! assert_eq!(
//!     report.to_text().unwrap(),
//!     "Date     | Cost   \n\
//!      ------------------\n\
//!      1/1/2001 | $10.00 \n\
//!      1/2/2001 |  $5.00 \n\
//!      1/3/2001 | $20.00 \n"
//! );
//! ```
//!
//! ## Keyed Cells
//!
//! A cell value may itself be an object holding several representations.
//! The one under the column's display key (`text` by default) is rendered:
//!
//! ```rust
//! use structured_report::{ColumnOptions, Report, RowInput};
//! use serde_json::json;
//!
//! let mut report = Report::with_columns([("user", ColumnOptions::new("User"))]).unwrap();
//! report
//!     .add_row(RowInput::positional([json!({"text": "alice", "id": 17})]))
//!     .unwrap();
//! assert_eq!(report.to_csv().unwrap(), "User\nalice\n");
//! ```
//!
//! ## Row Validation
//!
//! Rows are checked before any column is modified. A keyed row must supply
//! every column exactly once; a positional row must have at least one value
//! per column. Unknown keys are ignored unless the report is switched to
//! [`UnknownKeys::Reject`].

pub mod column;
pub mod config;
mod error;
pub mod format;
pub mod prelude;
pub mod render;
pub mod report;
pub mod util;
pub mod value;

pub use column::{Column, ColumnOptions, ColumnType, SpreadsheetType, Target};
pub use config::ReportSchema;
pub use error::{FormatCause, FormatError, ReportError, Result};
pub use format::FormatSpec;
pub use render::OutputFormat;
pub use report::{Report, Row, RowInput, Rows, UnknownKeys};
