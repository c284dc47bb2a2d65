//! Common imports for building and rendering reports.
//!
//! ```rust
//! use structured_report::prelude::*;
//!
//! let mut report = Report::with_columns([("n", ColumnOptions::new("N"))])?;
//! report.add_row(RowInput::positional(["x"]))?;
//! # Ok::<(), ReportError>(())
//! ```

pub use crate::column::{Column, ColumnOptions, ColumnType, Target};
pub use crate::config::ReportSchema;
pub use crate::error::{ReportError, Result};
pub use crate::render::OutputFormat;
pub use crate::report::{Report, RowInput, UnknownKeys};
