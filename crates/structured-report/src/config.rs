//! Report schemas loaded from YAML or JSON.
//!
//! A schema lists column definitions in output order plus report-wide
//! settings. Column options use the same keys as [`ColumnOptions`]:
//!
//! ```rust
//! use structured_report::ReportSchema;
//!
//! let schema = ReportSchema::from_yaml(r#"
//! unknown_keys: reject
//! columns:
//!   date:
//!     title: Date
//!   cost:
//!     title: Cost
//!     type: currency
//!     width: 80
//! "#).unwrap();
//!
//! let report = schema.build().unwrap();
//! let ids: Vec<_> = report.columns().map(|c| c.id()).collect();
//! assert_eq!(ids, ["date", "cost"]);
//! ```

use crate::column::ColumnOptions;
use crate::error::Result;
use crate::report::{Report, UnknownKeys};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column definitions and settings for a [`Report`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSchema {
    /// Columns by id, in output order.
    pub columns: IndexMap<String, ColumnOptions>,
    /// Handling of keyed rows that name unknown columns.
    pub unknown_keys: UnknownKeys,
}

impl ReportSchema {
    /// Parses a schema from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a schema from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates an empty report with this schema's columns.
    pub fn build(&self) -> Result<Report> {
        Report::from_schema(self)
    }
}

impl Report {
    /// Creates an empty report from a schema.
    pub fn from_schema(schema: &ReportSchema) -> Result<Self> {
        let report = Report::with_columns(
            schema
                .columns
                .iter()
                .map(|(id, options)| (id.clone(), options.clone())),
        )?;
        tracing::debug!(
            columns = report.column_count(),
            unknown_keys = ?schema.unknown_keys,
            "built report from schema"
        );
        Ok(report.unknown_keys(schema.unknown_keys))
    }
}
