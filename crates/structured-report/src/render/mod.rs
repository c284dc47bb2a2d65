//! Report renderers.
//!
//! | Format | Function | Cell target |
//! |--------|----------|-------------|
//! | Delimited text (CSV) | [`Report::to_csv`] | [`Target::Text`] |
//! | Spreadsheet XML | [`Report::to_spreadsheet_xml`] | [`Target::Spreadsheet`] |
//! | Fixed-width text | [`Report::to_text`] | [`Target::Text`] |
//!
//! All renderers emit columns in registration order and rows in append
//! order. A cell that fails to format aborts the render with
//! [`ReportError::Format`](crate::ReportError::Format).

mod delimited;
mod spreadsheet;
mod text;

use crate::column::{Column, Target};
use crate::error::{ReportError, Result};
use crate::report::Report;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static BLANK: Value = Value::Null;

/// Output format selector for [`Report::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with a header line.
    Csv,
    /// XML Spreadsheet 2003 markup.
    Spreadsheet,
    /// Aligned plain-text table.
    Text,
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xls" | "xml" | "spreadsheet" => Ok(OutputFormat::Spreadsheet),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(ReportError::UnknownOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Spreadsheet => f.write_str("xls"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

impl Report {
    /// Renders the report in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        tracing::debug!(
            %format,
            rows = self.count(),
            columns = self.column_count(),
            "rendering report"
        );
        match format {
            OutputFormat::Csv => delimited::render(self),
            OutputFormat::Spreadsheet => spreadsheet::render(self),
            OutputFormat::Text => text::render(self),
        }
    }

    /// Renders a header line of titles followed by one CSV line per row.
    pub fn to_csv(&self) -> Result<String> {
        self.render(OutputFormat::Csv)
    }

    /// Renders a single-worksheet XML spreadsheet document.
    pub fn to_spreadsheet_xml(&self) -> Result<String> {
        self.render(OutputFormat::Spreadsheet)
    }

    /// Renders an aligned text table.
    pub fn to_text(&self) -> Result<String> {
        self.render(OutputFormat::Text)
    }
}

/// Formats every cell of row `index`, in column order.
fn format_row(report: &Report, index: usize, target: Target) -> Result<Vec<String>> {
    report
        .columns()
        .map(|column| column.format_value(cell(column, index), target))
        .collect()
}

fn cell(column: &Column, index: usize) -> &Value {
    column.data().get(index).unwrap_or(&BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("XLS".parse::<OutputFormat>().unwrap(), OutputFormat::Spreadsheet);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(ReportError::UnknownOutputFormat(_))
        ));
    }
}
