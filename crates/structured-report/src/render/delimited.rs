//! Delimited-text (CSV) rendering.

use super::format_row;
use crate::column::{Column, Target};
use crate::error::Result;
use crate::report::Report;

pub(super) fn render(report: &Report) -> Result<String> {
    // The csv writer quotes an empty record as `""`; a report without
    // columns is one bare line per record.
    if report.column_count() == 0 {
        return Ok("\n".repeat(report.count() + 1));
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(report.columns().map(Column::title))?;
    for index in 0..report.count() {
        wtr.write_record(format_row(report, index, Target::Text)?)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
