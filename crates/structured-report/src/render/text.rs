//! Fixed-width text rendering.
//!
//! ```text
//! Date     | Cost
//! ------------------
//! 1/1/2001 | $10.00
//! 1/2/2001 |  $5.00
//! ```
//!
//! Each column is as wide as its widest cell or title. Numeric columns are
//! right-aligned, everything else left-aligned. Every line ends with one
//! padding space; the divider ends with an extra `-` instead.

use super::format_row;
use crate::column::Target;
use crate::error::Result;
use crate::report::Report;
use crate::util::{display_width, pad_left, pad_right};

const SEPARATOR: &str = " | ";

pub(super) fn render(report: &Report) -> Result<String> {
    let columns: Vec<_> = report.columns().collect();
    let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c.title())).collect();

    let mut body = Vec::with_capacity(report.count());
    for index in 0..report.count() {
        let cells = format_row(report, index, Target::Text)?;
        for (width, cell) in widths.iter_mut().zip(&cells) {
            *width = (*width).max(display_width(cell));
        }
        body.push(cells);
    }

    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad_right(column.title(), *width))
        .collect();
    push_line(&mut out, &header.join(SEPARATOR));

    let divider = widths.iter().sum::<usize>()
        + SEPARATOR.len() * columns.len().saturating_sub(1)
        + 1;
    out.push_str(&"-".repeat(divider));
    out.push('\n');

    for cells in &body {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .zip(cells)
            .map(|((column, width), cell)| {
                if column.column_type().is_numeric() {
                    pad_left(cell, *width)
                } else {
                    pad_right(cell, *width)
                }
            })
            .collect();
        push_line(&mut out, &line.join(SEPARATOR));
    }

    Ok(out)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(" \n");
}
