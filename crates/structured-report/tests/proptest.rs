//! Property-based tests for row bookkeeping and rendering.

use proptest::prelude::*;
use serde_json::Value;
use structured_report::util::display_width;
use structured_report::{ColumnOptions, ColumnType, Report, RowInput, Target};

// ============================================================================
// Test helpers
// ============================================================================

const IDS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

fn report_with(types: &[ColumnType]) -> Report {
    Report::with_columns(types.iter().enumerate().map(|(i, t)| {
        (
            IDS[i],
            ColumnOptions::new(IDS[i].to_uppercase()).column_type(t),
        )
    }))
    .unwrap()
}

fn column_type_strategy() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

// Cells are integer strings so every column type can format them.
fn rows_strategy(columns: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec((0u32..100_000).prop_map(|n| n.to_string()), columns),
        0..20,
    )
}

fn table_strategy() -> impl Strategy<Value = (Vec<ColumnType>, Vec<Vec<String>>)> {
    prop::collection::vec(column_type_strategy(), 1..=4)
        .prop_flat_map(|types| {
            let n = types.len();
            (Just(types), rows_strategy(n))
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// After N rows, the count and every column length equal N.
    #[test]
    fn count_matches_column_lengths((types, rows) in table_strategy()) {
        let mut report = report_with(&types);
        for row in &rows {
            report.add_row(RowInput::positional(row.clone())).unwrap();
        }

        prop_assert_eq!(report.count(), rows.len());
        for column in report.columns() {
            prop_assert_eq!(column.len(), rows.len());
        }
    }

    /// Keyed rows store the same values whatever the key order.
    #[test]
    fn keyed_rows_ignore_key_order(
        (types, rows) in table_strategy(),
        seed in any::<u64>(),
    ) {
        let mut positional = report_with(&types);
        let mut keyed = report_with(&types);

        for row in &rows {
            positional.add_row(RowInput::positional(row.clone())).unwrap();

            let mut entries: Vec<(&str, String)> =
                IDS.iter().copied().zip(row.iter().cloned()).collect();
            let len = entries.len();
            entries.rotate_left((seed as usize) % len);
            keyed.add_row(RowInput::keyed(entries)).unwrap();
        }

        for (a, b) in positional.columns().zip(keyed.columns()) {
            prop_assert_eq!(a.data(), b.data());
        }
    }

    /// Positional values land in columns in registration order.
    #[test]
    fn positional_rows_follow_column_order((types, rows) in table_strategy()) {
        let mut report = report_with(&types);
        for row in &rows {
            report.add_row(RowInput::positional(row.clone())).unwrap();
        }

        for (i, column) in report.columns().enumerate() {
            let expected: Vec<Value> = rows.iter().map(|r| Value::from(r[i].as_str())).collect();
            prop_assert_eq!(column.data(), expected.as_slice());
        }
    }

    /// Rejected positional rows never change the report.
    #[test]
    fn short_rows_are_rejected_without_mutation((types, rows) in table_strategy()) {
        let mut report = report_with(&types);
        for row in &rows {
            report.add_row(RowInput::positional(row.clone())).unwrap();
        }
        let before = report.clone();

        let short: Vec<String> = vec!["1".to_string(); types.len() - 1];
        prop_assert!(report.add_row(RowInput::positional(short)).is_err());
        prop_assert_eq!(report, before);
    }

    /// Every fixed-width line is as wide as the divider, and each column is
    /// as wide as its widest title or cell.
    #[test]
    fn fixed_width_lines_align((types, rows) in table_strategy()) {
        let mut report = report_with(&types);
        for row in &rows {
            report.add_row(RowInput::positional(row.clone())).unwrap();
        }

        let text = report.to_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), rows.len() + 2);

        let divider = display_width(lines[1]);
        for line in &lines {
            prop_assert_eq!(display_width(line), divider);
        }

        let widths: Vec<usize> = report
            .columns()
            .map(|column| {
                column
                    .data()
                    .iter()
                    .map(|v| display_width(&column.format_value(v, Target::Text).unwrap()))
                    .chain(std::iter::once(display_width(column.title())))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let expected = widths.iter().sum::<usize>() + 3 * (widths.len() - 1) + 1;
        prop_assert_eq!(divider, expected);
    }

    /// CSV output has one line per row plus the header.
    #[test]
    fn csv_line_count((types, rows) in table_strategy()) {
        let mut report = report_with(&types);
        for row in &rows {
            report.add_row(RowInput::positional(row.clone())).unwrap();
        }

        let csv = report.to_csv().unwrap();
        prop_assert_eq!(csv.lines().count(), rows.len() + 1);
    }
}
