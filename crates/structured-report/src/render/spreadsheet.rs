//! XML Spreadsheet 2003 rendering.
//!
//! The document has a fixed shape: a `Header` (bold) and a `Currency` style,
//! then one worksheet holding one `<Column>` element per report column, a
//! title row, and one row per report row.

use super::format_row;
use crate::column::{ColumnType, SpreadsheetType, Target};
use crate::error::{ReportError, Result};
use crate::report::Report;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"),
    ("xmlns:o", "urn:schemas-microsoft-com:office:office"),
    ("xmlns:x", "urn:schemas-microsoft-com:office:excel"),
    ("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"),
    ("xmlns:html", "http://www.w3.org/TR/REC-html40"),
];

const HEADER_STYLE: &str = "Header";
const CURRENCY_STYLE: &str = "Currency";
const CURRENCY_FORMAT: &str = "\"$\"#,##0.00";
const SHEET_NAME: &str = "Sheet 1";

pub(super) fn render(report: &Report) -> Result<String> {
    let mut doc = Markup::new();

    doc.decl()?;
    doc.start("Workbook", &NAMESPACES)?;

    doc.start("Styles", &[])?;
    doc.start("Style", &[("ss:ID", HEADER_STYLE)])?;
    doc.empty("Font", &[("ss:Bold", "1")])?;
    doc.end("Style")?;
    doc.start("Style", &[("ss:ID", CURRENCY_STYLE)])?;
    doc.empty("NumberFormat", &[("ss:Format", CURRENCY_FORMAT)])?;
    doc.end("Style")?;
    doc.end("Styles")?;

    doc.start("Worksheet", &[("ss:Name", SHEET_NAME)])?;
    let column_count = report.column_count().to_string();
    doc.start("Table", &[("ss:ExpandedColumnCount", column_count.as_str())])?;

    for column in report.columns() {
        let width = column.width().map(|w| w.to_string());
        let mut attrs = vec![("ss:AutoFitWidth", "1")];
        if let Some(width) = width.as_deref() {
            attrs.push(("ss:Width", width));
        }
        if column.column_type() == ColumnType::Currency {
            attrs.push(("ss:StyleID", CURRENCY_STYLE));
        }
        doc.empty("Column", &attrs)?;
    }

    doc.start("Row", &[])?;
    for column in report.columns() {
        doc.cell(Some(HEADER_STYLE), SpreadsheetType::String, column.title())?;
    }
    doc.end("Row")?;

    for index in 0..report.count() {
        let cells = format_row(report, index, Target::Spreadsheet)?;
        doc.start("Row", &[])?;
        for (column, text) in report.columns().zip(&cells) {
            doc.cell(None, column.column_type().spreadsheet_type(), text)?;
        }
        doc.end("Row")?;
    }

    doc.end("Table")?;
    doc.end("Worksheet")?;
    doc.end("Workbook")?;

    doc.finish()
}

/// Thin wrapper over an indenting quick-xml writer.
struct Markup {
    writer: Writer<Vec<u8>>,
}

impl Markup {
    fn new() -> Self {
        Markup {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|err| ReportError::Markup(err.to_string()))
    }

    fn decl(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", None, None)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<Cell [ss:StyleID]><Data ss:Type="...">text</Data></Cell>`
    ///
    /// Text escapes only `&`, `<` and `>`; quotes stay literal.
    fn cell(&mut self, style: Option<&str>, data_type: SpreadsheetType, text: &str) -> Result<()> {
        match style {
            Some(style) => self.start("Cell", &[("ss:StyleID", style)])?,
            None => self.start("Cell", &[])?,
        }
        self.start("Data", &[("ss:Type", data_type.as_str())])?;
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.end("Data")?;
        self.end("Cell")
    }

    fn finish(self) -> Result<String> {
        let mut xml = String::from_utf8(self.writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColumnOptions, ColumnType, Report, RowInput};

    #[test]
    fn test_escapes_text_and_titles() {
        let mut report =
            Report::with_columns([("name", ColumnOptions::new("R&D <team>"))]).unwrap();
        report
            .add_row(RowInput::positional(["Fish & \"Chips\""]))
            .unwrap();

        let xml = report.to_spreadsheet_xml().unwrap();
        assert!(xml.contains(">R&amp;D &lt;team&gt;</Data>"));
        assert!(xml.contains(">Fish &amp; \"Chips\"</Data>"));
        assert!(!xml.contains("&quot;Chips"));
    }

    #[test]
    fn test_column_width_and_currency_style() {
        let report = Report::with_columns([
            ("item", ColumnOptions::new("Item").width(120.0)),
            (
                "price",
                ColumnOptions::new("Price")
                    .column_type(ColumnType::Currency)
                    .width(60.5),
            ),
        ])
        .unwrap();

        let xml = report.to_spreadsheet_xml().unwrap();
        assert!(xml.contains("<Column ss:AutoFitWidth=\"1\" ss:Width=\"120\"/>"));
        assert!(xml.contains(
            "<Column ss:AutoFitWidth=\"1\" ss:Width=\"60.5\" ss:StyleID=\"Currency\"/>"
        ));
        assert!(xml.contains("<Table ss:ExpandedColumnCount=\"2\">"));
    }

    #[test]
    fn test_number_cells_are_stripped() {
        let mut report = Report::with_columns([(
            "total",
            ColumnOptions::new("Total")
                .column_type(ColumnType::Float)
                .format("%.2f USD"),
        )])
        .unwrap();
        report.add_row(RowInput::positional([1234.5])).unwrap();

        let xml = report.to_spreadsheet_xml().unwrap();
        assert!(xml.contains("<Data ss:Type=\"Number\">1234.50</Data>"));
    }

    #[test]
    fn test_document_shape() {
        let report = Report::new();
        let xml = report.to_spreadsheet_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<Workbook xmlns="));
        assert!(xml.contains("<NumberFormat ss:Format=\"&quot;$&quot;#,##0.00\"/>"));
        assert!(xml.ends_with("</Workbook>\n"));
    }
}
