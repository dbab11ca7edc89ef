use crate::error::{Result, RunError};
use crate::model::{ratio, CellValue, CountTable, DocumentStats, ReportRow};
use crate::sheet::WordSheet;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TOTAL_HEADER: &str = "Total";
pub const OVERALL_MEAN_HEADER: &str = "Overall Mean";
pub const SUMMARY_VERSION: u32 = 1;

/// Output sheet contents: extended headers and rows sorted by total, highest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub headers: Vec<CellValue>,
    pub rows: Vec<ReportRow>,
}

/// Original headers, then `"{doc} Count"` for every document, `"{doc} Mean"` for every document, `Total`, `Overall Mean`.
pub fn extended_headers(headers: &[CellValue], documents: &[String]) -> Vec<CellValue> {
    let mut out = headers.to_vec();
    out.extend(documents.iter().map(|d| CellValue::String(format!("{d} Count"))));
    out.extend(documents.iter().map(|d| CellValue::String(format!("{d} Mean"))));
    out.push(TOTAL_HEADER.into());
    out.push(OVERALL_MEAN_HEADER.into());
    out
}

pub fn build_report(sheet: &WordSheet, table: &CountTable) -> Report {
    let mut rows: Vec<ReportRow> = sheet
        .entries
        .iter()
        .map(|entry| {
            let key = entry.key();
            let counts: Vec<u64> = (0..table.num_docs()).map(|d| table.count(&key, d)).collect();
            let means = counts.iter().enumerate().map(|(d, c)| ratio(*c, table.doc_total(d))).collect();
            let total: u64 = counts.iter().sum();
            ReportRow { cells: entry.cells.clone(), counts, means, total, overall_mean: ratio(total, table.grand_total()) }
        })
        .collect();
    // Stable: equal totals keep input order.
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    Report { headers: extended_headers(&sheet.headers, table.documents()), rows }
}

/// Write `report` as a single-sheet workbook, replacing any existing file.
///
/// Headers group every count before every mean; data rows hold one (count, mean) pair per document.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    write_workbook(report, path).map_err(|e| RunError::output_write(path, e))
}

fn write_workbook(report: &Report, path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    // Fixed creation time keeps repeated runs byte-identical.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let sheet = workbook.add_worksheet();
    for (col, header) in report.headers.iter().enumerate() {
        write_cell(sheet, 0, col, header)?;
    }
    for (i, row) in report.rows.iter().enumerate() {
        let r = i as u32 + 1;
        let mut col = 0usize;
        for cell in &row.cells {
            write_cell(sheet, r, col, cell)?;
            col += 1;
        }
        // The input row may be narrower than the header row.
        col = col.max(report.headers.len().saturating_sub(2 + 2 * row.counts.len()));
        // (count, mean) per document, in document order.
        for (count, mean) in row.counts.iter().zip(&row.means) {
            sheet.write_number(r, column(col)?, *count as f64)?;
            sheet.write_number(r, column(col + 1)?, *mean)?;
            col += 2;
        }
        sheet.write_number(r, column(col)?, row.total as f64)?;
        sheet.write_number(r, column(col + 1)?, row.overall_mean)?;
    }
    workbook.save(path)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: usize, cell: &CellValue) -> std::result::Result<(), XlsxError> {
    let col = column(col)?;
    match cell {
        CellValue::Empty => {}
        CellValue::String(s) | CellValue::Error(s) => { sheet.write_string(row, col, s)?; }
        CellValue::Int(i) => { sheet.write_number(row, col, *i as f64)?; }
        CellValue::Float(f) | CellValue::DateTime(f) => { sheet.write_number(row, col, *f)?; }
        CellValue::Bool(b) => { sheet.write_boolean(row, col, *b)?; }
    }
    Ok(())
}

fn column(col: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Machine-readable account of a finished run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub version: u32,
    pub created_at: String,
    pub output: PathBuf,
    pub rows: usize,
    pub words: usize,
    pub documents: Vec<DocumentStats>,
    pub grand_total: u64,
}

impl RunSummary {
    pub fn new(report: &Report, table: &CountTable, output: &Path) -> Self {
        let documents = table
            .documents()
            .iter()
            .enumerate()
            .map(|(d, name)| DocumentStats { name: name.clone(), target_occurrences: table.doc_total(d), ..Default::default() })
            .collect();
        Self {
            version: SUMMARY_VERSION,
            created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
            output: output.to_path_buf(),
            rows: report.rows.len(),
            words: table.words().count(),
            documents,
            grand_total: table.grand_total(),
        }
    }
}

pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| RunError::output_write(path, e))?;
    let mut f = File::create(path).map_err(|e| RunError::output_write(path, e))?;
    f.write_all(json.as_bytes()).map_err(|e| RunError::output_write(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordEntry;
    use std::collections::{BTreeSet, HashMap};

    fn entry(word: &str, note: &str) -> WordEntry {
        WordEntry { word: word.into(), cells: vec![word.into(), note.into()] }
    }

    fn doc(name: &str, counts: &[(&str, u64)]) -> DocumentStats {
        DocumentStats {
            name: name.into(),
            counts: counts.iter().map(|(w, c)| (w.to_string(), *c)).collect::<HashMap<_, _>>(),
            target_occurrences: counts.iter().map(|(_, c)| c).sum(),
        }
    }

    fn sheet(entries: Vec<WordEntry>) -> WordSheet {
        WordSheet { headers: vec!["Word".into(), "Note".into()], entries }
    }

    #[test]
    fn headers_group_counts_before_means() {
        let h = extended_headers(&[CellValue::from("Word")], &["a.pdf".to_string(), "b.pdf".to_string()]);
        let h: Vec<&str> = h.iter().map(|c| c.as_text().unwrap_or_default()).collect();
        assert_eq!(h, vec!["Word", "a.pdf Count", "b.pdf Count", "a.pdf Mean", "b.pdf Mean", "Total", "Overall Mean"]);
    }

    #[test]
    fn means_and_totals_follow_the_ratio_law() {
        let words: BTreeSet<String> = ["the", "cat"].iter().map(|s| s.to_string()).collect();
        let table = CountTable::new(&words, &[doc("d1.pdf", &[("the", 3), ("cat", 7)]), doc("d2.pdf", &[("the", 5)])]);
        let report = build_report(&sheet(vec![entry("The", "article"), entry("cat", "animal")]), &table);

        let the = report.rows.iter().find(|r| r.cells[0] == CellValue::from("The")).unwrap();
        assert_eq!(the.counts, vec![3, 5]);
        assert_eq!(the.means, vec![0.3, 1.0]);
        assert_eq!(the.total, 8);
        assert_eq!(the.overall_mean, 8.0 / 15.0);
        assert_eq!(the.cells[1], CellValue::from("article"));
    }

    #[test]
    fn empty_documents_yield_zero_means() {
        let words: BTreeSet<String> = ["the"].iter().map(|s| s.to_string()).collect();
        let table = CountTable::new(&words, &[doc("empty.pdf", &[])]);
        let report = build_report(&sheet(vec![entry("the", "")]), &table);
        assert_eq!(report.rows[0].means, vec![0.0]);
        assert_eq!(report.rows[0].overall_mean, 0.0);
    }

    #[test]
    fn rows_sorted_by_total_descending_with_stable_ties() {
        let words: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let table = CountTable::new(&words, &[doc("d.pdf", &[("a", 1), ("b", 4), ("c", 1)])]);
        let report = build_report(&sheet(vec![entry("a", "1"), entry("b", "2"), entry("c", "3"), entry("A", "4")]), &table);
        let order: Vec<&str> = report.rows.iter().map(|r| r.cells[1].as_text().unwrap_or_default()).collect();
        assert_eq!(order, vec!["2", "1", "3", "4"]);
        assert!(report.rows.windows(2).all(|w| w[0].total >= w[1].total));
    }
}
