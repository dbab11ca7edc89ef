use crate::error::{Result, RunError};
use crate::model::{CellValue, WordEntry};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Contents of the input word list: header row plus one entry per data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordSheet {
    pub headers: Vec<CellValue>,
    pub entries: Vec<WordEntry>,
}

/// Read the first worksheet of `path`. Row 1 holds headers, column A of every later row the search word.
pub fn read_word_sheet(path: &Path) -> Result<WordSheet> {
    let mut workbook = open_workbook_auto(path).map_err(|e| RunError::input_format(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RunError::input_format(path, "workbook has no worksheet"))?
        .map_err(|e| RunError::input_format(path, e))?;

    let mut rows = anchored_rows(&range).into_iter();
    let headers = match rows.next() {
        Some(row) => row,
        None => return Err(RunError::input_format(path, "worksheet is empty")),
    };

    let mut entries = Vec::new();
    for (i, cells) in rows.enumerate() {
        let word = match cells.first().and_then(CellValue::as_text) {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => {
                // 1-based, after the header row
                let row_no = i + 2;
                return Err(RunError::input_format(path, format!("row {row_no}: first column is not a word")));
            }
        };
        entries.push(WordEntry { word, cells });
    }
    tracing::debug!(path = %path.display(), rows = entries.len(), "read word list");
    Ok(WordSheet { headers, entries })
}

/// Rows of `range` laid out from cell A1. calamine trims leading blank rows and columns, which are restored as empty cells.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (first_row, first_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };
    let width = first_col + range.width();
    let mut rows = vec![vec![CellValue::Empty; width]; first_row];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; first_col];
        cells.extend(row.iter().map(cell_value));
        rows.push(cells);
    }
    rows
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
