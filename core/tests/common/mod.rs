#![allow(dead_code)]

use calamine::{open_workbook_auto, Data, Reader};
use counter_core::documents::TextExtractor;
use counter_core::RunError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Word list with a `Word` and a `Category` column.
pub fn write_word_list(path: &Path, rows: &[(&str, &str)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Word").unwrap();
    sheet.write_string(0, 1, "Category").unwrap();
    for (i, (word, category)) in rows.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *word).unwrap();
        sheet.write_string(i as u32 + 1, 1, *category).unwrap();
    }
    workbook.save(path).unwrap();
}

pub fn read_rows(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

pub fn text(s: &str) -> Data { Data::String(s.to_string()) }

/// Serves canned page text keyed by file name; the files themselves may be empty.
pub struct CannedText(pub HashMap<&'static str, Vec<&'static str>>);

impl CannedText {
    /// Creates an empty placeholder file in `dir` for every canned document.
    pub fn install(docs: &[(&'static str, Vec<&'static str>)], dir: &Path) -> Self {
        for (name, _) in docs {
            fs::write(dir.join(name), b"").unwrap();
        }
        CannedText(docs.iter().cloned().collect())
    }
}

impl TextExtractor for CannedText {
    fn extract_pages(&self, path: &Path) -> counter_core::Result<Vec<String>> {
        let name = path.file_name().unwrap().to_string_lossy();
        self.0
            .get(&*name)
            .map(|pages| pages.iter().map(|p| p.to_string()).collect())
            .ok_or_else(|| RunError::document_read(path, "unreadable"))
    }
}

/// A minimal PDF with one line of Courier text per page.
pub fn write_pdf(path: &Path, page_texts: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let mut kids: Vec<Object> = Vec::new();
    for line in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_texts.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
