use crate::error::{Result, RunError};
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of per-page document text.
pub trait TextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Extracts text from PDF files with `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).map_err(|e| RunError::document_read(path, e))?;
        // pdf-extract panics on some malformed files instead of returning an error.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes)) {
            Ok(pages) => pages.map_err(|e| RunError::document_read(path, e)),
            Err(_) => Err(RunError::document_read(path, "malformed PDF")),
        }
    }
}

/// Full text of a document, pages concatenated in page order.
///
/// Every page is terminated by a line break so words never run across a page boundary.
pub fn extract_text<E: TextExtractor + ?Sized>(extractor: &E, path: &Path) -> Result<String> {
    let mut text = String::new();
    for page in extractor.extract_pages(path)? {
        text.push_str(&page);
        if !page.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok(text)
}

/// PDF files directly inside `folder`, sorted by file name.
pub fn list_documents(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(folder).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| RunError::document_read(folder, e))?;
        if !entry.file_type().is_file() { continue; }
        if is_pdf(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.to_lowercase().ends_with(".pdf"))
}

/// Display name used for report columns.
pub fn document_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}
