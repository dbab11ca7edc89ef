use crate::documents::{document_name, extract_text, TextExtractor};
use crate::error::Result;
use crate::model::{CountTable, DocumentStats};
use crate::text::{normalize, WordMatcher};
use std::path::{Path, PathBuf};

/// Count every target word in every document, one document at a time.
///
/// `on_progress` receives `done * 100 / total` after each document. The first
/// document that cannot be read aborts the count.
pub fn count_documents<E, F>(documents: &[PathBuf], matcher: &WordMatcher, extractor: &E, mut on_progress: F) -> Result<CountTable>
where
    E: TextExtractor + ?Sized,
    F: FnMut(u8),
{
    let mut stats = Vec::with_capacity(documents.len());
    for (i, path) in documents.iter().enumerate() {
        let doc = count_document(path, matcher, extractor)?;
        tracing::debug!(document = %doc.name, target_occurrences = doc.target_occurrences, "counted document");
        stats.push(doc);
        on_progress(progress_percent(i + 1, documents.len()));
    }
    Ok(CountTable::new(matcher.words(), &stats))
}

/// Occurrences of the matcher's words in one document.
pub fn count_document<E: TextExtractor + ?Sized>(path: &Path, matcher: &WordMatcher, extractor: &E) -> Result<DocumentStats> {
    let text = normalize(&extract_text(extractor, path)?);
    let (counts, target_occurrences) = matcher.count_in(&text);
    Ok(DocumentStats { name: document_name(path), counts, target_occurrences })
}

pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 { return 100; }
    (done.min(total) * 100 / total) as u8
}
