use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

pub type DocIndex = usize;

/// A spreadsheet cell, carried through to the report untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date number.
    DateTime(f64),
    /// Text of an error cell such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self { CellValue::String(s.to_string()) }
}

/// One input row. `cells` holds the complete original row, search word included.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub word: String,
    pub cells: Vec<CellValue>,
}

impl WordEntry {
    /// Case-folded form used for matching and table lookups.
    pub fn key(&self) -> String { self.word.to_lowercase() }
}

/// Target-word occurrences found in a single document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentStats {
    pub name: String,
    #[serde(skip)]
    pub counts: HashMap<String, u64>,
    /// Sum over all target words, not the document's word count.
    pub target_occurrences: u64,
}

/// Occurrences of every target word in every document.
///
/// Every (word, document) pair passed to [`CountTable::new`] has an entry,
/// zero when the word never occurred. The table cannot be modified once built.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    documents: Vec<String>,
    doc_totals: Vec<u64>,
    counts: HashMap<String, Vec<u64>>, // indexed by DocIndex
    grand_total: u64,
}

impl CountTable {
    pub fn new(words: &BTreeSet<String>, stats: &[DocumentStats]) -> Self {
        let mut counts: HashMap<String, Vec<u64>> =
            words.iter().map(|w| (w.clone(), vec![0; stats.len()])).collect();
        for (doc, s) in stats.iter().enumerate() {
            for (word, per_doc) in counts.iter_mut() {
                per_doc[doc] = s.counts.get(word).copied().unwrap_or(0);
            }
        }
        let doc_totals: Vec<u64> = stats.iter().map(|s| s.target_occurrences).collect();
        let grand_total = doc_totals.iter().sum();
        Self { documents: stats.iter().map(|s| s.name.clone()).collect(), doc_totals, counts, grand_total }
    }

    pub fn documents(&self) -> &[String] { &self.documents }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    pub fn words(&self) -> impl Iterator<Item = &str> { self.counts.keys().map(String::as_str) }

    /// Count for `word` (already case-folded) in document `doc`; zero for unknown pairs.
    pub fn count(&self, word: &str, doc: DocIndex) -> u64 {
        self.counts.get(word).and_then(|c| c.get(doc)).copied().unwrap_or(0)
    }

    pub fn doc_total(&self, doc: DocIndex) -> u64 { self.doc_totals.get(doc).copied().unwrap_or(0) }

    pub fn grand_total(&self) -> u64 { self.grand_total }
}

/// One output row: original cells, per-document figures in document order, totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub cells: Vec<CellValue>,
    pub counts: Vec<u64>,
    pub means: Vec<f64>,
    pub total: u64,
    pub overall_mean: f64,
}

/// `part / whole`, or zero when `whole` is zero.
pub fn ratio(part: u64, whole: u64) -> f64 {
    if whole > 0 { part as f64 / whole as f64 } else { 0.0 }
}
