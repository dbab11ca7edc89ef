use crate::model::WordEntry;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeSet, HashMap};

lazy_static! {
    // Hyphen/dash variants that typesetting leaves at a line end when it splits a word.
    static ref HYPHEN_BREAK: Regex = Regex::new("[\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2043}]\r?\n").expect("valid regex");
}

/// Lowercase `text` and rejoin words split by a hyphen at a line break.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    HYPHEN_BREAK.replace_all(&lowered, "").into_owned()
}

/// Case-folded, deduplicated target words.
pub fn dedup_words(entries: &[WordEntry]) -> BTreeSet<String> {
    entries.iter().map(WordEntry::key).collect()
}

/// Whole-word, case-insensitive matchers, one per target word.
pub struct WordMatcher {
    words: BTreeSet<String>,
    patterns: Vec<(String, Regex)>,
}

impl WordMatcher {
    pub fn new(words: &BTreeSet<String>) -> Result<Self, regex::Error> {
        let mut patterns = Vec::with_capacity(words.len());
        for word in words {
            let re = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
                .case_insensitive(true)
                .build()?;
            patterns.push((word.clone(), re));
        }
        Ok(Self { words: words.clone(), patterns })
    }

    pub fn words(&self) -> &BTreeSet<String> { &self.words }

    pub fn len(&self) -> usize { self.patterns.len() }

    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }

    /// Non-overlapping match counts per word, and their sum.
    pub fn count_in(&self, text: &str) -> (HashMap<String, u64>, u64) {
        let mut counts = HashMap::with_capacity(self.patterns.len());
        let mut total = 0u64;
        for (word, re) in &self.patterns {
            let n = re.find_iter(text).count() as u64;
            total += n;
            counts.insert(word.clone(), n);
        }
        (counts, total)
    }
}
