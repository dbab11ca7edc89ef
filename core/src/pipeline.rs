use crate::count::count_documents;
use crate::documents::{list_documents, PdfTextExtractor, TextExtractor};
use crate::error::{Result, RunError};
use crate::report::{build_report, save_summary, write_report, RunSummary};
use crate::sheet::read_word_sheet;
use crate::text::{dedup_words, WordMatcher};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Inputs and outputs of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Spreadsheet with the search words in column A.
    pub word_list: PathBuf,
    /// Folder scanned (non-recursively) for PDF files.
    pub document_folder: PathBuf,
    /// Report spreadsheet, overwritten if present.
    pub output: PathBuf,
    /// Optional JSON run summary.
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub output: PathBuf,
    pub documents: usize,
    pub rows: usize,
    pub grand_total: u64,
}

/// Read the word list, count words in every document, write the report.
pub fn run<E, F>(config: &RunConfig, extractor: &E, on_progress: F) -> Result<RunOutcome>
where
    E: TextExtractor + ?Sized,
    F: FnMut(u8),
{
    let sheet = read_word_sheet(&config.word_list)?;
    let words = dedup_words(&sheet.entries);
    let matcher = WordMatcher::new(&words).map_err(|e| RunError::input_format(&config.word_list, e))?;
    let documents = list_documents(&config.document_folder)?;
    tracing::info!(words = matcher.len(), rows = sheet.entries.len(), documents = documents.len(), "counting words");

    let table = count_documents(&documents, &matcher, extractor, on_progress)?;
    let report = build_report(&sheet, &table);
    write_report(&report, &config.output)?;
    if let Some(summary_path) = &config.summary {
        save_summary(summary_path, &RunSummary::new(&report, &table, &config.output))?;
    }

    tracing::info!(output = %config.output.display(), grand_total = table.grand_total(), "report written");
    Ok(RunOutcome { output: config.output.clone(), documents: table.num_docs(), rows: report.rows.len(), grand_total: table.grand_total() })
}

/// Terminal notice of a background run.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Finished(RunOutcome),
    Failed(String),
}

impl Completion {
    pub fn is_success(&self) -> bool { matches!(self, Completion::Finished(_)) }

    /// Text shown to the user when the run ends.
    pub fn message(&self) -> String {
        match self {
            Completion::Finished(outcome) => format!("Processing complete. Results saved to {}", outcome.output.display()),
            Completion::Failed(error) => format!("An error occurred: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Percentage of documents done, sent after each document.
    Progress(u8),
    /// Sent exactly once, last.
    Completed(Completion),
}

/// A run executing on its own thread. Runs cannot be cancelled.
pub struct RunHandle {
    receiver: Receiver<RunEvent>,
    join_handle: Option<JoinHandle<()>>,
}

impl RunHandle {
    pub fn events(&self) -> mpsc::Iter<'_, RunEvent> { self.receiver.iter() }

    /// Drain events into `on_progress` until the run completes.
    pub fn wait<F: FnMut(u8)>(mut self, mut on_progress: F) -> Completion {
        let mut completion = None;
        for event in self.receiver.iter() {
            match event {
                RunEvent::Progress(p) => on_progress(p),
                RunEvent::Completed(c) => {
                    completion = Some(c);
                    break;
                }
            }
        }
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
        completion.unwrap_or_else(|| Completion::Failed("worker stopped before completing".into()))
    }
}

/// Start a run on a worker thread with the PDF extractor.
pub fn spawn_run(config: RunConfig) -> RunHandle {
    spawn_run_with(config, PdfTextExtractor)
}

pub fn spawn_run_with<E>(config: RunConfig, extractor: E) -> RunHandle
where
    E: TextExtractor + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let join_handle = thread::spawn(move || {
        let progress: Sender<RunEvent> = sender.clone();
        let completion = match run(&config, &extractor, |p| {
            let _ = progress.send(RunEvent::Progress(p));
        }) {
            Ok(outcome) => Completion::Finished(outcome),
            Err(e) => {
                tracing::error!(error = %e, "run failed");
                Completion::Failed(e.to_string())
            }
        };
        let _ = sender.send(RunEvent::Completed(completion));
    });
    RunHandle { receiver, join_handle: Some(join_handle) }
}
