use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use counter_core::{spawn_run, Completion, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "counter")]
#[command(about = "Count word-list occurrences across a folder of PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count every word of the word list in every PDF and write a report spreadsheet
    Count {
        /// Word list spreadsheet (header row, search word in the first column)
        #[arg(long)]
        words: PathBuf,
        /// Folder containing the PDF documents (not searched recursively)
        #[arg(long)]
        documents: PathBuf,
        /// Output spreadsheet, overwritten if it exists
        #[arg(long, default_value = "./word_counts.xlsx")]
        output: PathBuf,
        /// Also write a JSON run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Count { words, documents, output, summary } => {
            count(RunConfig { word_list: words, document_folder: documents, output, summary })
        }
    }
}

fn count(config: RunConfig) -> Result<()> {
    let handle = spawn_run(config);
    let completion = handle.wait(|percent| eprintln!("progress: {percent}%"));
    match completion {
        Completion::Finished(ref outcome) => {
            tracing::info!(documents = outcome.documents, rows = outcome.rows, "run finished");
            println!("{}", completion.message());
            Ok(())
        }
        Completion::Failed(_) => bail!(completion.message()),
    }
}
