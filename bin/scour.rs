use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scour::{tokenize, IndexBuilder, IndexReader, QueryParser};
use tracing::{debug, error, info};

/// How many result lines a query prints at most.
const MAX_RESULTS: usize = 50;

#[derive(Parser)]
#[command(name = "scour")]
#[command(about = "Full-text search over a static document corpus", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an index from tab-separated document lines on stdin
    Index {
        /// Directory the three index files are written to
        out_dir: PathBuf,
    },
    /// Load an index and answer queries from stdin
    Search {
        /// Directory holding index.docs, index.dict and index.postings
        index_dir: PathBuf,
    },
    /// Stem stdin line by line, one token per output line
    Tokenize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    // Usage errors exit 1; --help and --version are not errors.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = match args.command {
        Command::Index { out_dir } => run_index(&out_dir),
        Command::Search { index_dir } => run_search(&index_dir),
        Command::Tokenize => run_tokenize(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

/// Read one document per line (`url \t title \t text`, text may contain
/// further tabs), build the index in memory, write it to `out_dir`.
fn run_index(out_dir: &Path) -> Result<()> {
    let stdin = io::stdin();
    let mut builder = IndexBuilder::new();

    for line in stdin.lock().lines() {
        let line = line.context("reading document stream")?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, '\t');
        let (Some(url), Some(title), Some(text)) = (fields.next(), fields.next(), fields.next())
        else {
            debug!("skipping document line without two tab separators");
            continue;
        };

        let doc_id = builder.add_document(url, title, text);
        if (doc_id + 1) % 100 == 0 {
            info!(docs = doc_id + 1, "indexing progress");
        }
    }

    scour::write_index(&builder, out_dir).context("writing index")?;
    Ok(())
}

/// Load the index, announce readiness, then evaluate queries line by line
/// until `exit` or end of input.
fn run_search(index_dir: &Path) -> Result<()> {
    let index = IndexReader::open(index_dir)
        .with_context(|| format!("loading index from {}", index_dir.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Ready")?;
    out.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading query stream")?;
        if line == "exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let results = QueryParser::new(&line)
            .parse()
            .execute(&index)
            .context("evaluating query")?;

        writeln!(out, "Found {} docs.", results.len())?;
        for &doc_id in results.iter().take(MAX_RESULTS) {
            if let Some(doc) = index.doc(doc_id) {
                writeln!(out, "{} ({})", doc.title, doc.url)?;
            }
        }
        writeln!(out, "__END_QUERY__")?;
        out.flush()?;
    }

    Ok(())
}

/// Stem stdin lines, emitting one token per line and a sentinel per input
/// line, for driving the pipeline from other processes.
fn run_tokenize() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading text stream")?;
        for token in tokenize(&line) {
            writeln!(out, "{token}")?;
        }
        writeln!(out, "__END_DOC__")?;
        out.flush()?;
    }

    Ok(())
}
