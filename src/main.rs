//! `pagesplit`: split a PDF into fixed-size chunks from the command line.
//!
//! ```bash
//! pagesplit book.pdf --count
//! pagesplit book.pdf --output out --pages 20
//! RUST_LOG=pagesplit=debug pagesplit book.pdf -o out -p 5 --prefix part_
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagesplit::{count_pages, spawn, OutputNaming, SharedProgress, SplitRequest};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// How often the progress bar is refreshed while a split runs.
const REFRESH: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "pagesplit", version, about = "Split a PDF into fixed-size chunks of pages")]
struct Cli {
    /// PDF document to split.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the document's page count and exit.
    #[arg(long)]
    count: bool,

    /// Directory the chunk files are written to. Must already exist.
    #[arg(
        short,
        long,
        env = "PAGESPLIT_OUTPUT",
        value_name = "DIR",
        required_unless_present = "count"
    )]
    output: Option<PathBuf>,

    /// Pages per output file.
    #[arg(
        short,
        long,
        env = "PAGESPLIT_PAGES",
        value_name = "NUM",
        required_unless_present = "count"
    )]
    pages: Option<usize>,

    /// File name prefix; chunk N is written as `<prefix>N.pdf`.
    #[arg(long, env = "PAGESPLIT_PREFIX", default_value = OutputNaming::DEFAULT_PREFIX)]
    prefix: String,
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Warning: {e:#}");
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<pagesplit::Error>() {
                Some(inner) => eprintln!("[{}] {e:#}", inner.kind()),
                None => eprintln!("[error] {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.count {
        let pages = count_pages(&cli.input)
            .with_context(|| format!("cannot count pages of {}", cli.input.display()))?;
        println!("{} has {pages} pages.", cli.input.display());
        return Ok(());
    }

    let request = SplitRequest::new(
        &cli.input,
        cli.output.unwrap_or_default(),
        cli.pages.unwrap_or_default(),
    )
    .with_prefix(cli.prefix);

    let progress = SharedProgress::new();
    let handle = spawn(request, progress.clone()).context("cannot start split")?;

    let bar = create_progress_bar("Splitting");
    while !handle.is_finished() {
        bar.set_position(progress.get().round() as u64);
        thread::sleep(REFRESH);
    }
    bar.set_position(progress.get().round() as u64);

    match handle.join() {
        Ok(files) => {
            bar.finish_with_message("Done");
            for file in &files {
                println!("Wrote {}", file.display());
            }
            println!("Split {} into {} files.", cli.input.display(), files.len());
            Ok(())
        }
        Err(e) => {
            bar.abandon_with_message("Failed");
            Err(anyhow::Error::new(e).context(format!("cannot split {}", cli.input.display())))
        }
    }
}

/// A 0-100 bar on stderr.
fn create_progress_bar(message: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|e| {
            eprintln!("Failed to create progress bar template: {e}");
            ProgressStyle::default_bar()
        })
        .progress_chars("=>-");
    bar.set_style(style);
    bar.set_message(message.to_owned());
    bar
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, so the progress
/// bar is not interleaved with routine events).
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("failed to create env filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init()
        .context("failed to initialize tracing")?;

    Ok(())
}
