// indexer/src/commands.rs

use anyhow::{
    Context,
    Result
};
use clap::{
    builder::OsStringValueParser,
    error::ErrorKind,
    Parser
};
use std::{
    ffi::OsString,
    fs,
    io::{
        self,
        BufWriter,
        Write
    },
    path::PathBuf,
    process::ExitCode
};
use tracing::{
    debug,
    info
};
use tracing_subscriber::EnvFilter;
use crate::{
    index::Index,
    layout::Layout,
    scan::{
        self,
        ScanOptions,
        DEFAULT_EXT
    }
};

/// Exit status when the root directory argument is missing (`-1` as a byte).
pub const EXIT_MISSING_ROOT: u8 = 255;

/// Build a date -> language -> files index from a directory tree and print it as JSON
#[derive(Parser, Debug)]
#[command(name = "path-indexer")]
#[command(version)]
pub struct Cli {
    /// Directory to scan (an empty value means the current directory)
    #[arg(value_name = "ROOT_DIR", value_parser = OsStringValueParser::new())]
    pub root: OsString,

    /// Directory shape(s) to match
    #[arg(short, long, value_enum, default_value_t = Layout::Shallow)]
    pub layout: Layout,

    /// Extension indexed files must carry
    #[arg(short, long, default_value = DEFAULT_EXT)]
    pub ext: String,

    /// Sort dates, languages and filenames instead of keeping discovery order
    #[arg(short, long)]
    pub sort: bool,

    /// Skip entries whose date is not a real calendar date
    #[arg(long)]
    pub strict_dates: bool,

    /// Fail on unreadable entries and non-UTF-8 names instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Write the index here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,

    /// Accepted and ignored
    #[arg(hide = true, value_name = "IGNORED", value_parser = OsStringValueParser::new())]
    pub ignored: Vec<OsString>,
}

impl Cli {
    /// Root as a path; `""` is the current directory.
    pub fn root_dir(&self) -> PathBuf {
        if self.root.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.root)
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            layout: self.layout,
            extension: self.ext.clone(),
            strict_dates: self.strict_dates,
            strict: self.strict,
        }
    }
}

pub fn run_cli() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            // stdout stays empty; usage goes to stderr
            let _ = err.print();
            return ExitCode::from(EXIT_MISSING_ROOT);
        }
        Err(err) => err.exit(),
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let root = cli.root_dir();
    if !cli.ignored.is_empty() {
        debug!(count = cli.ignored.len(), "ignoring extra arguments");
    }
    let mut index = scan::build_index(&root, &cli.scan_options())
        .with_context(|| format!("indexing {}", root.display()))?;
    if cli.sort {
        index.sort();
    }

    match &cli.output {
        Some(path) => {
            let f = fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            emit(&index, BufWriter::new(f))
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "index written");
        }
        None => {
            emit(&index, io::stdout().lock()).context("writing index to stdout")?;
        }
    }
    Ok(())
}

/// Rendered index plus a trailing newline, flushed.
fn emit<W: Write>(index: &Index, mut out: W) -> Result<()> {
    index.write_pretty(&mut out)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
