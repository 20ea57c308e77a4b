//! CLI filter that hides delimiters and record separators inside quoted
//! CSV fields from line and field oriented tools, and restores them.
//!
//! Usage:
//!   csvquote [OPTIONS] [FILES]...
//!   csvquote data.csv | cut -d, -f1,3 | csvquote -u

use clap::{ArgAction, Parser};
use csvquote::{Config, DEFAULT_CHUNK_SIZE, Mode, Result, execute_paths, parse_byte};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

/// Replace delimiter and record separator bytes inside quoted fields with
/// non-printing bytes (0x1F and 0x1E), or restore them with -u.
///
/// Reads the named files in order, or standard input if none are given, and
/// writes to standard output. If the reader of the output goes away early,
/// exits with status 1 without a message.
#[derive(Parser)]
#[command(name = "csvquote", disable_help_flag = true)]
struct Cli {
    /// Input files (default: standard input)
    files: Vec<PathBuf>,

    /// Field delimiter character
    #[arg(short = 'd', default_value = ",", value_parser = parse_byte)]
    delimiter: u8,

    /// Use tab as the field delimiter (overrides -d)
    #[arg(short = 't')]
    tab: bool,

    /// Field quoting character
    #[arg(short = 'q', default_value = "\"", value_parser = parse_byte)]
    quote: u8,

    /// Record separator character
    #[arg(short = 'r', default_value = "\\n", value_parser = parse_byte)]
    record_separator: u8,

    /// Restore mode: turn the non-printing bytes back into the originals
    #[arg(short = 'u', overrides_with = "substitute")]
    restore: bool,

    /// Substitute mode (the default)
    #[arg(short = 's', overrides_with = "restore")]
    substitute: bool,

    /// Print the index of each field in the first record, then quit
    #[arg(short = 'h')]
    header: bool,

    /// Flush output after every record (slower)
    #[arg(short = 'b')]
    line_buffered: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        // downstream closed early (`| head`): stop quietly like a SIGPIPE exit
        if !e.is_broken_pipe() {
            eprintln!("csvquote: {e}");
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let delimiter = if cli.tab { b'\t' } else { cli.delimiter };
    let config = Config::new(delimiter, cli.quote, cli.record_separator)?
        .with_line_buffering(cli.line_buffered);
    let mode = Mode::from_flags(cli.restore && !cli.substitute, cli.header);
    log::debug!("mode {mode:?}, {config:?}");

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(DEFAULT_CHUNK_SIZE, stdout.lock());
    let stats = execute_paths(&config, mode, &cli.files, &mut out)?;
    log::info!("processed {} bytes in {} chunks", stats.bytes, stats.chunks);
    Ok(())
}
