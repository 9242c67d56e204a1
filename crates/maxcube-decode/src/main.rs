// maxcube-decode -- decode MAX! Cube configuration (C) messages.
//
// Usage:
//   maxcube-decode 'C:0b0da3,0gsNowIBEABLRVEwNTQ0MjQy...'
//   maxcube-decode --input cube.log --format json
//   nc cube 62910 | grep '^C:' | maxcube-decode --strict -v

use std::fs::File;
use std::io::{self, BufReader, Cursor};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use maxcube_decode::{process, CliConfig, CliResult, OutputFormat, Summary};

/// Decode MAX! Cube configuration messages.
#[derive(Parser)]
#[command(name = "maxcube-decode", version, about)]
struct Cli {
    /// Messages to decode (`C:<addr>,<base64>` or `<addr>,<base64>`).
    /// Read from --input or stdin when none are given.
    messages: Vec<String>,

    /// File with one message per line.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Token delimiter (overrides the config file).
    #[arg(long)]
    delimiter: Option<char>,

    /// Exit with an error if any record carries diagnostics.
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> CliResult<CliConfig> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    Ok(config.with_overrides(cli.format, cli.delimiter, cli.strict))
}

fn run(cli: &Cli) -> CliResult<(Summary, bool)> {
    let config = load_config(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if !cli.messages.is_empty() {
        process(Cursor::new(cli.messages.join("\n")), &config, &mut out)?
    } else if let Some(path) = &cli.input {
        process(BufReader::new(File::open(path)?), &config, &mut out)?
    } else {
        process(io::stdin().lock(), &config, &mut out)?
    };

    Ok((summary, config.strict))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok((summary, strict)) => {
            info!(
                "Decoded {} message(s), {} failed, {} with warnings",
                summary.decoded, summary.failed, summary.with_diagnostics
            );
            if summary.is_failure(strict) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
