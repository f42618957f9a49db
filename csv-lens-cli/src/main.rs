mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use csv_lens_common::{Config, CsvLensError};
use csv_lens_core::{apply, load_csv, render, Query};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();
    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (msg, code) = describe(&e);
            eprintln!("{msg}");
            ExitCode::from(code)
        }
    }
}

/// Load first so a missing file wins over any expression error.
fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    cli.apply_to(&mut config);
    log::debug!("effective config: {config:?}");
    let dataset = load_csv(&cli.file, &config.loader)?;
    let total = dataset.len();
    let query = Query::parse(cli.where_expr.as_deref(), cli.aggregate.as_deref())?;
    let dataset = apply(dataset, &query, &config.filter)
        .with_context(|| format!("processing {}", cli.file.display()))?;
    log::info!("{}: {total} rows loaded, {} rows out", cli.file.display(), dataset.len());
    render(&dataset, &config.display, out)?;
    out.flush()?;
    Ok(())
}

/// stderr line and exit status for a failed run; a missing file gets its own message
fn describe(err: &anyhow::Error) -> (String, u8) {
    match err.downcast_ref::<CsvLensError>() {
        Some(e) if e.is_not_found() => (e.to_string(), e.exit_code()),
        Some(e) => (format!("An error occurred: {err:#}"), e.exit_code()),
        None => (format!("An error occurred: {err:#}"), 1),
    }
}
