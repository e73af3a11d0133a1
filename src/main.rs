use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vehicle_stream::config::Settings;
use vehicle_stream::prompt::{prompt_path, wait_for_enter};
use vehicle_stream::{Args, logging, run, validate_dirs};

fn resolve_path<R: BufRead, W: Write>(
    given: Option<PathBuf>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<PathBuf> {
    match given {
        Some(path) => Ok(path),
        None => prompt_path(input, output, message).context("Failed to read path from stdin"),
    }
}

fn execute(args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let root = resolve_path(
        args.root.clone(),
        &mut input,
        &mut output,
        "Enter the root folder (where the vehicle folders are): ",
    )?;
    let source = resolve_path(
        args.source.clone(),
        &mut input,
        &mut output,
        "Enter the source folder (where the .yft and .ytd files are): ",
    )?;

    if let Err(e) = validate_dirs(&root, &source) {
        tracing::error!("{e}");
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => Settings::load(path).context("Failed to load settings")?,
        None => Settings::default(),
    };

    let summary = run(&root, &source, &settings)?;
    tracing::info!(
        "Folders processed: {}, failed: {}; files copied: {}, missing: {}, copy errors: {}",
        summary.folders_processed,
        summary.folders_failed,
        summary.files_copied,
        summary.files_missing,
        summary.copy_failures
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.debug).context("Failed to initialize logging")?;

    println!("==== Vehicle Stream Folder Builder ====");
    if let Err(e) = execute(&args) {
        tracing::error!("{e:#}");
    }
    println!("\nProcess finished!");

    if !args.no_wait {
        let stdin = io::stdin();
        wait_for_enter(&mut stdin.lock(), &mut io::stdout())?;
    }
    Ok(())
}
