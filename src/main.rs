use stmtmap::{cli::Cli, mapper::Mapper, statement_reader, translate_statement, PROGRAM_NAME};

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let mapper = config.validate().context("Invalid column mapping")?;
    log::info!("Column mapping: {}", mapper);

    let stdin = [PathBuf::from("-")];
    let statements = if cli.files.is_empty() {
        &stdin[..]
    } else {
        &cli.files[..]
    };

    let mut out = io::stdout().lock();
    let mut diag = io::stderr().lock();

    for path in statements {
        process_statement(path, &mapper, config.trim, &mut out, &mut diag)?;
    }

    out.flush().context("Failed to flush standard output")
}

fn process_statement<W: Write, E: Write>(
    path: &Path,
    mapper: &Mapper,
    trim: bool,
    out: &mut W,
    diag: &mut E,
) -> Result<()> {
    let summary = if path == Path::new("-") {
        log::info!("Translating standard input");
        let mut reader = statement_reader(io::stdin().lock(), trim);
        translate_statement(&mut reader, mapper, out, diag).context("Failed to translate standard input")?
    } else {
        log::info!("Translating {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open statement {}", path.display()))?;
        let mut reader = statement_reader(file, trim);
        translate_statement(&mut reader, mapper, out, diag)
            .with_context(|| format!("Failed to translate {}", path.display()))?
    };

    log::info!(
        "{}: {} translated, {} rejected",
        path.display(),
        summary.translated,
        summary.rejected
    );
    Ok(())
}
