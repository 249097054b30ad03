use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use patron_registry::{logging, CliConfig, Command, ImportReport, Menu, PatronRegistry};

fn main() -> Result<ExitCode> {
    let config = CliConfig::parse();

    logging::init_cli_logger(config.verbose);
    tracing::debug!(?config, "parsed arguments");

    match &config.command {
        // Import mode
        Some(Command::Import { file, json }) => run_import(file, *json),
        // Menu mode (default)
        None => run_menu(config.preload.as_deref()),
    }
}

fn run_import(file: &Path, json: bool) -> Result<ExitCode> {
    let mut registry = PatronRegistry::new();

    let summary = match registry.import_file(file) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(path = %file.display(), error = ?err, "import failed");
            eprintln!("❌ {}", err);
            return Ok(ExitCode::from(1));
        }
    };

    let mut stdout = io::stdout().lock();
    if json {
        let report = ImportReport {
            summary: &summary,
            patrons: registry.iter().collect(),
        };
        serde_json::to_writer_pretty(&mut stdout, &report)
            .context("Failed to write JSON report")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", summary)?;
        writeln!(stdout, "{}", registry.list_all())?;
    }

    if summary.has_failures() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_menu(preload: Option<&Path>) -> Result<ExitCode> {
    let mut registry = PatronRegistry::new();

    if let Some(path) = preload {
        let summary = registry
            .import_file(path)
            .with_context(|| format!("Failed to preload {}", path.display()))?;
        println!("{}", summary);
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(registry, stdin.lock(), io::stdout());
    menu.run().context("Menu input/output failed")?;

    tracing::debug!(patrons = menu.registry().len(), "menu closed");
    Ok(ExitCode::SUCCESS)
}
