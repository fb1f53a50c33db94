//! CLI commands for docemit

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::config::{self, save_config, Config};
use crate::emitter::{Emitter, ErrorPolicy};
use crate::models::{Outcome, Report, WriteResult};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Options for a single emit run, layered over the loaded config
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub base_dir: Option<PathBuf>,
    pub strict: bool,
    pub only: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ConfigOperation {
    Init { force: bool },
    Show,
}

/// Write the documentation tree and report per-file outcomes
pub fn emit(config: &Config, options: &EmitOptions, format: OutputFormat) -> Result<Report> {
    let base_dir = options
        .base_dir
        .clone()
        .unwrap_or_else(|| config.base_dir.clone());
    let policy = if options.strict {
        ErrorPolicy::Strict
    } else {
        config.policy()
    };

    let mut manifest = catalog::manifest(&config.footer());
    manifest.retain_prefixes(&options.only);
    if manifest.is_empty() {
        bail!("No documents match {}", options.only.join(", "));
    }

    let emitter = Emitter::new(&base_dir).with_policy(policy);

    let report = match format {
        OutputFormat::Summary => {
            println!("Writing {} files to {}", manifest.len(), base_dir.display());
            let report = emitter.emit_with(&manifest, print_progress)?;
            print_summary(&report);
            report
        }
        OutputFormat::Json => {
            let report = emitter.emit(&manifest)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            report
        }
    };

    Ok(report)
}

/// One status line per processed entry
pub fn progress_line(result: &WriteResult) -> String {
    match &result.outcome {
        Outcome::Success => format!("  ✓  {}", result.relative_path),
        Outcome::Failure { reason } => format!("  ✗  {}: {}", result.relative_path, reason),
    }
}

fn print_progress(result: &WriteResult) {
    println!("{}", progress_line(result));
}

fn print_summary(report: &Report) {
    println!();
    println!(
        "Result: {} files written, {} errors.",
        report.successes(),
        report.failures()
    );
    if report.skipped() > 0 {
        println!("Skipped {} files after the first error (strict mode).", report.skipped());
    }
}

/// List the built-in documents
pub fn list(format: OutputFormat) -> Result<()> {
    let docs = catalog::documents();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = docs
                .iter()
                .map(|doc| {
                    serde_json::json!({
                        "path": doc.path,
                        "title": doc.title,
                        "source": doc.source,
                        "bytes": doc.body.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Summary => {
            println!("{:<36} {:<28} {:<26} {:>7}", "PATH", "TITLE", "SOURCE", "BYTES");
            println!("{}", "-".repeat(100));
            for doc in docs {
                println!(
                    "{:<36} {:<28} {:<26} {:>7}",
                    doc.path,
                    doc.title,
                    doc.source,
                    doc.body.len()
                );
            }
        }
    }

    Ok(())
}

/// Print one rendered document
pub fn show(config: &Config, path: &str) -> Result<()> {
    let doc = catalog::find(path).with_context(|| format!("Document not found: {}", path))?;
    print!("{}", doc.render(&config.footer()));
    Ok(())
}

pub fn config_command(config_path: Option<&Path>, operation: ConfigOperation) -> Result<()> {
    match operation {
        ConfigOperation::Init { force } => {
            let path = init_config(config_path, force)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigOperation::Show => {
            let config = config::load_config(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Write a default config file, refusing to clobber an existing one unless forced
pub fn init_config(config_path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = config::resolve_config_path(config_path)
        .context("Could not determine config directory")?;

    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    save_config(&Config::default(), &path)?;
    Ok(path)
}
