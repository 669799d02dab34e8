//! Validate every catalog data file against the record schemas.
//!
//! Usage:
//!   catalog-lint
//!   catalog-lint --data ./data --schema-dir ./schema
//!
//! Exits nonzero when any file is malformed or any record fails its schema.

use anyhow::{Context, Result};
use arquiva::find_data_root;
use arquiva::schema::{SchemaSet, lint_data_root};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-lint")]
#[command(about = "Validate catalog data files against the record schemas")]
struct Cli {
    /// Data root override; discovered via ARQUIVA_DATA_ROOT when omitted.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Directory holding *.schema.json overrides; bundled schemas when omitted.
    #[arg(long)]
    schema_dir: Option<PathBuf>,
}

fn main() {
    match run() {
        Ok(clean) => {
            if !clean {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let data_root = match cli.data {
        Some(path) => path,
        None => find_data_root()?,
    };
    let schemas = match cli.schema_dir {
        Some(dir) => SchemaSet::from_dir(&dir)
            .with_context(|| format!("loading schemas from {}", dir.display()))?,
        None => SchemaSet::bundled().context("compiling bundled schemas")?,
    };

    let report = lint_data_root(&data_root, &schemas);
    for finding in &report.findings {
        println!("{}: {}", finding.path.display(), finding.message);
    }
    println!(
        "{} file(s) checked, {} finding(s)",
        report.files_checked,
        report.findings.len()
    );

    Ok(report.is_clean())
}
