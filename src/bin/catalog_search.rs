//! Search the catalog and print the portal's search payload.
//!
//! Usage:
//!   catalog-search --query ds-72
//!   catalog-search --kind software --query ivms
//!   catalog-search --category DVR --data ./data

use anyhow::{Context, Result};
use arquiva::{
    Catalog, ProductSearchResponse, SoftwareSearchResponse, find_data_root, search_products,
    search_softwares,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-search")]
#[command(about = "Search products or softwares and print the portal JSON payload")]
struct Cli {
    /// Record kind to search.
    #[arg(long, default_value = "product", value_parser = ["product", "software"])]
    kind: String,
    /// Case-insensitive substring query; empty matches everything.
    #[arg(long, short = 'q', default_value = "")]
    query: String,
    /// Category filter; omit or pass "Todas" to search all categories.
    #[arg(long)]
    category: Option<String>,
    /// Data root override; discovered via ARQUIVA_DATA_ROOT when omitted.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_root = match cli.data {
        Some(path) => path,
        None => find_data_root()?,
    };
    let catalog = Catalog::load(&data_root);
    for warning in &catalog.warnings {
        eprintln!("warning: {warning}");
    }

    let category = cli.category.as_deref();
    let payload = match cli.kind.as_str() {
        "software" => {
            let hits = search_softwares(&catalog.softwares, &cli.query, category);
            serde_json::to_string_pretty(&SoftwareSearchResponse::new(&cli.query, category, hits))
        }
        _ => {
            let hits = search_products(&catalog.products, &cli.query, category);
            serde_json::to_string_pretty(&ProductSearchResponse::new(
                &cli.query,
                category,
                hits,
                &catalog.shared,
            ))
        }
    }
    .context("serializing search response")?;

    println!("{payload}");
    Ok(())
}
