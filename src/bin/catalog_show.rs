//! Print one record's detail payload: the record plus its merged files.
//!
//! Usage:
//!   catalog-show DS-7208HGHI-K1
//!   catalog-show --kind software iVMS-4200

use anyhow::{Context, Result};
use arquiva::{
    Catalog, ErrorResponse, ProductDetailResponse, SoftwareDetailResponse, find_data_root,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-show")]
#[command(about = "Print the detail payload for one product or software")]
struct Cli {
    /// Product id or model, or software id/name/title.
    id: String,
    /// Record kind to resolve.
    #[arg(long, default_value = "product", value_parser = ["product", "software"])]
    kind: String,
    /// Data root override; discovered via ARQUIVA_DATA_ROOT when omitted.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() {
    match run() {
        Ok(found) => {
            if !found {
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
    let catalog = Catalog::load(&data_root);
    for warning in &catalog.warnings {
        eprintln!("warning: {warning}");
    }

    let payload = match cli.kind.as_str() {
        "software" => match catalog.software_by_id(&cli.id) {
            Some(software) => {
                serde_json::to_string_pretty(&SoftwareDetailResponse::new(software))
                    .context("serializing software detail")?
            }
            None => {
                print_not_found("Software não encontrado")?;
                return Ok(false);
            }
        },
        _ => match catalog.product_by_id(&cli.id) {
            Some(product) => {
                serde_json::to_string_pretty(&ProductDetailResponse::new(product, &catalog.shared))
                    .context("serializing product detail")?
            }
            None => {
                print_not_found("Produto não encontrado")?;
                return Ok(false);
            }
        },
    };

    println!("{payload}");
    Ok(true)
}

fn print_not_found(message: &str) -> Result<()> {
    let payload = serde_json::to_string_pretty(&ErrorResponse::new(message))
        .context("serializing error response")?;
    println!("{payload}");
    Ok(())
}
