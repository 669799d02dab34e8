use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod response;
pub mod schema;

pub use catalog::{
    ALL_CATEGORIES, Catalog, FileCounts, FileEntry, FileSet, LoadWarning, ProductRecord,
    SharedFileSet, SoftwareRecord, merged_files, own_files, search_products, search_softwares,
};
pub use response::{
    ErrorResponse, ProductDetailResponse, ProductHit, ProductSearchResponse,
    SoftwareDetailResponse, SoftwareSearchResponse,
};

const PRODUCTS_DIR: &str = "products";
const SOFTWARES_DIR: &str = "softwares";
const SHARED_DIR: &str = "shared";
const LEGACY_PRODUCTS_FILE: &str = "products.json";
const DATA_DIR: &str = "data";

/// A directory qualifies as a data root when it carries at least one of the
/// catalog stores. An empty directory does not, so stray `data/` folders in
/// parent directories are not picked up by the upward search.
fn is_data_root(candidate: &Path) -> bool {
    candidate.join(PRODUCTS_DIR).is_dir()
        || candidate.join(SOFTWARES_DIR).is_dir()
        || candidate.join(SHARED_DIR).is_dir()
        || candidate.join(LEGACY_PRODUCTS_FILE).is_file()
}

fn data_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_data_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(DATA_DIR);
        if is_data_root(&candidate) {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the catalog data root.
///
/// Resolution order: `ARQUIVA_DATA_ROOT`, then a `data/` directory found by
/// walking up from the current directory, then the compile-time hint baked by
/// `build.rs`. Every candidate must pass [`is_data_root`].
pub fn find_data_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("ARQUIVA_DATA_ROOT") {
        if let Some(root) = data_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("ARQUIVA_ROOT_HINT") {
        let candidate = Path::new(hint).join(DATA_DIR);
        if is_data_root(&candidate) {
            return Ok(candidate);
        }
    }

    bail!(
        "Unable to locate the catalog data root. Set ARQUIVA_DATA_ROOT to the directory holding products/ and softwares/."
    );
}
