//! Recursive catalog loading.
//!
//! Each store (`products/`, `softwares/`, `shared/`) is a directory tree of
//! JSON files walked in sorted order so loads are deterministic. A file or
//! directory that cannot be read never aborts the load; it becomes a
//! [`LoadWarning`] and the walk continues, mirroring how the portal kept
//! serving whatever data was still parseable.

use crate::catalog::model::{
    ProductRecord, SharedFileSet, SoftwareRecord, parse_products_file, parse_shared_file,
    parse_softwares_file,
};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const PRODUCTS_DIR: &str = "products";
const SOFTWARES_DIR: &str = "softwares";
const SHARED_DIR: &str = "shared";
const LEGACY_PRODUCTS_FILE: &str = "products.json";

#[derive(Clone, Debug)]
/// A file or directory skipped during a load, with the reason.
pub struct LoadWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl LoadWarning {
    fn new(path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Everything under one data root, loaded fresh. No cache, no index;
/// lookups are linear scans in load order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub products: Vec<ProductRecord>,
    pub softwares: Vec<SoftwareRecord>,
    pub shared: Vec<SharedFileSet>,
    pub warnings: Vec<LoadWarning>,
}

impl Catalog {
    pub fn load(data_root: &Path) -> Self {
        let mut warnings = Vec::new();
        let products = load_products(data_root, &mut warnings);
        let softwares = load_softwares(data_root, &mut warnings);
        let shared = load_shared(data_root, &mut warnings);
        Self {
            products,
            softwares,
            shared,
            warnings,
        }
    }

    /// Resolve a product by exact model.
    pub fn product_by_model(&self, model: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.model == model)
    }

    /// Resolve a product by id, falling back to model.
    pub fn product_by_id(&self, id: &str) -> Option<&ProductRecord> {
        self.products
            .iter()
            .find(|p| p.id.as_deref() == Some(id) || p.model == id)
    }

    /// Resolve a software by id, name, or title.
    pub fn software_by_id(&self, id: &str) -> Option<&SoftwareRecord> {
        self.softwares.iter().find(|s| {
            s.id.as_deref() == Some(id)
                || s.name.as_deref() == Some(id)
                || s.title.as_deref() == Some(id)
        })
    }
}

/// Load every product record under `<data_root>/products`.
///
/// When that directory is missing, falls back to the legacy single-file
/// `<data_root>/products.json`; when neither exists the catalog is empty.
pub fn load_products(data_root: &Path, warnings: &mut Vec<LoadWarning>) -> Vec<ProductRecord> {
    let products_dir = data_root.join(PRODUCTS_DIR);
    if !products_dir.is_dir() {
        let legacy = data_root.join(LEGACY_PRODUCTS_FILE);
        if legacy.is_file() {
            return match parse_products_file(&legacy) {
                Ok(records) => records,
                Err(err) => {
                    warnings.push(LoadWarning::new(&legacy, format!("{err:#}")));
                    Vec::new()
                }
            };
        }
        return Vec::new();
    }

    let mut records = Vec::new();
    for path in json_files_under(&products_dir, warnings) {
        match parse_products_file(&path) {
            Ok(parsed) => records.extend(parsed),
            Err(err) => warnings.push(LoadWarning::new(&path, format!("{err:#}"))),
        }
    }
    records
}

/// Load every software record under `<data_root>/softwares`. Missing
/// directory means an empty list; there is no legacy fallback.
pub fn load_softwares(data_root: &Path, warnings: &mut Vec<LoadWarning>) -> Vec<SoftwareRecord> {
    let softwares_dir = data_root.join(SOFTWARES_DIR);
    if !softwares_dir.is_dir() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for path in json_files_under(&softwares_dir, warnings) {
        match parse_softwares_file(&path) {
            Ok(parsed) => records.extend(parsed),
            Err(err) => warnings.push(LoadWarning::new(&path, format!("{err:#}"))),
        }
    }
    records
}

/// Load every shared-files definition under `<data_root>/shared`.
pub fn load_shared(data_root: &Path, warnings: &mut Vec<LoadWarning>) -> Vec<SharedFileSet> {
    let shared_dir = data_root.join(SHARED_DIR);
    if !shared_dir.is_dir() {
        return Vec::new();
    }

    let mut sets = Vec::new();
    for path in json_files_under(&shared_dir, warnings) {
        match parse_shared_file(&path) {
            Ok(parsed) => sets.extend(parsed),
            Err(err) => warnings.push(LoadWarning::new(&path, format!("{err:#}"))),
        }
    }
    sets
}

/// Collect `*.json` files under `dir` recursively, in sorted path order.
pub(crate) fn json_files_under(dir: &Path, warnings: &mut Vec<LoadWarning>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_json_files(dir, &mut files, warnings);
    files
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>, warnings: &mut Vec<LoadWarning>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warnings.push(LoadWarning::new(dir, format!("reading directory: {err}")));
            return;
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(err) => warnings.push(LoadWarning::new(dir, format!("reading entry: {err}"))),
        }
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_json_files(&path, files, warnings);
        } else if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
            files.push(path);
        }
    }
}
