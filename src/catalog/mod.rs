//! Flat-file catalog core.
//!
//! The portal's records live as JSON files under a data root (for example
//! `data/products/cameras/ds-2cd1023.json`). This module loads those trees
//! into memory, merges per-product file lists with category and global
//! shared defaults, and runs the substring filters behind the portal's
//! search endpoints. Loading is synchronous and per-call; there is no cache
//! between calls and no index beyond a linear scan.

pub mod loader;
pub mod merge;
pub mod model;
pub mod search;

pub use loader::{Catalog, LoadWarning, load_products, load_shared, load_softwares};
pub use merge::{FileCounts, merged_files, own_files};
pub use model::{
    FileEntry, FileSet, ProductRecord, SharedFileSet, SoftwareRecord, parse_products_file,
    parse_shared_file, parse_softwares_file,
};
pub use search::{ALL_CATEGORIES, search_products, search_softwares};
