//! Shared-file merging.
//!
//! A product's download listing is its own files plus category-level shared
//! defaults plus the global shared fallback. Earlier layers shadow later
//! ones by download target, so a product can override a shared artifact
//! without the listing showing it twice. Softwares never receive shared
//! files; only their own sets are surfaced.

use crate::catalog::model::{FileEntry, FileSet, ProductRecord, SharedFileSet, SoftwareRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Merge a product's files with the shared sets that apply to it.
///
/// Order: own files, then sets whose category equals the product's, then
/// sets with no category (global). A product with `excludeSharedFiles`
/// keeps only its own files.
pub fn merged_files(product: &ProductRecord, shared: &[SharedFileSet]) -> FileSet {
    let mut merged = product.files.clone();
    if product.exclude_shared_files {
        return merged;
    }

    for set in shared {
        if category_matches(set, product) {
            append_missing(&mut merged, &set.files);
        }
    }
    for set in shared {
        if set.category.is_none() {
            append_missing(&mut merged, &set.files);
        }
    }
    merged
}

/// A software's file listing: its own sets only.
pub fn own_files(software: &SoftwareRecord) -> FileSet {
    software.files.clone()
}

fn category_matches(set: &SharedFileSet, product: &ProductRecord) -> bool {
    match (&set.category, &product.category) {
        (Some(shared_cat), Some(product_cat)) => shared_cat == product_cat,
        _ => false,
    }
}

fn append_missing(dst: &mut FileSet, src: &FileSet) {
    merge_kind(&mut dst.firmwares, &src.firmwares);
    merge_kind(&mut dst.images, &src.images);
    merge_kind(&mut dst.documents, &src.documents);
    merge_kind(&mut dst.videos, &src.videos);
}

fn merge_kind(dst: &mut Vec<FileEntry>, src: &[FileEntry]) {
    let seen: BTreeSet<String> = dst.iter().map(|f| f.merge_key().to_string()).collect();
    for entry in src {
        if !seen.contains(entry.merge_key()) {
            dst.push(entry.clone());
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Per-product counters shown on search cards, serialized as `_fileCounts`.
/// `total_documents` folds videos into the document count the way the
/// portal's cards do.
pub struct FileCounts {
    pub firmwares: usize,
    pub documents: usize,
    pub videos: usize,
    pub total_documents: usize,
}

impl FileCounts {
    pub fn of(files: &FileSet) -> Self {
        Self {
            firmwares: files.firmwares.len(),
            documents: files.documents.len(),
            videos: files.videos.len(),
            total_documents: files.documents.len() + files.videos.len(),
        }
    }
}
