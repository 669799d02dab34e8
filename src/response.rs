//! JSON payloads served by the portal.
//!
//! These structs pin the response contract the frontend consumes: search
//! responses carry the matched records (products annotated with
//! `_fileCounts`), detail responses carry one record plus its merged file
//! listing, and failures collapse to `{ success: false, error, details? }`.

use crate::catalog::{
    FileCounts, FileSet, ProductRecord, SharedFileSet, SoftwareRecord, merged_files, own_files,
    search::ALL_CATEGORIES,
};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
/// A product in search results, annotated with counters for the card UI.
pub struct ProductHit {
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Counts are taken over the merged listing so cards agree with the
    /// detail page once shared files apply.
    #[serde(rename = "_fileCounts")]
    pub file_counts: FileCounts,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProductSearchResponse {
    pub success: bool,
    pub total: usize,
    pub query: String,
    pub category: String,
    pub products: Vec<ProductHit>,
}

impl ProductSearchResponse {
    pub fn new(
        query: &str,
        category: Option<&str>,
        hits: Vec<&ProductRecord>,
        shared: &[SharedFileSet],
    ) -> Self {
        let products: Vec<ProductHit> = hits
            .into_iter()
            .map(|product| ProductHit {
                file_counts: FileCounts::of(&merged_files(product, shared)),
                product: product.clone(),
            })
            .collect();
        Self {
            success: true,
            total: products.len(),
            query: query.to_string(),
            category: category.unwrap_or(ALL_CATEGORIES).to_string(),
            products,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SoftwareSearchResponse {
    pub success: bool,
    pub total: usize,
    pub query: String,
    pub category: String,
    pub softwares: Vec<SoftwareRecord>,
}

impl SoftwareSearchResponse {
    pub fn new(query: &str, category: Option<&str>, hits: Vec<&SoftwareRecord>) -> Self {
        let softwares: Vec<SoftwareRecord> = hits.into_iter().cloned().collect();
        Self {
            success: true,
            total: softwares.len(),
            query: query.to_string(),
            category: category.unwrap_or(ALL_CATEGORIES).to_string(),
            softwares,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// Detail payload for one product: the record plus its merged listing. The
/// `files` set always carries all four arrays, even when empty.
pub struct ProductDetailResponse {
    pub success: bool,
    pub product: ProductRecord,
    pub files: FileSet,
}

impl ProductDetailResponse {
    pub fn new(product: &ProductRecord, shared: &[SharedFileSet]) -> Self {
        Self {
            success: true,
            files: merged_files(product, shared),
            product: product.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SoftwareDetailResponse {
    pub success: bool,
    pub software: SoftwareRecord,
    pub files: FileSet,
}

impl SoftwareDetailResponse {
    pub fn new(software: &SoftwareRecord) -> Self {
        Self {
            success: true,
            files: own_files(software),
            software: software.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
