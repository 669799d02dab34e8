//! Substring search over the loaded records.
//!
//! Products filter on model (case-insensitive substring) plus exact
//! category; softwares filter on a case-insensitive category plus a
//! substring match across name, description, version, and category. No
//! ranking and no pagination; results keep load order.

use crate::catalog::model::{ProductRecord, SoftwareRecord};

/// Category sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "Todas";

/// Filter products by model substring and exact category.
///
/// An empty or whitespace query matches every model. `None` or the
/// [`ALL_CATEGORIES`] sentinel disables the category filter; otherwise the
/// product category must match exactly.
pub fn search_products<'a>(
    products: &'a [ProductRecord],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a ProductRecord> {
    let query = query.trim().to_lowercase();
    let category = category.filter(|c| *c != ALL_CATEGORIES);

    products
        .iter()
        .filter(|product| query.is_empty() || product.model.to_lowercase().contains(&query))
        .filter(|product| match category {
            Some(wanted) => product.category.as_deref() == Some(wanted),
            None => true,
        })
        .collect()
}

/// Filter softwares by category and a substring query.
///
/// The category comparison is case-insensitive and only records that carry
/// a category can match it. The query matches against the display name,
/// description, version, and category.
pub fn search_softwares<'a>(
    softwares: &'a [SoftwareRecord],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a SoftwareRecord> {
    let query = query.trim().to_lowercase();
    let category = category.map(str::to_lowercase);

    softwares
        .iter()
        .filter(|software| match &category {
            Some(wanted) => software
                .category
                .as_ref()
                .is_some_and(|c| c.to_lowercase() == *wanted),
            None => true,
        })
        .filter(|software| query.is_empty() || software_matches(software, &query))
        .collect()
}

fn software_matches(software: &SoftwareRecord, query_lower: &str) -> bool {
    let fields = [
        Some(software.display_name()),
        software.description.as_deref(),
        software.version.as_deref(),
        software.category.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn products() -> Vec<ProductRecord> {
        serde_json::from_value(json!([
            {"model": "DS-2CD1023G0E-I", "category": "Câmeras"},
            {"model": "DS-7208HGHI-K1", "category": "DVR"},
            {"model": "DS-7608NI-K1", "category": "NVR"}
        ]))
        .unwrap()
    }

    fn softwares() -> Vec<SoftwareRecord> {
        serde_json::from_value(json!([
            {"name": "iVMS-4200", "category": "Desktop", "version": "3.8.1"},
            {"title": "Hik-Connect", "category": "APP", "description": "Acesso remoto"},
            {"name": "SADP", "description": "Device discovery tool"}
        ]))
        .unwrap()
    }

    #[test]
    fn model_query_is_case_insensitive_substring() {
        let all = products();
        let hits = search_products(&all, "ds-72", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model, "DS-7208HGHI-K1");
    }

    #[test]
    fn blank_query_returns_everything() {
        let all = products();
        assert_eq!(search_products(&all, "   ", None).len(), 3);
    }

    #[test]
    fn product_category_match_is_exact() {
        let all = products();
        assert_eq!(search_products(&all, "", Some("DVR")).len(), 1);
        // Unlike softwares, product categories are compared verbatim.
        assert!(search_products(&all, "", Some("dvr")).is_empty());
    }

    #[test]
    fn todas_sentinel_disables_category_filter() {
        let all = products();
        assert_eq!(search_products(&all, "", Some(ALL_CATEGORIES)).len(), 3);
    }

    #[test]
    fn query_and_category_compose() {
        let all = products();
        assert!(search_products(&all, "ds-72", Some("NVR")).is_empty());
        assert_eq!(search_products(&all, "ds-76", Some("NVR")).len(), 1);
    }

    #[test]
    fn software_category_match_is_case_insensitive() {
        let all = softwares();
        let hits = search_softwares(&all, "", Some("app"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name(), "Hik-Connect");
    }

    #[test]
    fn software_query_spans_name_description_and_version() {
        let all = softwares();
        assert_eq!(search_softwares(&all, "discovery", None).len(), 1);
        assert_eq!(search_softwares(&all, "3.8", None).len(), 1);
        assert_eq!(search_softwares(&all, "hik-connect", None).len(), 1);
    }

    #[test]
    fn software_without_category_never_matches_category_filter() {
        let all = softwares();
        let hits = search_softwares(&all, "", Some("Desktop"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name(), "iVMS-4200");
    }
}
