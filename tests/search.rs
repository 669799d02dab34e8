// Search payloads over a loaded tree: filter semantics plus response shape.
#[path = "support/common.rs"]
mod common;

use arquiva::{
    Catalog, ProductSearchResponse, SoftwareSearchResponse, search_products, search_softwares,
};
use serde_json::json;

use common::TempData;

fn portal_tree() -> TempData {
    let data = TempData::new();
    data.write_json(
        "products/cameras.json",
        &json!([
            {"model": "DS-2CD1023G0E-I", "category": "Câmeras",
             "files": {"firmwares": [{"name": "fw", "url": "https://cdn/fw.bin"}]}},
            {"model": "DS-2CE16D0T-IRF", "category": "Câmeras"}
        ]),
    );
    data.write_json(
        "products/recorders.json",
        &json!([{"model": "DS-7208HGHI-K1", "category": "DVR"}]),
    );
    data.write_json(
        "shared/global.json",
        &json!({"files": {"documents": [{"name": "Warranty", "url": "https://cdn/w.pdf"}]}}),
    );
    data.write_json(
        "softwares/desktop.json",
        &json!([
            {"name": "iVMS-4200", "category": "Desktop", "version": "3.8.1"},
            {"title": "Hik-Connect", "category": "APP", "description": "Acesso remoto"}
        ]),
    );
    data
}

#[test]
fn query_and_category_filter_products_from_disk() {
    let data = portal_tree();
    let catalog = Catalog::load(data.root());

    let hits = search_products(&catalog.products, "ds-2", None);
    assert_eq!(hits.len(), 2);

    let hits = search_products(&catalog.products, "ds-2", Some("Câmeras"));
    assert_eq!(hits.len(), 2);

    let hits = search_products(&catalog.products, "", Some("DVR"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].model, "DS-7208HGHI-K1");
}

#[test]
fn product_search_payload_counts_include_shared_files() {
    let data = portal_tree();
    let catalog = Catalog::load(data.root());

    let hits = search_products(&catalog.products, "DS-2CD1023", None);
    let response = ProductSearchResponse::new("DS-2CD1023", None, hits, &catalog.shared);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["total"], json!(1));
    assert_eq!(value["query"], json!("DS-2CD1023"));
    assert_eq!(value["category"], json!("Todas"));
    // One own firmware plus the global shared warranty document.
    assert_eq!(value["products"][0]["_fileCounts"]["firmwares"], json!(1));
    assert_eq!(value["products"][0]["_fileCounts"]["documents"], json!(1));
    assert_eq!(value["products"][0]["_fileCounts"]["totalDocuments"], json!(1));
}

#[test]
fn software_search_payload_uses_softwares_key() {
    let data = portal_tree();
    let catalog = Catalog::load(data.root());

    let hits = search_softwares(&catalog.softwares, "remoto", None);
    let response = SoftwareSearchResponse::new("remoto", None, hits);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["total"], json!(1));
    assert_eq!(value["softwares"][0]["title"], json!("Hik-Connect"));
    assert!(value.get("products").is_none());
}

#[test]
fn unknown_category_matches_nothing() {
    let data = portal_tree();
    let catalog = Catalog::load(data.root());
    assert!(search_products(&catalog.products, "", Some("Radar")).is_empty());
    assert!(search_softwares(&catalog.softwares, "", Some("Radar")).is_empty());
}
