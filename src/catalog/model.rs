//! Record types mirroring the on-disk JSON, plus per-file parsers.
//!
//! Field names follow the portal's camelCase JSON. Unknown fields are kept
//! in a flattened `extra` map so a record read from disk serializes back
//! with everything the curators put in it.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One downloadable artifact: a firmware build, a manual, an image, a video.
pub struct FileEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl FileEntry {
    /// Identity used for shadowing during merges: the download target when
    /// present, otherwise the display name.
    pub fn merge_key(&self) -> &str {
        self.download_url
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
/// The four file kinds a record or shared set can carry. Serialization
/// always emits all four arrays; the portal's detail view relies on that.
pub struct FileSet {
    #[serde(default)]
    pub firmwares: Vec<FileEntry>,
    #[serde(default)]
    pub images: Vec<FileEntry>,
    #[serde(default)]
    pub documents: Vec<FileEntry>,
    #[serde(default)]
    pub videos: Vec<FileEntry>,
}

impl FileSet {
    pub fn is_empty(&self) -> bool {
        self.firmwares.is_empty()
            && self.images.is_empty()
            && self.documents.is_empty()
            && self.videos.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A device model entry. `model` doubles as the public identifier; `id` is
/// optional and only present in newer data files.
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "FileSet::is_empty")]
    pub files: FileSet,
    /// Opts the product out of category/global shared-file merging.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_shared_files: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A software title. Older files use `title` where newer ones use `name`.
pub struct SoftwareRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "FileSet::is_empty")]
    pub files: FileSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SoftwareRecord {
    /// Display name: `name`, falling back to `title`, then `id`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("")
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Shared default files applied to matching products. A set without a
/// category is the global fallback and applies to every product.
pub struct SharedFileSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub files: FileSet,
}

fn read_json(path: &Path) -> Result<Value> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Parse one products file. Product files must hold a JSON array of records.
pub fn parse_products_file(path: &Path) -> Result<Vec<ProductRecord>> {
    match read_json(path)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("decoding product records in {}", path.display())),
        _ => bail!("{} is not a JSON array of products", path.display()),
    }
}

/// Parse one softwares file: a JSON array of records, or a single record.
pub fn parse_softwares_file(path: &Path) -> Result<Vec<SoftwareRecord>> {
    match read_json(path)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("decoding software records in {}", path.display())),
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(|record| vec![record])
            .with_context(|| format!("decoding software record in {}", path.display())),
        _ => bail!(
            "{} is not a JSON array or object of softwares",
            path.display()
        ),
    }
}

/// Parse one shared-files file: a single shared set, or an array of them.
pub fn parse_shared_file(path: &Path) -> Result<Vec<SharedFileSet>> {
    match read_json(path)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("decoding shared file sets in {}", path.display())),
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(|set| vec![set])
            .with_context(|| format!("decoding shared file set in {}", path.display())),
        _ => bail!(
            "{} is not a JSON array or object of shared file sets",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_key_prefers_download_url() {
        let entry: FileEntry = serde_json::from_value(json!({
            "name": "Manual",
            "url": "https://cdn.example/a.pdf",
            "downloadUrl": "https://mirror.example/a.pdf"
        }))
        .unwrap();
        assert_eq!(entry.merge_key(), "https://mirror.example/a.pdf");
    }

    #[test]
    fn merge_key_falls_back_to_name() {
        let entry = FileEntry {
            name: "Manual".to_string(),
            ..FileEntry::default()
        };
        assert_eq!(entry.merge_key(), "Manual");
    }

    #[test]
    fn product_keeps_unknown_fields() {
        let record: ProductRecord = serde_json::from_value(json!({
            "model": "DS-2CD1023",
            "category": "Câmeras",
            "launchYear": 2021
        }))
        .unwrap();
        assert_eq!(record.extra.get("launchYear"), Some(&json!(2021)));

        let round = serde_json::to_value(&record).unwrap();
        assert_eq!(round.get("launchYear"), Some(&json!(2021)));
    }

    #[test]
    fn software_display_name_fallback_chain() {
        let titled: SoftwareRecord =
            serde_json::from_value(json!({"title": "iVMS-4200"})).unwrap();
        assert_eq!(titled.display_name(), "iVMS-4200");

        let named: SoftwareRecord =
            serde_json::from_value(json!({"name": "Hik-Connect", "title": "old"})).unwrap();
        assert_eq!(named.display_name(), "Hik-Connect");

        assert_eq!(SoftwareRecord::default().display_name(), "");
    }
}
