#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Throwaway data root for loader and CLI tests. Files are written relative
// to the root, so "products/cameras/a.json" lands inside the products store.
pub struct TempData {
    dir: TempDir,
}

impl TempData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("creating temp data root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_json(&self, rel: &str, value: &Value) -> PathBuf {
        let contents = serde_json::to_string_pretty(value).expect("encoding fixture JSON");
        self.write_raw(rel, &contents)
    }

    pub fn write_raw(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating fixture directories");
        }
        fs::write(&path, contents).expect("writing fixture file");
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).expect("creating fixture directory");
        path
    }
}
