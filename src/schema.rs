//! JSON Schema validation for catalog data files.
//!
//! `catalog-lint` compiles one schema per record kind (bundled into the
//! binary, overridable from a schema directory) and reports every violation
//! in the data tree. Validation is a curation aid; the loader itself stays
//! permissive and only skips files that fail to parse.

use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Product,
    Software,
    Shared,
}

impl SchemaKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            SchemaKind::Product => "product.schema.json",
            SchemaKind::Software => "software.schema.json",
            SchemaKind::Shared => "shared.schema.json",
        }
    }

    fn bundled_source(&self) -> &'static str {
        match self {
            SchemaKind::Product => include_str!("../schema/product.schema.json"),
            SchemaKind::Software => include_str!("../schema/software.schema.json"),
            SchemaKind::Shared => include_str!("../schema/shared.schema.json"),
        }
    }
}

/// A compiled record schema.
pub struct RecordSchema {
    compiled: JSONSchema,
    // Backing document for `compiled`; the compiler borrows it for 'static,
    // so it must stay alive exactly as long as this struct.
    _raw: Arc<Value>,
}

impl RecordSchema {
    /// Compile the schema shipped inside the binary.
    pub fn bundled(kind: SchemaKind) -> Result<Self> {
        let value: Value = serde_json::from_str(kind.bundled_source())
            .with_context(|| format!("parsing bundled schema {}", kind.file_name()))?;
        Self::compile(value, kind.file_name())
    }

    /// Compile `<dir>/<kind file name>` from disk, for schema overrides.
    pub fn from_dir(dir: &Path, kind: SchemaKind) -> Result<Self> {
        let path = dir.join(kind.file_name());
        let value: Value = serde_json::from_reader(
            File::open(&path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(value, &path.display().to_string())
    }

    fn compile(value: Value, origin: &str) -> Result<Self> {
        let raw = Arc::new(value);
        let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
        let compiled = JSONSchema::compile(raw_static)
            .with_context(|| format!("compiling schema {origin}"))?;
        Ok(Self {
            compiled,
            _raw: raw,
        })
    }

    /// Every violation for one record, as display strings. Empty means valid.
    pub fn violations(&self, record: &Value) -> Vec<String> {
        match self.compiled.validate(record) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|err| err.to_string()).collect(),
        }
    }
}

/// The three compiled record schemas used by a lint pass.
pub struct SchemaSet {
    pub product: RecordSchema,
    pub software: RecordSchema,
    pub shared: RecordSchema,
}

impl SchemaSet {
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            product: RecordSchema::bundled(SchemaKind::Product)?,
            software: RecordSchema::bundled(SchemaKind::Software)?,
            shared: RecordSchema::bundled(SchemaKind::Shared)?,
        })
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            product: RecordSchema::from_dir(dir, SchemaKind::Product)?,
            software: RecordSchema::from_dir(dir, SchemaKind::Software)?,
            shared: RecordSchema::from_dir(dir, SchemaKind::Shared)?,
        })
    }
}

#[derive(Clone, Debug)]
/// One lint problem: a file that does not parse, has the wrong shape, or
/// holds a record violating its schema.
pub struct LintFinding {
    pub path: std::path::PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct LintReport {
    pub files_checked: usize,
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn finding(&mut self, path: &Path, message: impl Into<String>) {
        self.findings.push(LintFinding {
            path: path.to_path_buf(),
            message: message.into(),
        });
    }
}

/// Validate every data file under the root against the record schemas.
///
/// Unlike the loader, the lint is strict: a products file that is not an
/// array, or a record failing its schema, is a finding even though the
/// loader would merely warn and move on.
pub fn lint_data_root(data_root: &Path, schemas: &SchemaSet) -> LintReport {
    let mut report = LintReport::default();

    let products_dir = data_root.join("products");
    if products_dir.is_dir() {
        lint_store(&products_dir, &schemas.product, ArrayShape::ArrayOnly, &mut report);
    } else {
        let legacy = data_root.join("products.json");
        if legacy.is_file() {
            lint_file(&legacy, &schemas.product, ArrayShape::ArrayOnly, &mut report);
        }
    }

    let softwares_dir = data_root.join("softwares");
    if softwares_dir.is_dir() {
        lint_store(&softwares_dir, &schemas.software, ArrayShape::ArrayOrObject, &mut report);
    }

    let shared_dir = data_root.join("shared");
    if shared_dir.is_dir() {
        lint_store(&shared_dir, &schemas.shared, ArrayShape::ArrayOrObject, &mut report);
    }

    report
}

#[derive(Clone, Copy)]
enum ArrayShape {
    ArrayOnly,
    ArrayOrObject,
}

fn lint_store(dir: &Path, schema: &RecordSchema, shape: ArrayShape, report: &mut LintReport) {
    let mut walk_warnings = Vec::new();
    for path in crate::catalog::loader::json_files_under(dir, &mut walk_warnings) {
        lint_file(&path, schema, shape, report);
    }
    for warning in walk_warnings {
        report.finding(&warning.path, warning.reason);
    }
}

fn lint_file(path: &Path, schema: &RecordSchema, shape: ArrayShape, report: &mut LintReport) {
    report.files_checked += 1;
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            report.finding(path, format!("unreadable: {err}"));
            return;
        }
    };
    let value: Value = match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(err) => {
            report.finding(path, format!("invalid JSON: {err}"));
            return;
        }
    };

    match (&value, shape) {
        (Value::Array(items), _) => {
            for (idx, item) in items.iter().enumerate() {
                for violation in schema.violations(item) {
                    report.finding(path, format!("record {idx}: {violation}"));
                }
            }
        }
        (Value::Object(_), ArrayShape::ArrayOrObject) => {
            for violation in schema.violations(&value) {
                report.finding(path, violation);
            }
        }
        (_, ArrayShape::ArrayOnly) => {
            report.finding(path, "expected a JSON array of records");
        }
        (_, ArrayShape::ArrayOrObject) => {
            report.finding(path, "expected a JSON array or object");
        }
    }
}
