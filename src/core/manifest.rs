//! Product manifest: load, validate, and look up version-info records.
//!
//! Built-in products are loaded from `config/products.json` (embedded at
//! compile time); additional manifests can be loaded from disk.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::core::product::{ProductInfo, VersionTuple};

/// Error loading a product manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid version for product {name:?}: {version:?}")]
    Version { name: String, version: String },
    #[error("Duplicate product name: {0:?}")]
    DuplicateName(String),
}

/// JSON structure on disk. Versions are authored once as a dotted string;
/// the record's file and product version tuples are both derived from it.
/// The executable-name fields may be omitted, in which case both derive
/// from the product name.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: String,
    icon: String,
    version: String,
    company: String,
    #[serde(default)]
    internal_name: Option<String>,
    description: String,
    copyright: String,
    #[serde(default)]
    original_file_name: Option<String>,
    domain: String,
}

fn convert(file: ManifestFile) -> Result<Vec<ProductInfo>, ManifestError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut products = Vec::with_capacity(file.products.len());
    for entry in file.products {
        if !seen.insert(entry.name.to_lowercase()) {
            return Err(ManifestError::DuplicateName(entry.name));
        }
        let version: VersionTuple =
            entry
                .version
                .parse()
                .map_err(|_| ManifestError::Version {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                })?;
        let mut product = ProductInfo::new(&entry.name, version);
        product.icon = entry.icon;
        product.company = entry.company;
        product.description = entry.description;
        product.copyright = entry.copyright;
        product.domain = entry.domain;
        if let Some(internal_name) = entry.internal_name {
            product.internal_name = internal_name;
        }
        if let Some(original_file_name) = entry.original_file_name {
            product.original_file_name = original_file_name;
        }
        products.push(product);
    }
    Ok(products)
}

fn load_builtin_products() -> Vec<ProductInfo> {
    let json = include_str!("../../config/products.json");
    let file: ManifestFile = serde_json::from_str(json).expect("products.json must be valid");
    convert(file).expect("products.json must pass validation")
}

static BUILTIN_PRODUCTS: OnceLock<Vec<ProductInfo>> = OnceLock::new();

/// Returns the built-in product records, loading from the embedded config on
/// first access.
pub fn builtin_products() -> &'static [ProductInfo] {
    BUILTIN_PRODUCTS.get_or_init(load_builtin_products)
}

/// Load a product manifest from disk. Errors on unreadable files, invalid
/// JSON, bad version strings, and duplicate product names.
pub fn load(path: &Path) -> Result<Vec<ProductInfo>, ManifestError> {
    let content = fs::read_to_string(path)?;
    let file: ManifestFile = serde_json::from_str(&content)?;
    convert(file)
}

/// Case-insensitive lookup by product name.
pub fn find<'a>(products: &'a [ProductInfo], name: &str) -> Option<&'a ProductInfo> {
    products.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_products_contains_both_records() {
        let products = builtin_products();
        assert_eq!(products.len(), 2);
        let bitbox = find(products, "bitbox").expect("bitbox record");
        assert_eq!(bitbox.file_version, VersionTuple::new(0, 1, 0));
        assert_eq!(bitbox.internal_name, "bitbox.exe");
        assert_eq!(bitbox.company, "Heng30");
        let rssbox = find(products, "rssbox").expect("rssbox record");
        assert_eq!(rssbox.original_file_name, "rssbox.exe");
    }

    #[test]
    fn builtin_versions_duplicate_into_both_fields() {
        for p in builtin_products() {
            assert_eq!(p.file_version, p.product_version);
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        let products = builtin_products();
        assert!(find(products, "BitBox").is_some());
        assert!(find(products, "nope").is_none());
    }

    #[test]
    fn load_rejects_duplicate_names() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products":[
                {"name":"app","icon":"icon.ico","version":"1.0.0","company":"c",
                 "internal_name":"app.exe","description":"d","copyright":"c",
                 "original_file_name":"app.exe","domain":"https://example.com"},
                {"name":"App","icon":"icon.ico","version":"1.0.0","company":"c",
                 "internal_name":"app.exe","description":"d","copyright":"c",
                 "original_file_name":"app.exe","domain":"https://example.com"}
            ]}"#,
        )
        .unwrap();
        match load(&path) {
            Err(ManifestError::DuplicateName(name)) => assert_eq!(name, "App"),
            other => panic!("expected DuplicateName, got {:?}", other),
        }
    }

    #[test]
    fn load_derives_executable_names_when_omitted() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products":[
                {"name":"Widget","icon":"icon.ico","version":"1.2.3","company":"Acme",
                 "description":"a widget","copyright":"Copyright Acme",
                 "domain":"https://example.com"}
            ]}"#,
        )
        .unwrap();
        let products = load(&path).unwrap();
        assert_eq!(products[0].internal_name, "widget.exe");
        assert_eq!(products[0].original_file_name, "widget.exe");
        assert_eq!(products[0].file_version, VersionTuple::new(1, 2, 3));
    }

    #[test]
    fn load_rejects_bad_version() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"{"products":[
                {"name":"app","icon":"icon.ico","version":"1.0","company":"c",
                 "internal_name":"app.exe","description":"d","copyright":"c",
                 "original_file_name":"app.exe","domain":"https://example.com"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            load(&path),
            Err(ManifestError::Version { .. })
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            load(&dir.path().join("absent.json")),
            Err(ManifestError::Io(_))
        ));
    }
}
