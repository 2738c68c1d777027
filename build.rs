//! Build script: validates config/products.json at compile time.
//!
//! On Windows targets also embeds resver's own version-info block, the same
//! kind of resource this tool generates for other products.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "products.json"].iter().collect();
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. products.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
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
    #[derive(serde::Deserialize)]
    struct ManifestFile {
        products: Vec<ProductEntry>,
    }
    let manifest: ManifestFile = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "products.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    for product in &manifest.products {
        if product.version.split('.').count() != 3 {
            panic!(
                "products.json: product {:?} has version {:?}, expected major.minor.patch",
                product.name, product.version
            );
        }
    }

    #[cfg(windows)]
    set_win_info();
}

#[cfg(windows)]
fn set_win_info() {
    let version = env!("CARGO_PKG_VERSION");
    winres::WindowsResource::new()
        .set("ProductName", "resver")
        .set("FileDescription", env!("CARGO_PKG_DESCRIPTION"))
        .set("FileVersion", version)
        .set("ProductVersion", version)
        .set("CompanyName", "Heng30")
        .set("InternalName", "resver.exe")
        .set("OriginalFilename", "resver.exe")
        .set(
            "LegalCopyright",
            "Copyright 2023-2033 The Heng30 Company Ltd. All rights reserved.",
        )
        .compile()
        .expect("failed to compile Windows version resource");
}
