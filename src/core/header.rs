//! Parsing of `version.h`-style resource headers back into records.
//!
//! The format is a flat list of `#define KEY value` lines wrapped in an
//! include guard. Values are either quoted strings or bare comma tuples,
//! optionally followed by a trailing `//` comment. Parsing is permissive:
//! content-consistency problems (mismatched version strings, shared guards)
//! are left for lint to report, never enforced here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::core::product::{ProductInfo, VersionTuple};

/// The keys a version header is expected to define.
pub const KNOWN_KEYS: &[&str] = &[
    "PRODUCT_ICON",
    "PRODUCT_NAME",
    "FILE_VERSION",
    "FILE_VERSION_STR",
    "PRODUCT_VERSION",
    "PRODUCT_VERSION_STR",
    "COMPANY_NAME",
    "INTERNAL_NAME",
    "FILE_DESCRIPTION",
    "LEGAL_COPYRIGHT",
    "ORIGINAL_FILE_NAME",
    "ORGANIZATION_DOMAIN",
];

/// Error parsing a version header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("Failed to read header: {0}")]
    Io(#[from] std::io::Error),
    #[error("Duplicate #define of {key} in {path}")]
    DuplicateKey { key: String, path: String },
    #[error("{path} does not define {key}")]
    MissingKey { key: String, path: String },
    #[error("Bad value for {key} in {path}: {source}")]
    BadVersion {
        key: String,
        path: String,
        source: crate::core::product::VersionTupleError,
    },
}

/// A parsed header: its include guard, every recognized `#define`, and any
/// keys outside the known set (kept for diagnostics).
#[derive(Clone, Debug, Default)]
pub struct ParsedHeader {
    pub path: Option<PathBuf>,
    pub guard: Option<String>,
    values: BTreeMap<String, String>,
    pub unknown_keys: Vec<String>,
}

fn define_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#define\s+([A-Za-z_]\w*)(?:\s+(.*))?$").unwrap())
}

fn guard_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#ifndef\s+([A-Za-z_]\w*)").unwrap())
}

/// Extract the value part of a define: a quoted string keeps its quoted
/// content as-is, anything else is cut at a trailing `//` comment. Comment
/// markers inside quotes (URLs) are not comments.
fn clean_value(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix('"')
        && let Some(end) = rest.find('"')
    {
        return rest[..end].to_string();
    }
    let bare = raw.split("//").next().unwrap_or("");
    bare.trim().to_string()
}

impl ParsedHeader {
    /// Parse header text. `path` is used for error messages only.
    pub fn parse(text: &str, path: Option<&Path>) -> Result<Self, HeaderError> {
        let path_label = || {
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<input>".to_string())
        };
        let mut header = ParsedHeader {
            path: path.map(Path::to_path_buf),
            ..Default::default()
        };

        for line in text.lines() {
            if header.guard.is_none()
                && let Some(caps) = guard_re().captures(line)
            {
                header.guard = Some(caps[1].to_string());
                continue;
            }
            let Some(caps) = define_re().captures(line) else {
                continue;
            };
            let key = caps[1].to_string();
            // The guard's own value-less #define is not a data key.
            if Some(key.as_str()) == header.guard.as_deref() {
                continue;
            }
            let value = caps
                .get(2)
                .map(|m| clean_value(m.as_str()))
                .unwrap_or_default();
            if !KNOWN_KEYS.contains(&key.as_str()) {
                header.unknown_keys.push(key);
                continue;
            }
            if header.values.insert(key.clone(), value).is_some() {
                return Err(HeaderError::DuplicateKey {
                    key,
                    path: path_label(),
                });
            }
        }
        Ok(header)
    }

    /// Parse a header file from disk.
    pub fn parse_file(path: &Path) -> Result<Self, HeaderError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, Some(path))
    }

    /// Raw value of a known key, if defined.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn path_label(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }

    fn require(&self, key: &str) -> Result<&str, HeaderError> {
        self.get(key).ok_or_else(|| HeaderError::MissingKey {
            key: key.to_string(),
            path: self.path_label(),
        })
    }

    fn require_version(&self, key: &str) -> Result<VersionTuple, HeaderError> {
        self.require(key)?
            .parse()
            .map_err(|source| HeaderError::BadVersion {
                key: key.to_string(),
                path: self.path_label(),
                source,
            })
    }

    /// Convert to a typed record. Fails on missing keys or unparseable
    /// version tuples; the string-rendering fields are not consulted (lint
    /// compares them against the tuples separately).
    pub fn to_product(&self) -> Result<ProductInfo, HeaderError> {
        Ok(ProductInfo {
            name: self.require("PRODUCT_NAME")?.to_string(),
            icon: self.require("PRODUCT_ICON")?.to_string(),
            file_version: self.require_version("FILE_VERSION")?,
            product_version: self.require_version("PRODUCT_VERSION")?,
            company: self.require("COMPANY_NAME")?.to_string(),
            internal_name: self.require("INTERNAL_NAME")?.to_string(),
            description: self.require("FILE_DESCRIPTION")?.to_string(),
            copyright: self.require("LEGAL_COPYRIGHT")?.to_string(),
            original_file_name: self.require("ORIGINAL_FILE_NAME")?.to_string(),
            domain: self.require("ORGANIZATION_DOMAIN")?.to_string(),
        })
    }
}
