//! Product version-info records: the typed form of a Windows `version.h`
//! resource header.
//!
//! A record is inert data. It is authored in the manifest or parsed from a
//! header, checked by lint, and rendered back out; nothing mutates it at
//! runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A `major,minor,patch` resource version triple.
///
/// Distinct from its human-readable string rendering; both the comma form
/// used by `FILEVERSION` statements and the dotted form used by
/// `FileVersion` string values come from this one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTuple {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

/// Error parsing a version tuple from its string or comma form.
#[derive(Debug, thiserror::Error)]
#[error("invalid version {0:?}: expected major.minor.patch")]
pub struct VersionTupleError(pub String);

impl VersionTuple {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Four-component resource form, e.g. `0,1,0,0`.
    pub fn as_quad(&self) -> String {
        format!("{},{},{},0", self.major, self.minor, self.patch)
    }

    /// High half of the binary version field (`dwFileVersionMS`).
    pub fn ms(&self) -> u32 {
        (u32::from(self.major) << 16) | u32::from(self.minor)
    }

    /// Low half of the binary version field (`dwFileVersionLS`).
    pub fn ls(&self) -> u32 {
        u32::from(self.patch) << 16
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTuple {
    type Err = VersionTupleError;

    /// Accepts the dotted form (`"0.1.0"`) and the resource comma form
    /// (`"0,1,0"`). A fourth component is tolerated when it is `0`
    /// (resource quads like `0.1.0.0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let sep = if s.contains(',') { ',' } else { '.' };
        let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
        let numbers: Vec<u16> = parts
            .iter()
            .map(|p| p.parse::<u16>())
            .collect::<Result<_, _>>()
            .map_err(|_| VersionTupleError(s.to_string()))?;
        match numbers.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            [major, minor, patch, 0] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(VersionTupleError(s.to_string())),
        }
    }
}

impl TryFrom<String> for VersionTuple {
    type Error = VersionTupleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VersionTuple> for String {
    fn from(v: VersionTuple) -> Self {
        v.to_string()
    }
}

impl From<&semver::Version> for VersionTuple {
    /// Pre-release and build metadata have no resource representation and
    /// are dropped.
    fn from(v: &semver::Version) -> Self {
        Self::new(v.major as u16, v.minor as u16, v.patch as u16)
    }
}

/// One product's version-info record.
///
/// Field set matches the resource header table: icon, product name, file and
/// product version tuples, company, internal/original file name, description,
/// copyright, organization domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub icon: String,
    pub file_version: VersionTuple,
    pub product_version: VersionTuple,
    pub company: String,
    pub internal_name: String,
    pub description: String,
    pub copyright: String,
    pub original_file_name: String,
    pub domain: String,
}

impl ProductInfo {
    /// New record with the executable names derived from the product name,
    /// so the name/executable consistency rules hold by construction.
    pub fn new(name: &str, version: VersionTuple) -> Self {
        let exe = format!("{}.exe", name.to_lowercase());
        Self {
            name: name.to_string(),
            icon: "icon.ico".to_string(),
            file_version: version,
            product_version: version,
            company: String::new(),
            internal_name: exe.clone(),
            description: String::new(),
            copyright: String::new(),
            original_file_name: exe,
            domain: String::new(),
        }
    }

    /// Per-product include-guard symbol, e.g. `BITBOX_VERSION_H`.
    ///
    /// Replaces the shared `VERSION_H` guard the hand-written headers used,
    /// which collides as soon as two products' headers meet in one build
    /// unit. Non-alphanumeric name characters become underscores.
    pub fn guard_symbol(&self) -> String {
        let token: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_VERSION_H", token)
    }

    /// Internal name minus a trailing `.exe`, for comparison against the
    /// product name token.
    pub fn executable_stem(&self) -> &str {
        self.internal_name
            .strip_suffix(".exe")
            .or_else(|| self.internal_name.strip_suffix(".EXE"))
            .unwrap_or(&self.internal_name)
    }
}
