//! Consistency checks over version-info records and parsed headers.
//!
//! Nothing in the resource format enforces that the version tuple matches
//! its string rendering, that the two executable-name fields agree, or that
//! two products' headers can coexist in one build unit. These checks make
//! those authoring rules executable.

use std::collections::HashMap;
use std::fmt;

use crate::core::header::{HeaderError, ParsedHeader};
use crate::core::product::{ProductInfo, VersionTuple};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One lint result: which subject, which check, how bad, and a
/// human-readable message.
#[derive(Clone, Debug)]
pub struct Finding {
    pub subject: String,
    pub check: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]: {}",
            self.severity, self.subject, self.check, self.message
        )
    }
}

fn finding(subject: &str, check: &'static str, severity: Severity, message: String) -> Finding {
    Finding {
        subject: subject.to_string(),
        check,
        severity,
        message,
    }
}

/// Checks over one typed record.
pub fn lint_product(product: &ProductInfo) -> Vec<Finding> {
    let mut findings = Vec::new();
    let subject = product.name.as_str();

    if product.file_version != product.product_version {
        findings.push(finding(
            subject,
            "file-product-version-skew",
            Severity::Warning,
            format!(
                "file version {} differs from product version {}",
                product.file_version, product.product_version
            ),
        ));
    }
    if product.internal_name != product.original_file_name {
        findings.push(finding(
            subject,
            "internal-original-mismatch",
            Severity::Error,
            format!(
                "internal name {:?} differs from original file name {:?}",
                product.internal_name, product.original_file_name
            ),
        ));
    }
    if !product.name.eq_ignore_ascii_case(product.executable_stem()) {
        findings.push(finding(
            subject,
            "name-executable-mismatch",
            Severity::Error,
            format!(
                "product name {:?} does not match executable {:?}",
                product.name, product.internal_name
            ),
        ));
    }
    if !product.icon.to_lowercase().ends_with(".ico") {
        findings.push(finding(
            subject,
            "icon-extension",
            Severity::Warning,
            format!("icon path {:?} does not end in .ico", product.icon),
        ));
    }
    if !(product.domain.starts_with("https://") || product.domain.starts_with("http://")) {
        findings.push(finding(
            subject,
            "domain-scheme",
            Severity::Warning,
            format!("organization domain {:?} is not an http(s) URL", product.domain),
        ));
    }
    findings
}

fn check_version_string(
    header: &ParsedHeader,
    subject: &str,
    tuple_key: &str,
    str_key: &str,
    findings: &mut Vec<Finding>,
) {
    let (Some(tuple_raw), Some(rendered)) = (header.get(tuple_key), header.get(str_key)) else {
        return;
    };
    let Ok(tuple) = tuple_raw.parse::<VersionTuple>() else {
        return; // unparseable tuples are conversion errors, not lints
    };
    if tuple.to_string() != rendered {
        findings.push(finding(
            subject,
            "version-string-mismatch",
            Severity::Error,
            format!(
                "{} is {} but {} is {:?}",
                tuple_key, tuple, str_key, rendered
            ),
        ));
    }
}

/// Checks over one parsed header: the string renderings against the tuples,
/// guard presence, and unrecognized keys. Record-level checks run on top of
/// these when the header converts cleanly.
pub fn lint_header(header: &ParsedHeader) -> Vec<Finding> {
    let subject = header
        .get("PRODUCT_NAME")
        .map(str::to_string)
        .or_else(|| {
            header
                .path
                .as_ref()
                .map(|p| p.display().to_string())
        })
        .unwrap_or_else(|| "<input>".to_string());

    let mut findings = Vec::new();
    check_version_string(
        header,
        &subject,
        "FILE_VERSION",
        "FILE_VERSION_STR",
        &mut findings,
    );
    check_version_string(
        header,
        &subject,
        "PRODUCT_VERSION",
        "PRODUCT_VERSION_STR",
        &mut findings,
    );
    if header.guard.is_none() {
        findings.push(finding(
            &subject,
            "missing-guard",
            Severity::Warning,
            "header has no include guard".to_string(),
        ));
    }
    for key in &header.unknown_keys {
        findings.push(finding(
            &subject,
            "unknown-key",
            Severity::Warning,
            format!("unrecognized #define {}", key),
        ));
    }
    // A header that cannot convert is incomplete, not clean; report the
    // conversion failure instead of skipping the record-level checks.
    match header.to_product() {
        Ok(product) => findings.extend(lint_product(&product)),
        Err(e) => {
            let check = match &e {
                HeaderError::BadVersion { .. } => "bad-version",
                _ => "missing-key",
            };
            findings.push(finding(&subject, check, Severity::Error, e.to_string()));
        }
    }
    findings
}

/// One subject of the cross-record checks: where it came from, the guard it
/// declares (headers only), and its record when it converted cleanly.
#[derive(Clone, Debug)]
pub struct LintSubject {
    pub label: String,
    pub guard: Option<String>,
    pub product: Option<ProductInfo>,
}

impl LintSubject {
    pub fn from_header(header: &ParsedHeader) -> Self {
        Self {
            label: header
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<input>".to_string()),
            guard: header.guard.clone(),
            product: header.to_product().ok(),
        }
    }

    pub fn from_product(product: &ProductInfo, label: &str) -> Self {
        Self {
            label: label.to_string(),
            guard: None,
            product: Some(product.clone()),
        }
    }
}

fn duplicates<'a, I>(pairs: I) -> Vec<(String, Vec<&'a str>)>
where
    I: Iterator<Item = (String, &'a str)>,
{
    let mut by_key: HashMap<String, Vec<&'a str>> = HashMap::new();
    for (key, label) in pairs {
        by_key.entry(key).or_default().push(label);
    }
    let mut dups: Vec<_> = by_key
        .into_iter()
        .filter(|(_, labels)| labels.len() > 1)
        .collect();
    dups.sort();
    dups
}

/// Cross-record checks: include-guard collisions, shared executable names,
/// and duplicate product names across everything collected in one run.
pub fn lint_set(subjects: &[LintSubject]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (guard, labels) in duplicates(
        subjects
            .iter()
            .filter_map(|s| s.guard.clone().map(|g| (g, s.label.as_str()))),
    ) {
        findings.push(finding(
            &labels.join(", "),
            "guard-collision",
            Severity::Error,
            format!(
                "{} headers share include guard {}; only one survives per build unit",
                labels.len(),
                guard
            ),
        ));
    }

    for (exe, labels) in duplicates(
        subjects
            .iter()
            .filter_map(|s| s.product.as_ref())
            .map(|p| (p.internal_name.to_lowercase(), p.name.as_str())),
    ) {
        findings.push(finding(
            &labels.join(", "),
            "duplicate-internal-name",
            Severity::Error,
            format!("{} products share executable name {:?}", labels.len(), exe),
        ));
    }

    for (name, labels) in duplicates(
        subjects
            .iter()
            .filter_map(|s| s.product.as_ref())
            .map(|p| (p.name.to_lowercase(), p.name.as_str())),
    ) {
        findings.push(finding(
            &labels.join(", "),
            "duplicate-product-name",
            Severity::Error,
            format!("{} records share product name {:?}", labels.len(), name),
        ));
    }

    findings
}

/// Worst severity present, if any finding exists.
pub fn max_severity(findings: &[Finding]) -> Option<Severity> {
    findings.iter().map(|f| f.severity).max()
}
