//! Command runners: logger init plus one function per subcommand.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use log::{debug, info, warn};

use crate::cli::{self, Args, GenTarget};
use crate::core::header::{HeaderError, ParsedHeader};
use crate::core::lint::{self, Finding, LintSubject, Severity};
use crate::core::manifest::{self, ManifestError};
use crate::core::product::ProductInfo;
use crate::core::render;
use crate::core::util::filter_by_query;

/// Error from a command runner. `main` prints the `Display` form and exits 1.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Manifest(#[from] ManifestError),
    #[error("{0}")]
    Header(#[from] HeaderError),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("Unknown product {0:?} (try `resver list`)")]
    UnknownProduct(String),
}

/// Initialize env_logger from -v/-q flags (RUST_LOG still wins).
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .try_init();
    debug!("{} v{}", crate::core::app::NAME, crate::core::app::VERSION);
}

fn load_products(manifest: Option<&Path>) -> Result<Vec<ProductInfo>, ManifestError> {
    match manifest {
        Some(path) => {
            info!("loading manifest {}", path.display());
            manifest::load(path)
        }
        None => Ok(manifest::builtin_products().to_vec()),
    }
}

fn find_product(products: &[ProductInfo], name: &str) -> Result<ProductInfo, RunError> {
    manifest::find(products, name)
        .cloned()
        .ok_or_else(|| RunError::UnknownProduct(name.to_string()))
}

/// `list`: one line per product, optionally filtered by name/executable.
pub fn run_list(query: Option<&str>, manifest_path: Option<&Path>) -> Result<(), RunError> {
    let products = load_products(manifest_path)?;
    let filtered = filter_by_query(&products, query.unwrap_or(""), |p| {
        (p.name.as_str(), p.internal_name.as_str())
    });
    for product in filtered {
        println!(
            "{:<16} {:<8} {:<24} {}",
            product.name,
            product.file_version.to_string(),
            product.internal_name,
            product.company
        );
    }
    Ok(())
}

/// `show`: every field of one record.
pub fn run_show(name: &str, manifest_path: Option<&Path>) -> Result<(), RunError> {
    let products = load_products(manifest_path)?;
    let p = find_product(&products, name)?;
    println!("name:               {}", p.name);
    println!("icon:               {}", p.icon);
    println!("file version:       {}", p.file_version);
    println!("product version:    {}", p.product_version);
    println!(
        "binary version:     0x{:08x} 0x{:08x}",
        p.file_version.ms(),
        p.file_version.ls()
    );
    println!("company:            {}", p.company);
    println!("internal name:      {}", p.internal_name);
    println!("description:        {}", p.description);
    println!("copyright:          {}", p.copyright);
    println!("original file name: {}", p.original_file_name);
    println!("domain:             {}", p.domain);
    println!("include guard:      {}", p.guard_symbol());
    Ok(())
}

/// True for header files worth parsing when walking a directory.
fn is_version_header(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    name.ends_with(".h") && name.contains("version")
}

fn collect_headers(paths: &[PathBuf]) -> Result<Vec<ParsedHeader>, RunError> {
    let mut headers = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if is_version_header(entry.path()) {
                    debug!("parsing {}", entry.path().display());
                    headers.push(ParsedHeader::parse_file(entry.path())?);
                } else {
                    debug!("skipping {}", entry.path().display());
                }
            }
        } else {
            headers.push(ParsedHeader::parse_file(path)?);
        }
    }
    Ok(headers)
}

/// `check`: lint headers, manifest records, and the cross-record properties.
/// With no inputs at all, lints the built-in product set. Returns the exit
/// code: 1 when any error-severity finding exists (or any finding under
/// `--strict`), 0 otherwise.
pub fn run_check(
    paths: &[PathBuf],
    manifest_path: Option<&Path>,
    strict: bool,
) -> Result<i32, RunError> {
    let mut findings: Vec<Finding> = Vec::new();
    let mut subjects: Vec<LintSubject> = Vec::new();

    let headers = collect_headers(paths)?;
    for header in &headers {
        findings.extend(lint::lint_header(header));
        subjects.push(LintSubject::from_header(header));
    }

    // Default subjects are the built-in records, but only when nothing else
    // was asked for; an empty scan of an explicit path is not a pass on them.
    let records = if manifest_path.is_some() || paths.is_empty() {
        load_products(manifest_path)?
    } else {
        Vec::new()
    };
    for product in &records {
        findings.extend(lint::lint_product(product));
        subjects.push(LintSubject::from_product(product, &product.name));
    }

    findings.extend(lint::lint_set(&subjects));

    for finding in &findings {
        match finding.severity {
            Severity::Error => eprintln!("{}", finding),
            Severity::Warning => warn!("{}", finding),
        }
    }

    let checked = subjects.len();
    let failed = match lint::max_severity(&findings) {
        Some(Severity::Error) => true,
        Some(Severity::Warning) => strict,
        None => false,
    };
    if failed {
        eprintln!("{} subject(s) checked, {} finding(s)", checked, findings.len());
        Ok(1)
    } else {
        println!("{} subject(s) checked, {} finding(s)", checked, findings.len());
        Ok(0)
    }
}

/// `gen`: render a header or rc block for one product, to stdout or a file.
pub fn run_gen(
    target: GenTarget,
    name: &str,
    manifest_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), RunError> {
    let products = load_products(manifest_path)?;
    let product = find_product(&products, name)?;
    let text = match target {
        GenTarget::Header => render::render_header(&product),
        GenTarget::Rc => render::render_rc(&product),
    };
    match output {
        Some(path) => {
            fs::write(path, &text)?;
            info!("wrote {}", path.display());
        }
        None => {
            io::stdout().write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

/// `completions`: write shell completions to stdout.
pub fn run_completions(shell: clap_complete::Shell) {
    let mut cmd = Args::command();
    cli::generate(shell, &mut cmd, crate::core::app::NAME, &mut io::stdout());
}
