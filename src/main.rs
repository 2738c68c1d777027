//! # resver - Version-Resource Metadata Toolkit
//!
//! Lints and generates the compile-time metadata a platform resource
//! compiler embeds into a Windows executable: `version.h`-style headers and
//! `VERSIONINFO` rc script blocks.
//!
//! ## Subcommands
//! - `list` / `show` - inspect the known product records
//! - `check` - consistency-lint headers and manifests
//! - `gen` - render a header or rc block for a product

mod cli;
mod core;
mod run;

use clap::Parser;

use cli::{Args, Commands};

fn main() {
    let args = Args::parse();
    run::init_logger(&args);

    let result = match &args.command {
        Commands::List { query, manifest } => {
            run::run_list(query.as_deref(), manifest.as_deref()).map(|_| 0)
        }
        Commands::Show { product, manifest } => {
            run::run_show(product, manifest.as_deref()).map(|_| 0)
        }
        Commands::Check {
            paths,
            manifest,
            strict,
        } => run::run_check(paths, manifest.as_deref(), *strict),
        Commands::Gen {
            target,
            product,
            manifest,
            output,
        } => run::run_gen(*target, product, manifest.as_deref(), output.as_deref()).map(|_| 0),
        Commands::Completions { shell } => {
            run::run_completions(*shell);
            Ok(0)
        }
    };

    // Print user-friendly message; exit uses Display not Debug.
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
