//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  resver list                       List known products
  resver list rss                   Filter products by name or executable
  resver show bitbox                Print one product's record
  resver check win/                 Lint every version header under win/
  resver check --manifest products.json
                                    Lint a product manifest
  resver gen header bitbox          Print a namespaced version.h to stdout
  resver gen rc rssbox -o rssbox.rc Write a VERSIONINFO rc block to a file
  resver completions bash           Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Lint and generate Windows version-resource metadata",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List known products (built-in or from a manifest)
    List {
        /// Filter products by name or executable
        query: Option<String>,
        /// Read products from this manifest instead of the built-in set
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Print one product's record
    Show {
        /// Product name (case-insensitive)
        product: String,
        /// Read products from this manifest instead of the built-in set
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Lint version headers and manifests; exits non-zero on errors
    Check {
        /// Header files or directories to scan for version headers
        paths: Vec<PathBuf>,
        /// Also lint every record in this manifest
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Generate resource-compiler inputs for a product
    Gen {
        /// What to generate
        #[arg(value_enum)]
        target: GenTarget,
        /// Product name (case-insensitive)
        product: String,
        /// Read products from this manifest instead of the built-in set
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GenTarget {
    /// A version.h replacement with a per-product include guard
    Header,
    /// A VERSIONINFO rc script block with the icon statement
    Rc,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
