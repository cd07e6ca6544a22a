// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use crate::checker::{VerifierOptions, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use crate::config::AuditConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "seo-guardian",
    version,
    about = "Audit a static website for broken links, orphan pages and SEO basics",
    long_about = "seo-guardian walks the HTML files of a static site, resolves every internal link \
                  against the files on disk, builds the internal link graph and checks external \
                  links over the network. Run it before deploying to catch regressions."
)]
pub struct Cli {
    /// Log debug details (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a site directory
    ///
    /// Example: seo-guardian audit ./public --workers 20
    Audit(AuditArgs),
}

#[derive(clap::Args, Debug)]
pub struct AuditArgs {
    /// Site root containing index.html
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output the report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Number of concurrent external link checks
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Timeout in seconds for each HEAD/GET attempt
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Don't contact the network; external links are only checked for rel attributes
    #[arg(long)]
    pub skip_external: bool,

    /// Extra directory-name fragment to skip (repeatable)
    #[arg(long = "ignore-dir", value_name = "FRAGMENT")]
    pub ignore_dirs: Vec<String>,

    /// Extra file-name fragment to skip (repeatable)
    #[arg(long = "ignore-file", value_name = "FRAGMENT")]
    pub ignore_files: Vec<String>,

    /// Extra external host fragment to never check (repeatable)
    #[arg(long = "deny-domain", value_name = "FRAGMENT")]
    pub deny_domains: Vec<String>,

    /// Exit with code 1 when the score is below this value
    #[arg(long, value_name = "SCORE")]
    pub fail_under: Option<u32>,

    /// How many pages to show in the "most linked" list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

impl AuditArgs {
    pub fn to_config(&self) -> AuditConfig {
        let mut config = AuditConfig::new(&self.root);
        config.policy.dir_fragments.extend(self.ignore_dirs.iter().cloned());
        config.policy.file_fragments.extend(self.ignore_files.iter().cloned());
        config.policy.domain_fragments.extend(self.deny_domains.iter().cloned());
        config.verifier = VerifierOptions {
            workers: self.workers.max(1),
            timeout: Duration::from_secs(self.timeout),
            ..VerifierOptions::default()
        };
        config.skip_external = self.skip_external;
        config.top = self.top;
        config
    }
}
