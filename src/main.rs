// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Run the audit and print the report
// 4. Exit with proper code (0 = healthy, 1 = errors found, 2 = fatal error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod audit; // src/audit/ - audit driver, link graph, issue ledger
mod checker; // src/checker/ - extraction, classification, resolution, HTTP checks
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config/ - ignore policy, redirects, site metadata
mod crawl; // src/crawl/ - page discovery on disk
mod error; // src/error.rs - fatal audit errors
mod report; // src/report.rs - human and JSON output

use anyhow::Result;
use clap::Parser;
use cli::{AuditArgs, Cli, Commands};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Fatal preconditions (e.g. no index.html) end up here
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so the report on stdout stays machine-readable.
// RUST_LOG wins over --verbose when it is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = no ERROR issues and score above --fail-under
//   Ok(1) = ERROR issues found or score too low
//   Err   = fatal error
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Audit(args) => handle_audit(&args).await,
    }
}

async fn handle_audit(args: &AuditArgs) -> Result<i32> {
    let mut auditor = audit::Auditor::from_config(args.to_config())?;
    auditor.run().await?;

    report::print_report(&auditor, args.json)?;

    let ledger = auditor.ledger();
    info!(
        "Audit finished with score {}/{} ({} dead link(s), {} orphan page(s))",
        ledger.score(),
        audit::MAX_SCORE,
        ledger.count(audit::IssueKind::DeadLink),
        ledger.count(audit::IssueKind::Orphan)
    );

    let below_threshold = args.fail_under.is_some_and(|min| ledger.score() < min);
    if ledger.has_errors() || below_threshold {
        Ok(1)
    } else {
        Ok(0)
    }
}
