//! Flagcrawl main entry point
//!
//! This is the command-line interface for the flagcrawl flag hunter.

use anyhow::Context;
use clap::Parser;
use flagcrawl::config::Credentials;
use flagcrawl::{Crawler, TlsTransport};
use tracing_subscriber::EnvFilter;

/// Flagcrawl: an authenticated single-site flag hunter
///
/// Flagcrawl logs into the target application, walks its pages breadth-first
/// within one path prefix, and prints every secret flag it finds.
#[derive(Parser, Debug)]
#[command(name = "flagcrawl")]
#[command(version = "1.0.0")]
#[command(about = "An authenticated single-site flag hunter", long_about = None)]
struct Cli {
    /// Account username
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Account password
    #[arg(value_name = "PASSWORD")]
    password: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let credentials = Credentials {
        username: cli.username,
        password: cli.password,
    };

    let transport = TlsTransport::new().context("failed to initialize TLS")?;
    let mut crawler = Crawler::new(transport, credentials);

    crawler.login().context("login failed")?;
    let flags = crawler.crawl().context("crawl failed")?;

    for flag in &flags {
        println!("{flag}");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the discovered flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("flagcrawl=info,warn"),
            1 => EnvFilter::new("flagcrawl=debug,info"),
            2 => EnvFilter::new("flagcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
