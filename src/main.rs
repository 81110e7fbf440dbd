//! Quotebook MCP Server - Main Entry Point
//!
//! This is the main entry point for the quote MCP server application.
//! The actual implementation is in the `quotebook_mcp` library.

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use quotebook_mcp::{Config, QuoteServerHandler, logging};
use std::path::PathBuf;

/// Quotebook MCP Server - categorized quotes with remote sync via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the stored quotes and the remembered category
    data_dir: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable syncing with the remote quote source
    #[arg(long)]
    no_sync: bool,

    /// Seconds between sync cycles (overrides the config file)
    #[arg(long)]
    sync_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.no_sync {
        config.sync.enabled = false;
    }
    if let Some(secs) = args.sync_interval {
        if secs == 0 {
            bail!("--sync-interval must be greater than zero");
        }
        config.sync.interval_secs = secs;
    }

    logging::init_tracing(&config.logging.level);

    let mut handler = QuoteServerHandler::open(&args.data_dir, &config)?;
    handler.start_sync();
    serve_stdio(handler).await?;
    Ok(())
}
