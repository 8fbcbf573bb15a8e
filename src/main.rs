/// Main entry point for the MoodBloom MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use moodbloom_engine::{Entitlement, MoodBloomServer, StaticEntitlement};

/// Get the default database path, trying each candidate directory in turn
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".moodbloom");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("moodbloom");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("moodbloom");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".moodbloom");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Make sure the directory is actually writable
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("moodbloom.db"));
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push("moodbloom");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("moodbloom.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the MoodBloom MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Unlock premium rituals, plants, themes and journal tags
    #[arg(long)]
    premium: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("moodbloom_engine={}", log_level))
        .with_writer(std::io::stderr) // stdout carries JSON-RPC
        .init();

    info!("Starting MoodBloom MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let entitlement = if args.premium {
        Entitlement::PREMIUM
    } else {
        Entitlement::FREE
    };
    info!("Premium features {}", if entitlement.is_premium { "enabled" } else { "disabled" });

    let server = MoodBloomServer::new(db_path, Box::new(StaticEntitlement(entitlement))).await?;
    server.run().await?;

    info!("MoodBloom MCP server shutdown complete");
    Ok(())
}
