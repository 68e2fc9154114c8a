//! MotoLedger CLI
//!
//! Command-line tool for invoking MotoLedger operations against a
//! snapshot-file ledger.
//!
//! # Commands
//!
//! - `query` - Print one record
//! - `init` - Seed the sample records
//! - `create` - Create a record
//! - `list` - Scan records by key range
//! - `transfer` - Change a record's owner
//! - `invoke` - Invoke any operation by wire name

mod commands;

use clap::{Parser, Subcommand};
use commands::Invocation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MotoLedger vehicle record tool.
#[derive(Parser)]
#[command(name = "motoledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ledger snapshot file
    #[arg(global = true, short, long)]
    store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(global = true, long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the record stored at a key
    Query {
        /// Record key
        key: String,
    },

    /// Seed the ledger with the sample records
    Init,

    /// Create a record
    Create {
        /// Record key
        key: String,
        /// Manufacturer
        make: String,
        /// Model name
        model: String,
        /// Paint color
        color: String,
        /// Vehicle identification number
        vin: String,
        /// Engine displacement
        engine_cc: String,
        /// Initial owner
        owner: String,
    },

    /// Scan records by key range
    List {
        /// Inclusive start key (defaults to the configured range)
        #[arg(long)]
        start: Option<String>,

        /// Exclusive end key (defaults to the configured range)
        #[arg(long)]
        end: Option<String>,
    },

    /// Change a record's owner
    Transfer {
        /// Record key
        key: String,
        /// New owner
        owner: String,
    },

    /// Invoke an operation by wire name
    Invoke {
        /// Operation name, e.g. `queryAllRecords`
        operation: String,
        /// Positional arguments
        args: Vec<String>,
    },

    /// Show version information
    Version,
}

impl Commands {
    fn into_invocation(self) -> Option<Invocation> {
        let invocation = match self {
            Commands::Query { key } => Invocation::new("queryRecord", vec![key]),
            Commands::Init => Invocation::new("initLedger", Vec::new()),
            Commands::Create {
                key,
                make,
                model,
                color,
                vin,
                engine_cc,
                owner,
            } => Invocation::new(
                "createRecord",
                vec![key, make, model, color, vin, engine_cc, owner],
            ),
            Commands::List { start, end } => Invocation::list(start, end),
            Commands::Transfer { key, owner } => Invocation::new("transferOwner", vec![key, owner]),
            Commands::Invoke { operation, args } => Invocation::new(operation, args),
            Commands::Version => return None,
        };
        Some(invocation)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(invocation) = cli.command.into_invocation() else {
        println!("MotoLedger CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("MotoLedger Core v{}", motoledger_core::VERSION);
        return Ok(());
    };

    let path = cli.store.ok_or("Ledger store path required (--store)")?;
    let output = commands::run(&path, &invocation, cli.pretty)?;
    println!("{output}");

    Ok(())
}
