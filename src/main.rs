use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cli_exec;

#[derive(Parser)]
#[command(name = "rentdesk")]
#[command(about = "Lease administration for the property management service", long_about = None)]
struct Cli {
    /// Config file (defaults to ./rentdesk.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and change leases
    Leases {
        #[command(subcommand)]
        command: LeaseCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum LeaseCommands {
    /// List leases
    List {
        /// Only leases in this status (e.g. active, expires_soon)
        #[arg(long)]
        status: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the status filters for the current lease set
    Filters {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a draft lease for signing
    Send { lease_id: i64 },

    /// Renew an expired or expiring lease for one year from tomorrow
    Renew { lease_id: i64 },

    /// Amend a lease's bounds or rent
    Amend {
        lease_id: i64,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// New rent in cents
        #[arg(long)]
        rent: Option<i64>,
    },

    /// Terminate a lease
    Terminate { lease_id: i64 },

    /// Create a draft lease
    Add {
        #[arg(long)]
        tenant_id: i64,
        #[arg(long)]
        apartment_id: i64,
        /// Rent in cents
        #[arg(long)]
        rent: i64,
        /// Start date (YYYY-MM-DD, defaults to tomorrow)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD, defaults to one year from today)
        #[arg(long)]
        end: Option<String>,
    },

    /// Print the signed document URL of a lease
    DocumentUrl { lease_id: i64 },

    /// Ask the service to notify administrators about expiring leases
    NotifyExpiring {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rentdesk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    match cli.command {
        Commands::Leases { command } => {
            runtime.block_on(cli_exec::handle_lease_command(cli.config, command))
        }
    }
}
