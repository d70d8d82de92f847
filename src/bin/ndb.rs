mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{cmd_inspect, cmd_query, cmd_watch};

#[derive(Parser)]
#[command(name = "ndb")]
#[command(
    about = "Query attribute/value network database (ndb) files",
    long_about = "ndb - Query attribute/value network database files\n\n\
    Reads ndb files (hosts, networks, services, protocols described as attr=value\n\
    tuples), follows the `database` record to chain in other files, and prints\n\
    every record containing a matching tuple.\n\n\
    Examples:\n\
      ndb query sys helix\n\
      ndb query -f /lib/ndb/local udp syslog port\n\
      ndb query tcp '' --json\n\
      ndb inspect -f /lib/ndb/local\n\
      ndb watch sys helix ip"
)]
#[command(version)]
struct Cli {
    /// Database file to open (default: /lib/ndb/local)
    #[arg(short = 'f', long = "file", value_name = "NDBFILE", global = true)]
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the database for records with a matching tuple
    Query {
        /// Attribute to match
        #[arg(value_name = "ATTR")]
        attr: String,

        /// Value to match; empty matches any value
        #[arg(value_name = "VAL")]
        val: String,

        /// Print only the values of this attribute from matching records
        #[arg(value_name = "RATTR")]
        rattr: Option<String>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the files making up a database chain
    Inspect {
        /// Output chain details as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Run a query, then re-run it whenever a database file changes
    Watch {
        /// Attribute to match
        #[arg(value_name = "ATTR")]
        attr: String,

        /// Value to match; empty matches any value
        #[arg(value_name = "VAL")]
        val: String,

        /// Print only the values of this attribute from matching records
        #[arg(value_name = "RATTR")]
        rattr: Option<String>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Query {
            attr,
            val,
            rattr,
            json,
        } => cmd_query(cli.file, attr, val, rattr, json),
        Commands::Inspect { json } => cmd_inspect(cli.file, json),
        Commands::Watch {
            attr,
            val,
            rattr,
            json,
        } => cmd_watch(cli.file, attr, val, rattr, json),
    }
}
