//! eventio CLI - inspect, check and convert event files.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, convert, dump, list};

#[derive(Parser)]
#[command(name = "eventio")]
#[command(about = "Inspect, check and convert event data files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events across one or more input files
    List {
        /// Input files, read in order
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
        /// Backend for every input (default: detected from the extension)
        #[arg(long)]
        backend: Option<String>,
        /// Treat truncated inputs as ending early instead of failing
        #[arg(long)]
        permissive: bool,
        /// Stop after listing N events (default: unlimited)
        #[arg(long)]
        max_events: Option<u64>,
        /// Only list events holding this collection
        #[arg(long)]
        with_collection: Option<String>,
    },
    /// Print the collections and parameters of one event
    Dump {
        /// Input files, read in order
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Global index of the event
        #[arg(long)]
        event: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-encode all events into a single output file
    Convert {
        /// Input files, read in order
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output file (replaced if it exists)
        #[arg(long)]
        output: String,
        /// Output backend (default: detected from the output extension)
        #[arg(long)]
        backend: Option<String>,
    },
    /// Read every event of every input and report per-file counts
    Check {
        /// Input files
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            inputs,
            json,
            backend,
            permissive,
            max_events,
            with_collection,
        } => list::run(
            inputs,
            json,
            backend,
            permissive,
            max_events,
            with_collection,
        ),
        Commands::Dump {
            inputs,
            event,
            json,
        } => dump::run(inputs, event, json),
        Commands::Convert {
            inputs,
            output,
            backend,
        } => convert::run(inputs, output, backend),
        Commands::Check { inputs, json } => check::run(inputs, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
