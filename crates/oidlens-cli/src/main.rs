//! oidlens CLI - decode object identifiers and timestamp tokens found in text.

use clap::{Parser, Subcommand};
use oidlens_codec::DisplayZone;

mod commands;
mod input;
mod logging;
mod output;

use commands::{hover, objectid, scan, timestamp};

#[derive(Parser)]
#[command(name = "oidlens")]
#[command(about = "Decode 24-hex object identifiers and timestamp tokens")]
struct Cli {
    /// Zone for local times: `local`, `Z`, or `±HH:MM`
    #[arg(
        long,
        global = true,
        env = "OIDLENS_UTC_OFFSET",
        default_value = "local",
        allow_hyphen_values = true
    )]
    utc_offset: DisplayZone,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a 24-hex object identifier
    Objectid {
        /// Identifier to decode
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a timestamp or ISO-8601 date and show its object identifier prefix
    Timestamp {
        /// Seconds, milliseconds, underscore-grouped digits, or ISO-8601 text
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every object identifier in a file
    Scan {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Output one JSON object per match
        #[arg(long)]
        json: bool,
    },
    /// Show the hover text for the token at a byte offset
    Hover {
        /// Input file
        file: String,
        /// Byte offset of the cursor
        #[arg(long)]
        offset: usize,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let zone = cli.utc_offset;
    tracing::debug!(%zone, "display zone");

    let result = match cli.command {
        Commands::Objectid { value, json } => objectid::run(value, json, zone),
        Commands::Timestamp { value, json } => timestamp::run(value, json, zone),
        Commands::Scan { input, json } => scan::run(input, json, zone),
        Commands::Hover { file, offset } => hover::run(file, offset, zone),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
