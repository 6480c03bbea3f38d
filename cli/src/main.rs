//! Tinkar proxy tool
//!
//! Inspects XML proxy fragments and converts status records between their
//! binary and named forms.
//!
//! Usage:
//!   tinkar-proxy fragment '<concept desc="Active state" uuids="[...]"/>'
//!   tinkar-proxy encode-state ACTIVE
//!   tinkar-proxy decode-state 0106414354495645...
//!   tinkar-proxy bindings semantic

use anyhow::Result;
use clap::{Parser, Subcommand};
use tinkar_cli::{bindings, decode_state, encode_state, fragment, render_fragment};
use tinkar_terms::ProxyFactory;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "tinkar-proxy")]
#[command(about = "Inspect Tinkar proxy fragments and status records")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an XML proxy fragment
    Fragment {
        xml: String,

        /// Report problems as alerts instead of failing with the parse error
        #[arg(long)]
        lenient: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the hex binary record of a status
    EncodeState { name: String },
    /// Decode a hex binary record into a status
    DecodeState { record: String },
    /// Print field bindings, for one kind or all of them
    Bindings { kind: Option<String> },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    debug!(command = ?args.command, "running");

    match args.command {
        Command::Fragment { xml, lenient, json } => {
            let summary = fragment(&ProxyFactory::new(), &xml, lenient)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_fragment(&summary));
            }
        }
        Command::EncodeState { name } => println!("{}", encode_state(&name)?),
        Command::DecodeState { record } => println!("{}", decode_state(&record)?),
        Command::Bindings { kind } => print!("{}", bindings(kind.as_deref())?),
    }
    Ok(())
}
