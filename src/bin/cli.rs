//! segkv CLI
//!
//! Command-line harness for a segkv data directory.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use segkv::{Config, Engine, Entry};
use tracing_subscriber::{fmt, EnvFilter};

/// segkv CLI
#[derive(Parser, Debug)]
#[command(name = "segkv-cli")]
#[command(about = "CLI for the segkv single-segment key-value store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./segkv_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a key in the flushed segment
    Get {
        /// The key to get
        key: String,
    },

    /// Print every record in the segment
    Dump,

    /// Interactive session reading commands from stdin
    Shell,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,segkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder().data_dir(&args.data_dir).build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Commands::Get { key } => run_get(&engine, &key),
        Commands::Dump => run_dump(&engine),
        Commands::Shell => run_shell(&engine),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_get(engine: &Engine, key: &str) -> segkv::Result<()> {
    match engine.get(key.as_bytes())? {
        Some(entry) => println!("{}", render(entry.value())),
        None => println!("(not found)"),
    }
    Ok(())
}

fn run_dump(engine: &Engine) -> segkv::Result<()> {
    for entry in engine.segment_entries()? {
        println!("{}\t{}", render(entry.key()), render(entry.value()));
    }
    Ok(())
}

/// Line commands: put K V | get K | scan [FROM|-] [TO|-] | flush | len | quit
fn run_shell(engine: &Engine) -> segkv::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("segkv> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts.as_slice() {
            [] => Ok(()),
            ["quit"] | ["exit"] => return Ok(()),
            ["put", key, value] => engine.upsert(Entry::new(key.to_string(), value.to_string())),
            ["get", key] => run_get(engine, key),
            ["scan", rest @ ..] if rest.len() <= 2 => {
                let from = rest.first().and_then(|b| bound(b));
                let to = rest.get(1).and_then(|b| bound(b));
                for entry in engine.range(from, to) {
                    println!("{}\t{}", render(entry.key()), render(entry.value()));
                }
                Ok(())
            }
            ["flush"] => engine.flush_with_stats().map(|stats| {
                println!("flushed {} entries ({} bytes)", stats.entries, stats.bytes);
            }),
            ["len"] => {
                println!("{}", engine.memtable_len());
                Ok(())
            }
            _ => {
                println!("commands: put K V | get K | scan [FROM|-] [TO|-] | flush | len | quit");
                Ok(())
            }
        };

        // Errors end the command, not the session
        if let Err(e) = outcome {
            tracing::error!("{}", e);
        }
    }
}

/// `-` stands for an open bound
fn bound(arg: &str) -> Option<&[u8]> {
    if arg == "-" {
        None
    } else {
        Some(arg.as_bytes())
    }
}

fn render(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
