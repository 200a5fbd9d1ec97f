//! OxiFloat CLI - The Oxidized Float Squeezer
//!
//! Error-bounded compression for raw little-endian f32 files.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_info};

#[derive(Parser)]
#[command(name = "oxifloat")]
#[command(
    author,
    version,
    about = "The Oxidized Float Squeezer - error-bounded f32 compression"
)]
#[command(long_about = "
OxiFloat compresses dense arrays of 32-bit floats with a user-chosen error
bound: every reconstructed element differs from the original by at most the
quantization step epsilon. Input and output float files are raw
little-endian f32, with no container.

Examples:
  oxifloat compress samples.f32 samples.oxf --epsilon 0.001
  oxifloat compress samples.f32 samples.oxf --epsilon 0.5 --store
  oxifloat decompress samples.oxf restored.f32
  oxifloat info samples.oxf
  oxifloat info samples.oxf --json
  cat samples.f32 | oxifloat compress - - --epsilon 0.01 > samples.oxf
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a raw f32 file
    #[command(alias = "c")]
    Compress {
        /// Input file of raw little-endian f32 values (use "-" for stdin)
        input: String,

        /// Output file (use "-" for stdout)
        output: String,

        /// Quantization step: the per-element error bound
        #[arg(short, long)]
        epsilon: f32,

        /// Skip the entropy stage and store the framed stream as-is
        #[arg(long)]
        store: bool,

        /// Show compression statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress back to a raw f32 file
    #[command(alias = "d")]
    Decompress {
        /// Compressed input file (use "-" for stdin)
        input: String,

        /// Output file of raw little-endian f32 values (use "-" for stdout)
        output: String,

        /// Show stream statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show header information for a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed input file (use "-" for stdin)
        input: String,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            epsilon,
            store,
            verbose,
        } => cmd_compress(&input, &output, epsilon, store, verbose),
        Commands::Decompress {
            input,
            output,
            verbose,
        } => cmd_decompress(&input, &output, verbose),
        Commands::Info { input, json } => cmd_info(&input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
