use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};

#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "graphcodec",
    about = "Compact binary codec for sparse-vertex weighted graphs",
    group(ArgGroup::new("mode").required(true).args(["serialize", "deserialize"]))
)]
struct Cli {
    /// Encode a tab-separated edge list into the compact binary format.
    #[arg(short = 's', long)]
    serialize: bool,

    /// Decode a compact binary back into a tab-separated edge list.
    #[arg(short = 'd', long)]
    deserialize: bool,

    /// Input file path.
    #[arg(short = 'i', long, value_name = "PATH")]
    input: PathBuf,

    /// Output file path (truncated if it exists).
    #[arg(short = 'o', long, value_name = "PATH")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), graphcodec::Error> {
    let input = fs::read(&cli.input)?;
    let output = fs::File::create(&cli.output)?;

    if cli.serialize {
        graphcodec::serialize(&input, output)
    } else {
        graphcodec::deserialize(&input, output)
    }
}
