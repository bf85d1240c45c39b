use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use nnue_probe::probe;

#[derive(Parser)]
#[command(name = "nnue_probe")]
#[command(about = "Evaluate a chess position with an NNUE network")]
struct Args {
    /// Position to evaluate, in FEN
    fen: String,

    /// Network file to load
    #[arg(short, long, default_value = "nn-04cf2b4ed1da.nnue")]
    network: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<i32> {
    probe::init(&args.network)
        .with_context(|| format!("failed to load {}", args.network.display()))?;
    let score = probe::evaluate(&args.fen)?;
    Ok(score)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => {
            // --help
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(score) => {
            println!("{score}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
