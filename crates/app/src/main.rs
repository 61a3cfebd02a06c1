mod config;
mod input_gen;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::{resolve_seed, Cli, Command};
use huffpack_core::pipeline::{compress_file, decompress_file};

fn init_tracing(cli: &Cli) {
    // --quiet → off, --verbose → RUST_LOG or info, default → warn.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compress { input, output } => {
            let stats = compress_file(&input, &output).with_context(|| {
                format!("failed to compress {} into {}", input.display(), output.display())
            })?;
            if cli.stats {
                stats.print_summary();
            }
        }

        Command::Decompress { input, output } => {
            let stats = decompress_file(&input, &output).with_context(|| {
                format!("failed to decompress {} into {}", input.display(), output.display())
            })?;
            if cli.stats {
                stats.print_summary();
            }
        }

        Command::Sample {
            output,
            seed,
            size,
            profile,
        } => {
            let seed = resolve_seed(seed);
            println!("seed: {seed}");
            input_gen::write_sample_file(&output, profile, seed, size)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(?profile, size, path = %output.display(), "wrote sample");
        }
    }
    Ok(())
}
