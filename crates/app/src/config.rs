//! Command-line configuration for the huffpack binary.
//!
//! Every subcommand works with only its positional paths; the remaining
//! options have defaults. `sample` picks a clock-derived seed when none is
//! given and prints it, so any generated file can be reproduced.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::input_gen::Profile;

/// Default size of generated sample files (1 MiB).
pub const DEFAULT_SAMPLE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Parser)]
#[command(
    name = "huffpack",
    about = "Byte-oriented Huffman file compressor",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log progress at info level (honours RUST_LOG when set)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a summary of the run
    #[arg(long, global = true)]
    pub stats: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress INPUT into OUTPUT
    Compress {
        /// File to compress
        input: PathBuf,
        /// Compressed file to create
        output: PathBuf,
    },

    /// Decompress INPUT into OUTPUT
    Decompress {
        /// File produced by `huffpack compress`
        input: PathBuf,
        /// Restored file to create
        output: PathBuf,
    },

    /// Write seeded sample data to OUTPUT
    Sample {
        /// File to create
        output: PathBuf,

        /// Random seed (default: derived from the clock, then printed)
        #[arg(long)]
        seed: Option<u64>,

        /// Size of the generated file in bytes
        #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
        size: usize,

        /// Byte distribution of the generated data
        #[arg(long, value_enum, default_value_t = Profile::Mixed)]
        profile: Profile,
    },
}

/// Seed to use for `sample`: the explicit one, or one derived from the clock.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress() {
        let cli = Cli::try_parse_from(["huffpack", "compress", "a.txt", "a.huff", "--stats"]).unwrap();
        assert!(cli.stats);
        match cli.command {
            Command::Compress { input, output } => {
                assert_eq!(input, PathBuf::from("a.txt"));
                assert_eq!(output, PathBuf::from("a.huff"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_sample_defaults() {
        let cli = Cli::try_parse_from(["huffpack", "sample", "s.bin"]).unwrap();
        match cli.command {
            Command::Sample { seed, size, profile, .. } => {
                assert_eq!(seed, None);
                assert_eq!(size, DEFAULT_SAMPLE_BYTES);
                assert_eq!(profile, Profile::Mixed);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert!(Cli::try_parse_from(["huffpack", "compress", "only-one"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "decompress", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["huffpack", "-v", "-q", "compress", "a", "b"]).is_err());
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }
}
