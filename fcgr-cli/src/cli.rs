use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the FCGR count vector of a single CGR coordinate file
    Compute {
        /// Input CGR coordinate file (one `x y` pair per line)
        #[clap(value_parser)]
        input: PathBuf,

        /// Word (k-mer) length; the grid resolution is 2^k per axis
        #[clap(short = 'k', long, value_parser = clap::value_parser!(u8).range(1..))]
        word_length: u8,

        /// Output file path; standard output when absent
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Compute per-window nucleotide ratio signatures for a directory of CGR
    /// coordinate files
    Ratios {
        /// Directory holding one CGR coordinate file per window
        #[clap(value_parser)]
        directory: PathBuf,

        /// Window length used as the percentage denominator; defaults to
        /// each window's own point count
        #[clap(short, long, value_parser)]
        window_size: Option<usize>,

        /// Output file path; standard output when absent
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Extract cluster-center rows from an FCGR matrix file
    Centers {
        /// Input FCGR matrix file (one identifier + count row per window)
        #[clap(value_parser)]
        matrix: PathBuf,

        /// File holding whitespace-separated 1-based center row indices
        #[clap(value_parser)]
        indices: PathBuf,

        /// Output file path; standard output when absent
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },
}
