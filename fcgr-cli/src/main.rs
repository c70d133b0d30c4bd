#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use human_panic::setup_panic;

use crate::logging::init_logging;
use crate::opts::output_writer;

mod cli;
mod cmd;
mod logging;
mod opts;

fn main() -> anyhow::Result<()> {
    setup_panic!();

    let cli: Cli = Cli::parse();

    init_logging(cli.verbose.log_level_filter()).expect("Could not initialize logging");

    match &cli.command {
        Commands::Compute {
            input,
            word_length,
            output,
        } => {
            let output = output_writer(output)?;

            cmd::compute::compute(input, *word_length, output)
                .context("Failed to compute the FCGR of given CGR file")?;
        }
        Commands::Ratios {
            directory,
            window_size,
            output,
        } => {
            let output = output_writer(output)?;

            cmd::ratios::ratios(directory, *window_size, output)
                .context("Failed to compute nucleotide ratios for given CGR directory")?;
        }
        Commands::Centers {
            matrix,
            indices,
            output,
        } => {
            let output = output_writer(output)?;

            cmd::centers::centers(matrix, indices, output)
                .context("Failed to extract center rows from given FCGR matrix")?;
        }
    }

    Ok(())
}
