use std::io::Write;
use std::path::Path;

use anyhow::Context;
use fcgr::cgr::reader::read_cgr_path;
use fcgr::grid::Fcgr;
use log::info;

pub(crate) fn compute(input: &Path, word_length: u8, mut output: impl Write) -> anyhow::Result<()> {
    let cgr = read_cgr_path(input)
        .with_context(|| format!("Could not read CGR coordinates from {}", input.display()))?;
    info!("Read {} CGR points from {}", cgr.len(), input.display());

    let fcgr = Fcgr::from_cgr(word_length, &cgr).context("Could not compute the FCGR grid")?;
    info!(
        "Binned {} points into {} cells at word length {}",
        fcgr.total(),
        fcgr.num_cells(),
        word_length
    );

    fcgr.write_tsv(&mut output)?;
    output.flush()?;

    Ok(())
}
