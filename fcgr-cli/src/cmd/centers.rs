use std::fs;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::Context;
use fcgr::matrix::FcgrMatrix;
use log::info;

/// Extracts the cluster-center signature rows from an FCGR matrix file. The
/// index file holds whitespace-separated 1-based row indices, as emitted by
/// the external clustering step.
pub(crate) fn centers(
    matrix_path: &Path,
    indices_path: &Path,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let file = File::open(matrix_path)
        .with_context(|| format!("Could not open FCGR matrix file {}", matrix_path.display()))?;
    let matrix = FcgrMatrix::read_tsv(BufReader::new(file))
        .with_context(|| format!("Could not parse FCGR matrix file {}", matrix_path.display()))?;

    let indices = read_indices(indices_path)?;
    info!(
        "Selecting {} center rows out of {}",
        indices.len(),
        matrix.len()
    );

    let centers = matrix
        .select_rows(&indices)
        .context("Could not select the center rows")?;
    centers.write_tsv(&mut output)?;

    Ok(())
}

fn read_indices(path: &Path) -> anyhow::Result<Vec<usize>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read center index file {}", path.display()))?;

    let mut indices = Vec::new();
    for field in text.split_whitespace() {
        let index: usize = field
            .parse()
            .with_context(|| format!("Invalid center index `{}`", field))?;
        let index = index
            .checked_sub(1)
            .context("Center indices are 1-based and must be positive")?;
        indices.push(index);
    }

    Ok(indices)
}
