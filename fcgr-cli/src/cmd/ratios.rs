use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fcgr::cgr::reader::read_cgr_path;
use fcgr::grid::Fcgr;
use fcgr::ratios::NucleotideRatios;
use log::info;
use rayon::prelude::*;

/// Computes the nucleotide ratio table for a directory of per-window CGR
/// coordinate files, one parallel grid computation per window.
pub(crate) fn ratios(
    directory: &Path,
    window_size: Option<usize>,
    output: impl Write,
) -> anyhow::Result<()> {
    let files = window_files(directory)?;
    if files.is_empty() {
        anyhow::bail!("No CGR coordinate files in {}", directory.display());
    }
    info!(
        "Computing nucleotide ratios for {} windows from {}",
        files.len(),
        directory.display()
    );

    let rows: Vec<(String, NucleotideRatios)> = files
        .par_iter()
        .map(|path| window_ratios(path, window_size))
        .collect::<anyhow::Result<_>>()?;

    write_table(&rows, output)
}

fn window_ratios(path: &Path, window_size: Option<usize>) -> anyhow::Result<(String, NucleotideRatios)> {
    let cgr = read_cgr_path(path)
        .with_context(|| format!("Could not read CGR coordinates from {}", path.display()))?;
    let fcgr = Fcgr::from_cgr(1, &cgr)
        .with_context(|| format!("Could not compute the FCGR grid of {}", path.display()))?;
    let ratios = NucleotideRatios::from_fcgr(&fcgr, window_size.unwrap_or_else(|| cgr.len()))
        .with_context(|| format!("Could not derive ratios for {}", path.display()))?;

    Ok((record_name(path), ratios))
}

/// Lists the coordinate files of `directory` in sampling order: the files
/// carry a numeric window ordinal as their last `_`-separated name part, and
/// the table rows must keep that order.
fn window_files(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Could not list directory {}", directory.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by_key(|path| (window_ordinal(path), path.clone()));

    Ok(files)
}

fn window_ordinal(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    name.rsplit('_').next()?.parse().ok()
}

fn record_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_table(rows: &[(String, NucleotideRatios)], output: impl Write) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(output);

    let mut header = vec!["record"];
    header.extend(NucleotideRatios::COLUMN_HEADERS);
    writer.write_record(&header)?;

    for (record, ratios) in rows {
        let mut fields = vec![record.clone()];
        fields.extend(ratios.as_columns().iter().map(|value| value.to_string()));
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::window_ordinal;

    #[test]
    fn test_window_ordinal() {
        assert_eq!(window_ordinal(Path::new("cgr/hs_repeat_12")), Some(12));
        assert_eq!(window_ordinal(Path::new("cgr/window_3")), Some(3));
        assert_eq!(window_ordinal(Path::new("cgr/no-ordinal")), None);
    }
}
