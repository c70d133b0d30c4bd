use std::fs;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Opens the output sink: the file at `path`, or standard output when no
/// path was given. Missing parent directories are created, so per-species
/// output trees can be written in one go.
pub(crate) fn output_writer(path: &Option<PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        None => Box::new(io::stdout().lock()),
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = File::create(path)
                .with_context(|| format!("Could not create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
    };

    Ok(writer)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Could not create output directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}
