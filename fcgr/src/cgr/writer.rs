use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::cgr::Cgr;

#[derive(Debug)]
pub enum CgrWriterError {
    IoError(std::io::Error),
}

impl From<std::io::Error> for CgrWriterError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for CgrWriterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CgrWriterError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for CgrWriterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CgrWriterError::IoError(e) => Some(e),
        }
    }
}

type CgrWriteResult<T> = Result<T, CgrWriterError>;

/// Writer for CGR coordinate files, producing the `x y` per-line format
/// accepted by [`crate::cgr::reader::CgrReader`].
#[derive(Debug)]
pub struct CgrWriter<W> {
    writer: W,
}

impl<W: Write> CgrWriter<W> {
    /// Creates new `CgrWriter` instance.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::writer::CgrWriter;
    ///
    /// let buf = Vec::new();
    /// let _writer = CgrWriter::new(buf);
    /// ```
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes all points of `cgr`, one pair per line.
    pub fn write_cgr(&mut self, cgr: &Cgr) -> CgrWriteResult<()> {
        for point in cgr.points() {
            writeln!(self.writer, "{} {}", point.x, point.y)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cgr::reader::CgrReader;
    use crate::cgr::writer::CgrWriter;
    use crate::cgr::Cgr;
    use crate::sequence::Sequence;

    #[test]
    fn test_write_simple_cgr() {
        let cgr = Cgr::from_sequence(&Sequence::from_text("", "AG")).unwrap();
        let mut buf = Vec::new();

        CgrWriter::new(&mut buf).write_cgr(&cgr).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "0.25 0.25\n0.625 0.625\n");
    }

    #[test]
    fn test_written_file_reads_back() {
        let cgr = Cgr::from_sequence(&Sequence::from_text("", "GATTACA")).unwrap();
        let mut buf = Vec::new();

        CgrWriter::new(&mut buf).write_cgr(&cgr).unwrap();
        let read_back = CgrReader::new(buf.as_slice()).read_cgr().unwrap();

        assert_eq!(read_back, cgr);
    }
}
