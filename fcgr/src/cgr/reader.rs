use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::cgr::{Cgr, CgrPoint};

/// Error occurring during parsing a CGR coordinate file.
#[derive(Debug)]
pub enum CgrReaderError {
    /// I/O error occurred when reading the coordinate file.
    IoError(std::io::Error),
    /// A line does not hold exactly two whitespace-separated fields.
    InvalidArity { line: usize },
    /// A coordinate field is not a valid real number.
    InvalidNumber { line: usize },
    /// A coordinate lies outside `[0, 1)`.
    CoordinateOutOfRange { line: usize, x: f64, y: f64 },
}

impl From<std::io::Error> for CgrReaderError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for CgrReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CgrReaderError::IoError(e) => write!(f, "IO error: {}", e),
            CgrReaderError::InvalidArity { line } => {
                write!(f, "Line {}: expected two coordinate fields", line)
            }
            CgrReaderError::InvalidNumber { line } => {
                write!(f, "Line {}: coordinate is not a valid number", line)
            }
            CgrReaderError::CoordinateOutOfRange { line, x, y } => {
                write!(f, "Line {}: coordinate ({}, {}) outside [0, 1)", line, x, y)
            }
        }
    }
}

impl Error for CgrReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CgrReaderError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

/// The result of a CGR coordinate file reading operation.
pub type CgrReadResult<T> = Result<T, CgrReaderError>;

/// Reader for CGR coordinate files: one `x y` pair per line, in generation
/// order.
#[derive(Debug)]
pub struct CgrReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> CgrReader<R> {
    /// Creates new `CgrReader` instance.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::reader::CgrReader;
    ///
    /// let data = "0.25 0.25\n0.625 0.625\n";
    /// let _reader = CgrReader::new(data.as_bytes());
    /// ```
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Reads all coordinate pairs up to end of input.
    pub fn read_cgr(&mut self) -> CgrReadResult<Cgr> {
        let mut points = Vec::new();
        let mut buffer = String::new();

        loop {
            buffer.clear();
            let bytes = self.reader.read_line(&mut buffer)?;
            if bytes == 0 {
                break;
            }
            self.line += 1;

            if buffer.trim().is_empty() {
                continue;
            }
            points.push(self.parse_point(&buffer)?);
        }

        Ok(Cgr::from_points(points))
    }

    fn parse_point(&self, line: &str) -> CgrReadResult<CgrPoint> {
        let mut fields = line.split_whitespace();
        let x = fields.next();
        let y = fields.next();

        let (x, y) = match (x, y, fields.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return Err(CgrReaderError::InvalidArity { line: self.line }),
        };

        let x: f64 = x
            .parse()
            .map_err(|_| CgrReaderError::InvalidNumber { line: self.line })?;
        let y: f64 = y
            .parse()
            .map_err(|_| CgrReaderError::InvalidNumber { line: self.line })?;

        if !(0.0..1.0).contains(&x) || !(0.0..1.0).contains(&y) {
            return Err(CgrReaderError::CoordinateOutOfRange { line: self.line, x, y });
        }

        Ok(CgrPoint::new(x, y))
    }
}

/// Reads the CGR coordinate file at `path`.
pub fn read_cgr_path<P: AsRef<Path>>(path: P) -> CgrReadResult<Cgr> {
    let file = File::open(path)?;
    CgrReader::new(BufReader::new(file)).read_cgr()
}

#[cfg(test)]
mod tests {
    use crate::cgr::reader::{CgrReader, CgrReaderError};
    use crate::cgr::CgrPoint;

    #[test]
    fn test_read_simple_file() {
        let data = "0.25 0.25\n0.625 0.625\n";

        let cgr = CgrReader::new(data.as_bytes()).read_cgr().unwrap();

        assert_eq!(
            cgr.points(),
            &[CgrPoint::new(0.25, 0.25), CgrPoint::new(0.625, 0.625)]
        );
    }

    #[test]
    fn test_read_tolerates_blank_lines_and_tabs() {
        let data = "0.25\t0.25\n\n0.625  0.625\n";

        let cgr = CgrReader::new(data.as_bytes()).read_cgr().unwrap();

        assert_eq!(cgr.len(), 2);
    }

    #[test]
    fn test_read_empty_input_yields_empty_cgr() {
        let cgr = CgrReader::new("".as_bytes()).read_cgr().unwrap();
        assert!(cgr.is_empty());
    }

    #[test]
    fn test_wrong_arity() {
        let result = CgrReader::new("0.25\n".as_bytes()).read_cgr();
        assert!(matches!(result, Err(CgrReaderError::InvalidArity { line: 1 })));

        let result = CgrReader::new("0.1 0.2 0.3\n".as_bytes()).read_cgr();
        assert!(matches!(result, Err(CgrReaderError::InvalidArity { line: 1 })));
    }

    #[test]
    fn test_non_numeric_field() {
        let result = CgrReader::new("0.25 zero\n".as_bytes()).read_cgr();
        assert!(matches!(
            result,
            Err(CgrReaderError::InvalidNumber { line: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_coordinate() {
        let result = CgrReader::new("0.25 0.25\n1.0 0.5\n".as_bytes()).read_cgr();
        assert!(matches!(
            result,
            Err(CgrReaderError::CoordinateOutOfRange { line: 2, .. })
        ));
    }
}
