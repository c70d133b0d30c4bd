//! Per-window FCGR accumulation into a feature matrix.
//!
//! The grid computation itself is stateless and reentrant, so batches of
//! windows are binned in parallel (one task per window) and gathered here
//! into an explicit, orchestrator-owned table: one labelled count row per
//! window, in window order. The table round-trips through the tab-separated
//! text format that downstream distance and clustering tooling consumes.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

use log::debug;
use rayon::prelude::*;

use crate::cgr::Cgr;
use crate::grid::{Fcgr, FcgrError};
use crate::sequence::SequenceIdentifier;

/// Identifier given to rows extracted as cluster centers.
pub const CENTER_IDENTIFIER: &str = "center";

/// Error occurring while building or reading an FCGR matrix.
#[derive(Debug)]
pub enum FcgrMatrixError {
    /// I/O error occurred when reading a matrix file.
    IoError(std::io::Error),
    /// Grid computation failed for given window.
    Window {
        identifier: SequenceIdentifier,
        source: FcgrError,
    },
    /// A row's count vector length differs from the first row's.
    RowLengthMismatch { row: usize },
    /// A matrix file row could not be parsed.
    InvalidRow { row: usize },
    /// A requested row index is outside the matrix.
    RowOutOfBounds { index: usize, rows: usize },
}

impl From<std::io::Error> for FcgrMatrixError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FcgrMatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FcgrMatrixError::IoError(e) => write!(f, "IO error: {}", e),
            FcgrMatrixError::Window { identifier, source } => {
                write!(f, "Window `{}`: {}", identifier, source)
            }
            FcgrMatrixError::RowLengthMismatch { row } => {
                write!(f, "Row {} has a different grid resolution", row)
            }
            FcgrMatrixError::InvalidRow { row } => write!(f, "Cannot parse matrix row {}", row),
            FcgrMatrixError::RowOutOfBounds { index, rows } => {
                write!(f, "Row index {} outside matrix of {} rows", index, rows)
            }
        }
    }
}

impl Error for FcgrMatrixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FcgrMatrixError::IoError(e) => Some(e),
            FcgrMatrixError::Window { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The result of an FCGR matrix operation.
pub type FcgrMatrixResult<T> = Result<T, FcgrMatrixError>;

/// Ordered table of labelled FCGR count rows, one per genomic window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FcgrMatrix {
    rows: Vec<(SequenceIdentifier, Fcgr)>,
}

impl FcgrMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends one window's row. All rows must share one grid resolution.
    pub fn push<T: Into<SequenceIdentifier>>(
        &mut self,
        identifier: T,
        fcgr: Fcgr,
    ) -> FcgrMatrixResult<()> {
        if let Some((_, first)) = self.rows.first() {
            if first.num_cells() != fcgr.num_cells() {
                return Err(FcgrMatrixError::RowLengthMismatch {
                    row: self.rows.len(),
                });
            }
        }
        self.rows.push((identifier.into(), fcgr));

        Ok(())
    }

    /// Computes one FCGR per labelled window, in parallel, preserving the
    /// window order. The first failing window aborts the whole batch.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::Cgr;
    /// use fcgr::matrix::FcgrMatrix;
    /// use fcgr::sequence::Sequence;
    ///
    /// let windows: Vec<_> = ["ACTG", "GGCA"]
    ///     .into_iter()
    ///     .enumerate()
    ///     .map(|(i, text)| {
    ///         let seq = Sequence::from_text(format!("window_{}", i), text);
    ///         (seq.identifier().clone(), Cgr::from_sequence(&seq).unwrap())
    ///     })
    ///     .collect();
    ///
    /// let matrix = FcgrMatrix::from_windows(1, &windows).unwrap();
    /// assert_eq!(matrix.len(), 2);
    /// ```
    pub fn from_windows(
        word_len: u8,
        windows: &[(SequenceIdentifier, Cgr)],
    ) -> FcgrMatrixResult<Self> {
        debug!(
            "Binning {} windows at word length {}",
            windows.len(),
            word_len
        );

        let rows = windows
            .par_iter()
            .map(|(identifier, cgr)| {
                let fcgr =
                    Fcgr::from_cgr(word_len, cgr).map_err(|source| FcgrMatrixError::Window {
                        identifier: identifier.clone(),
                        source,
                    })?;
                Ok((identifier.clone(), fcgr))
            })
            .collect::<FcgrMatrixResult<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Returns the rows of this matrix, in window order.
    #[must_use]
    pub fn rows(&self) -> &[(SequenceIdentifier, Fcgr)] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the matrix holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extracts the rows at given zero-based indices (visited in ascending
    /// order), relabelling each as [`CENTER_IDENTIFIER`]. This is the
    /// cluster-center pull-out: an external clustering step picks the row
    /// indices, this keeps only those signature rows.
    pub fn select_rows(&self, indices: &[usize]) -> FcgrMatrixResult<Self> {
        let mut indices = indices.to_vec();
        indices.sort_unstable();

        let mut rows = Vec::with_capacity(indices.len());
        for index in indices {
            let (_, fcgr) = self.rows.get(index).ok_or(FcgrMatrixError::RowOutOfBounds {
                index,
                rows: self.rows.len(),
            })?;
            rows.push((SequenceIdentifier::from(CENTER_IDENTIFIER), fcgr.clone()));
        }

        Ok(Self { rows })
    }

    /// Writes the matrix as tab-separated text: per row, the identifier
    /// column followed by the count vector, with a trailing tab before the
    /// newline.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> FcgrMatrixResult<()> {
        for (identifier, fcgr) in &self.rows {
            write!(writer, "{}\t", identifier)?;
            fcgr.write_tsv(writer)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Reads a matrix back from its tab-separated text form.
    pub fn read_tsv<R: BufRead>(reader: R) -> FcgrMatrixResult<Self> {
        let mut matrix = Self::new();

        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let identifier = fields
                .next()
                .ok_or(FcgrMatrixError::InvalidRow { row })?
                .to_owned();
            let counts = fields
                .map(str::parse::<u32>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| FcgrMatrixError::InvalidRow { row })?;
            let fcgr = Fcgr::from_counts(counts)
                .map_err(|_| FcgrMatrixError::InvalidRow { row })?;

            matrix
                .push(identifier, fcgr)
                .map_err(|_| FcgrMatrixError::RowLengthMismatch { row })?;
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use crate::cgr::{Cgr, CgrPoint};
    use crate::grid::Fcgr;
    use crate::matrix::{FcgrMatrix, FcgrMatrixError, CENTER_IDENTIFIER};
    use crate::sequence::{Sequence, SequenceIdentifier};

    fn window(identifier: &str, text: &str) -> (SequenceIdentifier, Cgr) {
        let seq = Sequence::from_text(identifier, text);
        (
            seq.identifier().clone(),
            Cgr::from_sequence(&seq).expect("valid test sequence"),
        )
    }

    #[test]
    fn test_from_windows_preserves_order() {
        let windows = vec![
            window("w_0", "AAAA"),
            window("w_1", "CCCC"),
            window("w_2", "TTTT"),
            window("w_3", "GGGG"),
        ];

        let matrix = FcgrMatrix::from_windows(1, &windows).unwrap();

        assert_eq!(matrix.len(), 4);
        let identifiers: Vec<_> = matrix.rows().iter().map(|(id, _)| id.str()).collect();
        assert_eq!(identifiers, ["w_0", "w_1", "w_2", "w_3"]);
        assert_eq!(matrix.rows()[0].1.counts(), &[4, 0, 0, 0]);
        assert_eq!(matrix.rows()[3].1.counts(), &[0, 0, 0, 4]);
    }

    #[test]
    fn test_from_windows_reports_failing_window() {
        let windows = vec![window("good", "ACTG"), (SequenceIdentifier::from("bad"), Cgr::default())];

        let result = FcgrMatrix::from_windows(1, &windows);

        match result {
            Err(FcgrMatrixError::Window { identifier, .. }) => {
                assert_eq!(identifier.str(), "bad");
            }
            other => panic!("Expected a window error, got {:?}", other),
        }
    }

    #[test]
    fn test_push_rejects_mixed_resolutions() {
        let mut matrix = FcgrMatrix::new();
        matrix
            .push("w_0", Fcgr::from_points(1, &[CgrPoint::new(0.1, 0.1)]).unwrap())
            .unwrap();

        let result = matrix.push(
            "w_1",
            Fcgr::from_points(2, &[CgrPoint::new(0.1, 0.1)]).unwrap(),
        );

        assert!(matches!(
            result,
            Err(FcgrMatrixError::RowLengthMismatch { row: 1 })
        ));
    }

    #[test]
    fn test_select_rows_relabels_as_center() {
        let windows = vec![
            window("w_0", "AAAA"),
            window("w_1", "CCCC"),
            window("w_2", "GGGG"),
        ];
        let matrix = FcgrMatrix::from_windows(1, &windows).unwrap();

        let centers = matrix.select_rows(&[2, 0]).unwrap();

        assert_eq!(centers.len(), 2);
        for (identifier, _) in centers.rows() {
            assert_eq!(identifier.str(), CENTER_IDENTIFIER);
        }
        // Ascending index order regardless of input order.
        assert_eq!(centers.rows()[0].1.counts(), &[4, 0, 0, 0]);
        assert_eq!(centers.rows()[1].1.counts(), &[0, 0, 0, 4]);
    }

    #[test]
    fn test_select_rows_out_of_bounds() {
        let matrix = FcgrMatrix::from_windows(1, &[window("w_0", "AAAA")]).unwrap();

        let result = matrix.select_rows(&[3]);

        assert!(matches!(
            result,
            Err(FcgrMatrixError::RowOutOfBounds { index: 3, rows: 1 })
        ));
    }

    #[test]
    fn test_tsv_round_trip() {
        let windows = vec![window("w_0", "ACTGAC"), window("w_1", "GGGGCC")];
        let matrix = FcgrMatrix::from_windows(1, &windows).unwrap();

        let mut buf = Vec::new();
        matrix.write_tsv(&mut buf).unwrap();
        let read_back = FcgrMatrix::read_tsv(buf.as_slice()).unwrap();

        assert_eq!(read_back, matrix);
    }

    #[test]
    fn test_tsv_line_format() {
        let matrix = FcgrMatrix::from_windows(1, &[window("w_0", "AACG")]).unwrap();

        let mut buf = Vec::new();
        matrix.write_tsv(&mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "w_0\t2\t1\t0\t1\t\n");
    }

    #[test]
    fn test_read_tsv_rejects_garbage() {
        let result = FcgrMatrix::read_tsv("w_0\t1\t2\tthree\t4\n".as_bytes());
        assert!(matches!(result, Err(FcgrMatrixError::InvalidRow { row: 0 })));

        let result = FcgrMatrix::read_tsv("w_0\t1\t2\t3\n".as_bytes());
        assert!(matches!(result, Err(FcgrMatrixError::InvalidRow { row: 0 })));
    }
}
