//! Frequency Chaos Game Representation (FCGR): fixed-resolution grid counts
//! over CGR points.
//!
//! For a word length `k`, the unit square is partitioned into `2^k × 2^k`
//! half-open cells; each cell corresponds to exactly one possible k-length
//! word, so the per-cell point counts approximate the k-mer frequency
//! spectrum of the originating sequence without enumerating k-mers.
//!
//! # Ordering contract
//!
//! The count vector is emitted column-by-column (x-major) and, within a
//! column, row-by-row (y-minor): the count of the cell
//! `[c/side, (c+1)/side) × [r/side, (r+1)/side)` sits at index
//! `c * side + r`. Downstream consumers index into the vector assuming this
//! correspondence between position and k-mer identity, so it must never be
//! reordered. With the anchor orientation of [`crate::cgr`], the
//! `word_len = 1` vector is the `[A, C, T, G]` nucleotide counts.
//!
//! # Numeric robustness
//!
//! Cell membership is never decided by floating-point equality. Coordinates
//! are scaled by `10^(k+2)`, rounded once to integers, and all boundary
//! tests are exact integer comparisons; `10^(k+2) / 2^k = 100 * 5^k`, so the
//! scaled cell width is itself exact. A point lying precisely on a grid line
//! therefore always lands in the cell whose lower bound it equals, on every
//! platform and every run.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

use log::trace;

use crate::cgr::{Cgr, CgrPoint};

/// Error occurring during an FCGR grid computation.
#[derive(Debug, Clone, PartialEq)]
pub enum FcgrError {
    /// The word length is zero; the grid needs at least one subdivision.
    InvalidWordLength { word_len: u8 },
    /// The coordinate list is empty.
    EmptyCoordinates,
    /// A coordinate lies outside `[0, 1)` (or is NaN).
    CoordinateOutOfRange { index: usize, x: f64, y: f64 },
    /// A raw count vector does not hold `4^k` entries for any `k ≥ 1`.
    InvalidCountVector { len: usize },
    /// The boundary scale factor `10^(k+2)` does not fit the integer type
    /// used for exact boundary comparisons.
    PrecisionOverflow { word_len: u8 },
}

impl Display for FcgrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FcgrError::InvalidWordLength { word_len } => {
                write!(f, "Invalid word length: {} (must be at least 1)", word_len)
            }
            FcgrError::EmptyCoordinates => write!(f, "Empty coordinate list"),
            FcgrError::CoordinateOutOfRange { index, x, y } => {
                write!(
                    f,
                    "Coordinate #{} ({}, {}) outside the unit square [0, 1)",
                    index, x, y
                )
            }
            FcgrError::InvalidCountVector { len } => {
                write!(f, "Count vector of length {} is not 4^k for any k >= 1", len)
            }
            FcgrError::PrecisionOverflow { word_len } => {
                write!(
                    f,
                    "Word length {} needs a boundary scale of 10^{}, which overflows u64",
                    word_len,
                    *word_len as u32 + 2
                )
            }
        }
    }
}

impl Error for FcgrError {}

/// The result of an FCGR grid computation.
pub type FcgrResult<T> = Result<T, FcgrError>;

/// One grid-line marker produced by a boundary walk over sorted, scaled
/// coordinates: the index of the first point at or after the boundary, or
/// `Empty` when no point falls between this boundary and the next. Empty
/// markers keep their slot so that cell identity stays positional.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Boundary {
    Index(usize),
    Empty,
}

/// FCGR count grid of one CGR point set at a fixed word length.
///
/// See the module documentation for the cell ordering contract and the
/// boundary arithmetic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fcgr {
    word_len: u8,
    side: usize,
    counts: Vec<u32>,
}

impl Fcgr {
    /// Computes the FCGR of `points` at word length `word_len`.
    ///
    /// The caller must already have discarded the `word_len - 1` leading CGR
    /// points, whose generating words are shorter than `word_len`
    /// ([`Fcgr::from_cgr`] does this). The resulting counts sum to
    /// `points.len()`.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::CgrPoint;
    /// use fcgr::grid::Fcgr;
    ///
    /// let fcgr = Fcgr::from_points(1, &[CgrPoint::new(0.1, 0.1)]).unwrap();
    /// assert_eq!(fcgr.counts(), &[1, 0, 0, 0]);
    /// ```
    pub fn from_points(word_len: u8, points: &[CgrPoint]) -> FcgrResult<Self> {
        if word_len < 1 {
            return Err(FcgrError::InvalidWordLength { word_len });
        }
        if points.is_empty() {
            return Err(FcgrError::EmptyCoordinates);
        }
        let decimals = 10_u64
            .checked_pow(word_len as u32 + 2)
            .ok_or(FcgrError::PrecisionOverflow { word_len })?;

        let side = 1_usize << word_len;
        // Exact: 10^(k+2) / 2^k == 100 * 5^k.
        let cell_width = decimals / side as u64;

        let (scaled_x, scaled_y) = Self::scale_points(points, decimals)?;

        // Column pass: walk the x-sorted points once, one marker per column.
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_unstable_by_key(|&i| scaled_x[i]);
        let sorted_x: Vec<u64> = order.iter().map(|&i| scaled_x[i]).collect();
        let col_bounds = boundary_walk(&sorted_x, side, cell_width);
        trace!(
            "Column pass over {} points done, {} empty of {} columns",
            points.len(),
            col_bounds.iter().filter(|&&b| b == Boundary::Empty).count(),
            side,
        );

        // Row pass per column, gathering each column's y values through the
        // x argsort mapping; empty columns keep their zero rows untouched.
        let mut counts = vec![0_u32; side * side];
        for col in 0..side {
            let first = match col_bounds[col] {
                Boundary::Index(first) => first,
                Boundary::Empty => continue,
            };
            let end = next_boundary_index(&col_bounds, col + 1);

            let mut col_y: Vec<u64> = order[first..end].iter().map(|&i| scaled_y[i]).collect();
            col_y.sort_unstable();
            let row_bounds = boundary_walk(&col_y, side, cell_width);

            for row in 0..side {
                if let Boundary::Index(i) = row_bounds[row] {
                    let j = next_boundary_index(&row_bounds, row + 1);
                    counts[col * side + row] = (j - i) as u32;
                }
            }
        }

        Ok(Self {
            word_len,
            side,
            counts,
        })
    }

    /// Computes the FCGR of a whole CGR at word length `word_len`, after
    /// discarding the `word_len - 1` leading short-word points.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::Cgr;
    /// use fcgr::grid::Fcgr;
    /// use fcgr::sequence::Sequence;
    ///
    /// let cgr = Cgr::from_sequence(&Sequence::from_text("", "ACTGACTG")).unwrap();
    /// let fcgr = Fcgr::from_cgr(2, &cgr).unwrap();
    /// assert_eq!(fcgr.total(), 7);
    /// ```
    pub fn from_cgr(word_len: u8, cgr: &Cgr) -> FcgrResult<Self> {
        Self::from_points(word_len, cgr.word_points(word_len))
    }

    /// Rebuilds an `Fcgr` from an already-computed count vector, e.g. a row
    /// read back from a persisted count table. The word length is inferred
    /// from the vector length, which must be `4^k` for some `k ≥ 1`.
    pub fn from_counts<T: Into<Vec<u32>>>(counts: T) -> FcgrResult<Self> {
        let counts = counts.into();

        let mut word_len = 0_u8;
        let mut cells = 1_usize;
        while cells < counts.len() {
            cells *= 4;
            word_len += 1;
        }
        if word_len < 1 || cells != counts.len() {
            return Err(FcgrError::InvalidCountVector { len: counts.len() });
        }

        Ok(Self {
            word_len,
            side: 1 << word_len,
            counts,
        })
    }

    fn scale_points(points: &[CgrPoint], decimals: u64) -> FcgrResult<(Vec<u64>, Vec<u64>)> {
        let mut scaled_x = Vec::with_capacity(points.len());
        let mut scaled_y = Vec::with_capacity(points.len());

        for (index, point) in points.iter().enumerate() {
            if !(0.0..1.0).contains(&point.x) || !(0.0..1.0).contains(&point.y) {
                return Err(FcgrError::CoordinateOutOfRange {
                    index,
                    x: point.x,
                    y: point.y,
                });
            }
            scaled_x.push((point.x * decimals as f64).round() as u64);
            scaled_y.push((point.y * decimals as f64).round() as u64);
        }

        Ok((scaled_x, scaled_y))
    }

    /// Returns the word length this grid was computed at.
    #[must_use]
    pub fn word_len(&self) -> u8 {
        self.word_len
    }

    /// Returns the grid resolution (`2^word_len` cells per axis).
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns the number of cells (`4^word_len`).
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.counts.len()
    }

    /// Returns the count vector, in the canonical cell order (see the module
    /// documentation).
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Returns the count of the cell at given column and row.
    ///
    /// # Panics
    /// This function panics if `column` or `row` is not below
    /// [`Fcgr::side`].
    #[must_use]
    pub fn count_at(&self, column: usize, row: usize) -> u32 {
        assert!(column < self.side && row < self.side);

        self.counts[column * self.side + row]
    }

    /// Returns the sum of all cell counts, i.e. the number of binned points.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }

    /// Writes the count vector as a single line of tab-separated integers,
    /// with a trailing tab before the newline.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::CgrPoint;
    /// use fcgr::grid::Fcgr;
    ///
    /// let fcgr = Fcgr::from_points(1, &[CgrPoint::new(0.1, 0.1)]).unwrap();
    /// let mut buf = Vec::new();
    /// fcgr.write_tsv(&mut buf).unwrap();
    /// assert_eq!(String::from_utf8(buf).unwrap(), "1\t0\t0\t0\t\n");
    /// ```
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for count in &self.counts {
            write!(writer, "{}\t", count)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

/// Walks `sorted` (ascending scaled coordinates) once, emitting one marker
/// per cell boundary plus a final one-past-the-end index sentinel. A cell's
/// marker is the index of its first point, or `Empty` when no point falls in
/// `[start, start + cell_width)`; the last cell is unbounded above, so a
/// point rounding up to the final grid edge still lands there.
fn boundary_walk(sorted: &[u64], side: usize, cell_width: u64) -> Vec<Boundary> {
    let mut bounds = Vec::with_capacity(side + 1);
    let mut idx = 0;

    for cell in 0..side {
        let start = cell as u64 * cell_width;
        while idx < sorted.len() && sorted[idx] < start {
            idx += 1;
        }

        let in_cell =
            idx < sorted.len() && (cell == side - 1 || sorted[idx] < start + cell_width);
        bounds.push(if in_cell {
            Boundary::Index(idx)
        } else {
            Boundary::Empty
        });
    }
    bounds.push(Boundary::Index(sorted.len()));

    bounds
}

/// Returns the index carried by the first non-empty marker at or after
/// `from`. The trailing sentinel guarantees one exists, so cell counts are
/// differences of consecutive non-empty markers and empty cells in between
/// contribute nothing.
fn next_boundary_index(bounds: &[Boundary], from: usize) -> usize {
    bounds[from..]
        .iter()
        .find_map(|bound| match bound {
            Boundary::Index(index) => Some(*index),
            Boundary::Empty => None,
        })
        .expect("boundary list ends with an index sentinel")
}
