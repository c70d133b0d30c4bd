//! Chaos Game Representation (CGR) of nucleotide sequences.
//!
//! A CGR encodes a sequence as points in the unit square: starting from the
//! center, each successive acid moves the current point halfway toward that
//! acid's fixed quadrant anchor. The point emitted after position `i` thus
//! encodes the trailing `(i + 1)`-length suffix of the sequence read so far,
//! which is what makes the fixed-resolution grid counts of
//! [`crate::grid::Fcgr`] approximate k-mer frequencies.
//!
//! The anchor orientation is part of the library's ordering contract: with
//! `A → (0, 0)`, `C → (0, 1)`, `T → (1, 0)` and `G → (1, 1)`, the grid's
//! column-major cell order yields counts in `[A, C, T, G]` order at
//! `word_len = 1`.

pub mod reader;
pub mod writer;

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::sequence::{Acid, Sequence};

/// A single CGR coordinate pair, with both values in `[0, 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CgrPoint {
    pub x: f64,
    pub y: f64,
}

impl CgrPoint {
    /// The center of the unit square, where the iterated map starts.
    pub const CENTER: CgrPoint = CgrPoint { x: 0.5, y: 0.5 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point halfway between `self` and the anchor of `acid`.
    ///
    /// # Panics
    /// This function panics if `acid` is [`Acid::N`], which has no quadrant
    /// anchor.
    #[inline]
    #[must_use]
    pub fn toward(&self, acid: Acid) -> Self {
        let (ax, ay) = anchor(acid).expect("no anchor for N");

        Self {
            x: (self.x + ax) / 2.0,
            y: (self.y + ay) / 2.0,
        }
    }
}

impl Display for CgrPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Returns the quadrant anchor of `acid`, or `None` for [`Acid::N`].
#[inline]
#[must_use]
pub fn anchor(acid: Acid) -> Option<(f64, f64)> {
    match acid {
        Acid::A => Some((0.0, 0.0)),
        Acid::C => Some((0.0, 1.0)),
        Acid::T => Some((1.0, 0.0)),
        Acid::G => Some((1.0, 1.0)),
        Acid::N => None,
    }
}

/// Error occurring while generating CGR coordinates.
#[derive(Debug)]
pub enum CgrError {
    /// The sequence is empty, so there is nothing to map.
    EmptySequence,
    /// The sequence contains an acid with no quadrant anchor ([`Acid::N`])
    /// at given position.
    InvalidAcid { position: usize },
}

impl Display for CgrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CgrError::EmptySequence => write!(f, "Cannot compute a CGR of an empty sequence"),
            CgrError::InvalidAcid { position } => {
                write!(f, "Acid with no quadrant anchor (N) at position {}", position)
            }
        }
    }
}

impl Error for CgrError {}

/// The result of a CGR generation operation.
pub type CgrResult<T> = Result<T, CgrError>;

/// The Chaos Game Representation of a single sequence window: one point per
/// sequence position, in generation order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Cgr {
    points: Vec<CgrPoint>,
}

impl Cgr {
    /// Creates a `Cgr` from an already-generated point list, e.g. one read
    /// back from a coordinate file.
    #[must_use]
    pub fn from_points<T: Into<Vec<CgrPoint>>>(points: T) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Generates the CGR of `sequence` by the iterated quadrant map.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::{Cgr, CgrPoint};
    /// use fcgr::sequence::Sequence;
    ///
    /// let cgr = Cgr::from_sequence(&Sequence::from_text("", "AG")).unwrap();
    /// assert_eq!(
    ///     cgr.points(),
    ///     &[CgrPoint::new(0.25, 0.25), CgrPoint::new(0.625, 0.625)]
    /// );
    /// ```
    pub fn from_sequence(sequence: &Sequence) -> CgrResult<Self> {
        if sequence.is_empty() {
            return Err(CgrError::EmptySequence);
        }

        let mut points = Vec::with_capacity(sequence.len());
        let mut current = CgrPoint::CENTER;
        for (position, &acid) in sequence.acids().iter().enumerate() {
            if acid == Acid::N {
                return Err(CgrError::InvalidAcid { position });
            }
            current = current.toward(acid);
            points.push(current);
        }

        Ok(Self { points })
    }

    /// Returns all points of this CGR, in generation order.
    #[must_use]
    pub fn points(&self) -> &[CgrPoint] {
        &self.points
    }

    /// Returns the points whose generating word has length at least
    /// `word_len`, i.e. all but the `word_len - 1` leading points. These are
    /// the points a `word_len`-resolution grid may count; the leading points
    /// encode shorter words and would inflate low-order counts.
    #[must_use]
    pub fn word_points(&self, word_len: u8) -> &[CgrPoint] {
        let skip = (word_len as usize).saturating_sub(1).min(self.points.len());
        &self.points[skip..]
    }

    /// Returns the number of points (= sequence positions) of this CGR.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if this CGR holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::cgr::{anchor, Cgr, CgrError, CgrPoint};
    use crate::sequence::{Acid, Sequence};

    #[test]
    fn test_first_point_is_quadrant_center() {
        for (acid, x, y) in [
            (Acid::A, 0.25, 0.25),
            (Acid::C, 0.25, 0.75),
            (Acid::T, 0.75, 0.25),
            (Acid::G, 0.75, 0.75),
        ] {
            let cgr = Cgr::from_sequence(&Sequence::new("", [acid])).unwrap();
            assert_eq!(cgr.points(), &[CgrPoint::new(x, y)]);
        }
    }

    #[test]
    fn test_points_stay_in_unit_square() {
        let seq = Sequence::from_text("", &"GATTACA".repeat(100));
        let cgr = Cgr::from_sequence(&seq).unwrap();

        assert_eq!(cgr.len(), 700);
        for point in cgr.points() {
            assert!(point.x > 0.0 && point.x < 1.0);
            assert!(point.y > 0.0 && point.y < 1.0);
        }
    }

    #[test]
    fn test_word_points_drops_short_prefixes() {
        let seq = Sequence::from_text("", "ACTGACTG");
        let cgr = Cgr::from_sequence(&seq).unwrap();

        assert_eq!(cgr.word_points(1).len(), 8);
        assert_eq!(cgr.word_points(3).len(), 6);
        assert_eq!(cgr.word_points(3), &cgr.points()[2..]);
        assert!(cgr.word_points(9).is_empty());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let result = Cgr::from_sequence(&Sequence::new("", []));
        assert!(matches!(result, Err(CgrError::EmptySequence)));
    }

    #[test]
    fn test_n_rejected() {
        let result = Cgr::from_sequence(&Sequence::from_text("", "ACNG"));
        assert!(matches!(result, Err(CgrError::InvalidAcid { position: 2 })));
    }

    #[test]
    fn test_anchor_orientation() {
        assert_eq!(anchor(Acid::A), Some((0.0, 0.0)));
        assert_eq!(anchor(Acid::C), Some((0.0, 1.0)));
        assert_eq!(anchor(Acid::T), Some((1.0, 0.0)));
        assert_eq!(anchor(Acid::G), Some((1.0, 1.0)));
        assert_eq!(anchor(Acid::N), None);
    }
}
