//! Nucleotide ratio derivation from `word_len = 1` FCGR counts.
//!
//! At word length 1 the FCGR count vector is the `[A, C, T, G]` nucleotide
//! counts of a window; the ratios divide those by the window length (not by
//! the count sum, which equals the window length only when every position
//! produced a well-formed coordinate) and express them as percentages,
//! together with the `AG`, `CG` and `TG` pair percentages used as genomic
//! signature features.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::grid::Fcgr;

/// Error occurring during nucleotide ratio derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatiosError {
    /// The FCGR was not computed at word length 1.
    WrongWordLength { word_len: u8 },
    /// The window size is zero.
    EmptyWindow,
}

impl Display for RatiosError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RatiosError::WrongWordLength { word_len } => {
                write!(
                    f,
                    "Nucleotide ratios need a word length 1 grid, got {}",
                    word_len
                )
            }
            RatiosError::EmptyWindow => write!(f, "Window size must be positive"),
        }
    }
}

impl Error for RatiosError {}

/// Per-window nucleotide percentages, the `k = 1` genomic signature.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct NucleotideRatios {
    pub a: f64,
    pub c: f64,
    pub t: f64,
    pub g: f64,
    pub ag: f64,
    pub cg: f64,
    pub tg: f64,
}

impl NucleotideRatios {
    /// Derives the ratios from a `word_len = 1` FCGR and the window length
    /// the counts were taken over.
    ///
    /// # Examples
    /// ```
    /// use fcgr::cgr::Cgr;
    /// use fcgr::grid::Fcgr;
    /// use fcgr::ratios::NucleotideRatios;
    /// use fcgr::sequence::Sequence;
    ///
    /// let cgr = Cgr::from_sequence(&Sequence::from_text("", "AACG")).unwrap();
    /// let fcgr = Fcgr::from_cgr(1, &cgr).unwrap();
    ///
    /// let ratios = NucleotideRatios::from_fcgr(&fcgr, 4).unwrap();
    /// assert_eq!(ratios.a, 50.0);
    /// assert_eq!(ratios.cg, 50.0);
    /// ```
    pub fn from_fcgr(fcgr: &Fcgr, window_size: usize) -> Result<Self, RatiosError> {
        if fcgr.word_len() != 1 {
            return Err(RatiosError::WrongWordLength {
                word_len: fcgr.word_len(),
            });
        }
        if window_size == 0 {
            return Err(RatiosError::EmptyWindow);
        }

        let counts = fcgr.counts();
        let (n_a, n_c, n_t, n_g) = (counts[0], counts[1], counts[2], counts[3]);
        let percent = |count: u32| count as f64 / window_size as f64 * 100.0;

        Ok(Self {
            a: percent(n_a),
            c: percent(n_c),
            t: percent(n_t),
            g: percent(n_g),
            ag: percent(n_a + n_g),
            cg: percent(n_c + n_g),
            tg: percent(n_t + n_g),
        })
    }

    /// Returns the ratios in the canonical table column order
    /// (`A C T G AG CG TG`).
    #[must_use]
    pub fn as_columns(&self) -> [f64; 7] {
        [self.a, self.c, self.t, self.g, self.ag, self.cg, self.tg]
    }

    /// The table column headers matching [`NucleotideRatios::as_columns`].
    pub const COLUMN_HEADERS: [&'static str; 7] = ["A", "C", "T", "G", "AG", "CG", "TG"];
}

impl Display for NucleotideRatios {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A={:.2}% C={:.2}% T={:.2}% G={:.2}% AG={:.2}% CG={:.2}% TG={:.2}%",
            self.a, self.c, self.t, self.g, self.ag, self.cg, self.tg
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::cgr::CgrPoint;
    use crate::grid::Fcgr;
    use crate::ratios::{NucleotideRatios, RatiosError};

    fn fcgr_with_counts(n_a: u32, n_c: u32, n_t: u32, n_g: u32) -> Fcgr {
        let mut points = Vec::new();
        points.extend(vec![CgrPoint::new(0.25, 0.25); n_a as usize]);
        points.extend(vec![CgrPoint::new(0.25, 0.75); n_c as usize]);
        points.extend(vec![CgrPoint::new(0.75, 0.25); n_t as usize]);
        points.extend(vec![CgrPoint::new(0.75, 0.75); n_g as usize]);

        let fcgr = Fcgr::from_points(1, &points).unwrap();
        assert_eq!(fcgr.counts(), &[n_a, n_c, n_t, n_g]);
        fcgr
    }

    #[test]
    fn test_ratios_for_100_window() {
        let fcgr = fcgr_with_counts(30, 20, 25, 25);

        let ratios = NucleotideRatios::from_fcgr(&fcgr, 100).unwrap();

        assert_relative_eq!(ratios.a, 30.0);
        assert_relative_eq!(ratios.c, 20.0);
        assert_relative_eq!(ratios.t, 25.0);
        assert_relative_eq!(ratios.g, 25.0);
        assert_relative_eq!(ratios.ag, 55.0);
        assert_relative_eq!(ratios.cg, 45.0);
        assert_relative_eq!(ratios.tg, 50.0);
    }

    #[test]
    fn test_columns_match_headers() {
        let fcgr = fcgr_with_counts(1, 2, 3, 4);

        let ratios = NucleotideRatios::from_fcgr(&fcgr, 10).unwrap();

        assert_eq!(NucleotideRatios::COLUMN_HEADERS.len(), 7);
        assert_eq!(
            ratios.as_columns(),
            [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]
        );
    }

    #[test]
    fn test_wrong_word_length_rejected() {
        let fcgr = Fcgr::from_points(2, &[CgrPoint::new(0.1, 0.1)]).unwrap();

        let result = NucleotideRatios::from_fcgr(&fcgr, 10);

        assert_eq!(result, Err(RatiosError::WrongWordLength { word_len: 2 }));
    }

    #[test]
    fn test_empty_window_rejected() {
        let fcgr = fcgr_with_counts(1, 0, 0, 0);

        let result = NucleotideRatios::from_fcgr(&fcgr, 0);

        assert_eq!(result, Err(RatiosError::EmptyWindow));
    }
}
