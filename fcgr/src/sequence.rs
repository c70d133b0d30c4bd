use std::fmt::{Display, Formatter};

use derive_more::Deref;
use serde::{Deserialize, Serialize};

/// Identifier (title/name) of a nucleotide sequence window, e.g.
/// `chr1_repeat_0`.
#[derive(Deref, Debug, Eq, PartialEq, Hash, Clone, Default, Serialize, Deserialize)]
pub struct SequenceIdentifier(pub String);

impl SequenceIdentifier {
    /// Empty identifier.
    pub const EMPTY: SequenceIdentifier = SequenceIdentifier(String::new());

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this identifier as string.
    #[inline]
    #[must_use]
    pub fn str(&self) -> &str {
        &self.0
    }
}

impl Display for SequenceIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SequenceIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SequenceIdentifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Nucleic acid.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Acid {
    #[default]
    /// Invalid nucleic acid.
    N,
    /// Adenine.
    A,
    /// Cytosine.
    C,
    /// Thymine.
    T,
    /// Guanine.
    G,
}

impl Acid {
    /// Converts an ASCII byte (either case) to an `Acid`. Any byte that is
    /// not one of `ACTGactg` maps to [`Acid::N`].
    ///
    /// # Examples
    /// ```
    /// use fcgr::sequence::Acid;
    ///
    /// assert_eq!(Acid::from_byte(b'a'), Acid::A);
    /// assert_eq!(Acid::from_byte(b'G'), Acid::G);
    /// assert_eq!(Acid::from_byte(b'x'), Acid::N);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'A' | b'a' => Acid::A,
            b'C' | b'c' => Acid::C,
            b'T' | b't' => Acid::T,
            b'G' | b'g' => Acid::G,
            _ => Acid::N,
        }
    }
}

impl Display for Acid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Acid::A => 'A',
            Acid::C => 'C',
            Acid::G => 'G',
            Acid::T => 'T',
            Acid::N => 'N',
        };

        write!(f, "{}", str)
    }
}

/// Nucleotide sequence for a single genomic window.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Sequence {
    identifier: SequenceIdentifier,
    acids: Vec<Acid>,
}

impl Sequence {
    /// Creates a new instance of `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use fcgr::sequence::{Acid, Sequence};
    ///
    /// let seq = Sequence::new("SEQ_1", [Acid::A, Acid::C, Acid::G]);
    /// assert_eq!(seq.len(), 3);
    /// ```
    #[must_use]
    pub fn new<T, U>(identifier: T, acids: U) -> Self
    where
        T: Into<SequenceIdentifier>,
        U: Into<Vec<Acid>>,
    {
        Self {
            identifier: identifier.into(),
            acids: acids.into(),
        }
    }

    /// Creates a `Sequence` from ASCII text, mapping any unknown character
    /// to [`Acid::N`].
    ///
    /// # Examples
    /// ```
    /// use fcgr::sequence::{Acid, Sequence};
    ///
    /// let seq = Sequence::from_text("SEQ_1", "ACgt");
    /// assert_eq!(seq.acids(), &[Acid::A, Acid::C, Acid::G, Acid::T]);
    /// ```
    #[must_use]
    pub fn from_text<T: Into<SequenceIdentifier>>(identifier: T, text: &str) -> Self {
        let acids = text.bytes().map(Acid::from_byte).collect();

        Self {
            identifier: identifier.into(),
            acids,
        }
    }

    /// Returns the identifier of this sequence.
    #[must_use]
    pub fn identifier(&self) -> &SequenceIdentifier {
        &self.identifier
    }

    /// Returns the list of acids of this sequence.
    #[must_use]
    pub fn acids(&self) -> &[Acid] {
        &self.acids
    }

    /// Returns a new instance of `Sequence`, identical as `self`, but with
    /// given identifier.
    #[must_use]
    pub fn with_identifier<T>(self, identifier: T) -> Self
    where
        T: Into<SequenceIdentifier>,
    {
        Self::new(identifier, self.acids)
    }

    /// Consumes this sequence and returns its acids.
    #[must_use]
    pub fn into_acids(self) -> Vec<Acid> {
        self.acids
    }

    /// Returns the length (i.e. number of acids) of the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.acids.len()
    }

    /// Returns `true` if the sequence contains no acids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acids.is_empty()
    }
}
