//! Variant positions
//!
//! A [`Position`] is one coordinate of a variant: a plain sequence position, an
//! intronic position relative to the nearest exon boundary, a UTR position, or
//! an amino-acid-qualified protein position.
//!
//! Coordinate tokens are parsed with nom:
//!
//! | Shape          | Example    |
//! |----------------|------------|
//! | simple         | `122`      |
//! | intronic       | `122-6`    |
//! | UTR            | `*33`, `-80` |
//! | UTR + intronic | `*89+67`   |
//! | protein        | `Glu27`    |
//!
//! Positions are totally ordered: 5' UTR positions sort before all other
//! positions, and 3' UTR positions sort after them. The amino acid never takes
//! part in ordering or equality.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, digit1, satisfy},
    combinator::{opt, recognize},
    IResult, Parser,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alphabet::{StandardAlphabet, SymbolTable};
use crate::error::MaveHgvsError;

/// UTR qualifier of a transcript position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utr {
    /// Upstream of the start codon, written `-N`
    FivePrime,
    /// Downstream of the stop codon, written `*N`
    ThreePrime,
}

/// A single variant coordinate
///
/// Nucleotides in the 5' half of an intron have a positive intronic offset and
/// a base position equal to the last base of the upstream exon. Nucleotides in
/// the 3' half have a negative offset and a base position equal to the first
/// base of the downstream exon.
#[derive(Debug, Clone)]
pub struct Position {
    base_position: i64,
    utr: Option<Utr>,
    intronic_offset: Option<i64>,
    amino_acid: Option<String>,
}

impl Position {
    /// Create a simple position
    pub fn new(base_position: i64) -> Self {
        Self {
            base_position,
            utr: None,
            intronic_offset: None,
            amino_acid: None,
        }
    }

    /// Create a protein position such as `Glu27`
    pub fn protein(amino_acid: impl Into<String>, base_position: i64) -> Self {
        Self {
            amino_acid: Some(amino_acid.into()),
            ..Self::new(base_position)
        }
    }

    /// Create a 5' UTR position; `distance` counts upstream from the start codon
    ///
    /// Returns [`MaveHgvsError::MalformedPosition`] unless `distance` is at least 1.
    pub fn five_prime_utr(distance: i64) -> Result<Self, MaveHgvsError> {
        if distance < 1 {
            return Err(MaveHgvsError::MalformedPosition {
                token: format!("-{}", distance),
            });
        }
        Ok(Self {
            utr: Some(Utr::FivePrime),
            ..Self::new(-distance)
        })
    }

    /// Create a 3' UTR position; `distance` counts downstream from the stop codon
    ///
    /// Returns [`MaveHgvsError::MalformedPosition`] unless `distance` is at least 1.
    pub fn three_prime_utr(distance: i64) -> Result<Self, MaveHgvsError> {
        if distance < 1 {
            return Err(MaveHgvsError::MalformedPosition {
                token: format!("*{}", distance),
            });
        }
        Ok(Self {
            utr: Some(Utr::ThreePrime),
            ..Self::new(distance)
        })
    }

    /// Return a copy of this position with an intronic offset
    ///
    /// Protein positions take no offset, and an offset of zero is not a
    /// position; both are [`MaveHgvsError::MalformedPosition`].
    pub fn with_intronic_offset(mut self, offset: i64) -> Result<Self, MaveHgvsError> {
        if offset == 0 || self.is_protein() {
            return Err(MaveHgvsError::MalformedPosition {
                token: format!("{}{:+}", self, offset),
            });
        }
        self.intronic_offset = Some(offset);
        Ok(self)
    }

    /// Parse a coordinate token, validating any amino acid against `symbols`
    pub fn parse_with<S: SymbolTable + ?Sized>(
        token: &str,
        symbols: &S,
    ) -> Result<Self, MaveHgvsError> {
        let malformed = || MaveHgvsError::MalformedPosition {
            token: token.to_string(),
        };

        let raw = match parse_position_token(token) {
            Ok(("", raw)) => raw,
            _ => return Err(malformed()),
        };

        if let Some(aa) = raw.amino_acid {
            if !symbols.is_amino_acid(aa) || raw.utr.is_some() || raw.offset.is_some() {
                return Err(malformed());
            }
        }

        Ok(Self {
            base_position: raw.base,
            utr: raw.utr,
            intronic_offset: raw.offset,
            amino_acid: raw.amino_acid.map(str::to_string),
        })
    }

    /// The numeric position; negative only for 5' UTR positions
    pub fn base_position(&self) -> i64 {
        self.base_position
    }

    /// The UTR qualifier, if any
    pub fn utr(&self) -> Option<Utr> {
        self.utr
    }

    /// The signed distance into the intron, if any
    pub fn intronic_offset(&self) -> Option<i64> {
        self.intronic_offset
    }

    /// The three-letter amino acid code of a protein position
    pub fn amino_acid(&self) -> Option<&str> {
        self.amino_acid.as_deref()
    }

    /// Whether this is a UTR position
    pub fn is_utr(&self) -> bool {
        self.utr.is_some()
    }

    /// Whether this is an intronic position
    pub fn is_intronic(&self) -> bool {
        self.intronic_offset.is_some()
    }

    /// Whether this is a protein position
    pub fn is_protein(&self) -> bool {
        self.amino_acid.is_some()
    }

    /// Whether this position uses the extended (UTR or intronic) notation
    pub fn is_extended(&self) -> bool {
        self.is_utr() || self.is_intronic()
    }

    /// Whether `self` and `other` are immediately adjacent in sequence space
    ///
    /// Two cases are reported as not adjacent because they need sequence length
    /// information that a position does not carry:
    ///
    /// * the last base of a transcript and the first base of its 3' UTR
    /// * the two middle bases of an intron, where numbering switches from
    ///   positive (relative to the 5' exon) to negative (relative to the 3' exon)
    pub fn is_adjacent(&self, other: &Position) -> bool {
        if self.utr == other.utr {
            match (self.intronic_offset, other.intronic_offset) {
                (None, None) => self.base_position.abs_diff(other.base_position) == 1,
                _ if self.base_position != other.base_position => false,
                (Some(a), Some(b)) => a.abs_diff(b) == 1,
                // first/last base of an intron next to its exon boundary
                (Some(offset), None) | (None, Some(offset)) => offset.unsigned_abs() == 1,
            }
        } else {
            // last base of the 5' UTR next to the first coding base
            let crosses_start = matches!(
                (self.utr, other.utr),
                (Some(Utr::FivePrime), None) | (None, Some(Utr::FivePrime))
            );
            crosses_start
                && !self.is_intronic()
                && !other.is_intronic()
                && self.base_position.min(other.base_position) == -1
                && self.base_position.max(other.base_position) == 1
        }
    }

    fn sort_key(&self) -> (u8, i64, i64) {
        let region = match self.utr {
            Some(Utr::FivePrime) => 0,
            None => 1,
            Some(Utr::ThreePrime) => 2,
        };
        // offsets are never zero, so an exonic base sorts between the two intron halves
        (
            region,
            self.base_position,
            self.intronic_offset.unwrap_or(0),
        )
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(aa) = &self.amino_acid {
            write!(f, "{}", aa)?;
        }
        if self.utr == Some(Utr::ThreePrime) {
            write!(f, "*")?;
        }
        write!(f, "{}", self.base_position)?;
        match self.intronic_offset {
            Some(offset) if offset > 0 => write!(f, "+{}", offset),
            Some(offset) => write!(f, "{}", offset),
            None => Ok(()),
        }
    }
}

impl FromStr for Position {
    type Err = MaveHgvsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &StandardAlphabet)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fields of a coordinate token before semantic checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawPosition<'a> {
    amino_acid: Option<&'a str>,
    utr: Option<Utr>,
    base: i64,
    offset: Option<i64>,
}

/// Parse a position number: a positive integer without leading zeros
#[inline]
fn parse_number(input: &str) -> IResult<&str, i64> {
    let (remaining, digits) = digit1.parse(input)?;
    if digits.starts_with('0') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    // Use checked parsing to detect overflow
    let value: i64 = digits.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((remaining, value))
}

/// Parse an intronic offset (+5, -10, etc.)
#[inline]
fn parse_offset(input: &str) -> IResult<&str, i64> {
    let (input, sign) = alt((char('+'), char('-'))).parse(input)?;
    let (input, value) = parse_number(input)?;
    Ok((input, if sign == '-' { -value } else { value }))
}

/// Parse a three-letter amino acid code shape (`Glu`, `Ter`, ...)
#[inline]
fn parse_amino_acid_code(input: &str) -> IResult<&str, &str> {
    recognize((
        satisfy(|c| c.is_ascii_uppercase()),
        satisfy(|c| c.is_ascii_lowercase()),
        satisfy(|c| c.is_ascii_lowercase()),
    ))
    .parse(input)
}

/// Parse a complete coordinate token
fn parse_position_token(input: &str) -> IResult<&str, RawPosition<'_>> {
    let (input, amino_acid) = opt(parse_amino_acid_code).parse(input)?;
    let (input, utr_marker) = opt(alt((char('*'), char('-')))).parse(input)?;
    let (input, number) = parse_number(input)?;
    let (input, offset) = opt(parse_offset).parse(input)?;

    let (utr, base) = match utr_marker {
        Some('*') => (Some(Utr::ThreePrime), number),
        Some(_) => (Some(Utr::FivePrime), -number),
        None => (None, number),
    };

    Ok((
        input,
        RawPosition {
            amino_acid,
            utr,
            base,
            offset,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let p = pos("92380");
        assert_eq!(p.base_position(), 92380);
        assert_eq!(p.utr(), None);
        assert_eq!(p.intronic_offset(), None);
        assert_eq!(p.amino_acid(), None);
        assert!(!p.is_extended());
    }

    #[test]
    fn test_parse_protein() {
        let p = pos("Cys92380");
        assert_eq!(p.base_position(), 92380);
        assert_eq!(p.amino_acid(), Some("Cys"));
        assert!(p.is_protein());
        assert!(!p.is_extended());
    }

    #[test]
    fn test_parse_utr() {
        let p = pos("*8");
        assert_eq!(p.base_position(), 8);
        assert_eq!(p.utr(), Some(Utr::ThreePrime));

        let p = pos("-80");
        assert_eq!(p.base_position(), -80);
        assert_eq!(p.utr(), Some(Utr::FivePrime));
        assert!(p.is_extended());
    }

    #[test]
    fn test_parse_intronic() {
        let p = pos("122-6");
        assert_eq!(p.base_position(), 122);
        assert_eq!(p.intronic_offset(), Some(-6));
        assert!(p.is_intronic());
        assert!(!p.is_utr());

        let p = pos("*73-105");
        assert_eq!(p.base_position(), 73);
        assert_eq!(p.utr(), Some(Utr::ThreePrime));
        assert_eq!(p.intronic_offset(), Some(-105));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for token in [
            "", "0", "05", "+5", "12+", "12+0", "Glu", "glu5", "Xaa5", "Glu*5", "Glu5+1", "5Glu",
            "**5", "1_2",
        ] {
            let err = token.parse::<Position>().unwrap_err();
            assert!(
                matches!(err, MaveHgvsError::MalformedPosition { .. }),
                "{token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("99999999999999999999".parse::<Position>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for token in [
            "8", "92380", "*8", "-80", "122-6", "78+10", "*89+67", "-127+6", "*73-105", "-45-1",
            "Cys234", "Ala9",
        ] {
            assert_eq!(pos(token).to_string(), token);
        }
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Position::five_prime_utr(12).unwrap().to_string(), "-12");
        assert_eq!(Position::three_prime_utr(4).unwrap().to_string(), "*4");
        assert_eq!(
            Position::new(99).with_intronic_offset(5).unwrap().to_string(),
            "99+5"
        );
        assert_eq!(Position::protein("Gly", 18).to_string(), "Gly18");
    }

    #[test]
    fn test_constructors_reject_invalid() {
        assert!(Position::five_prime_utr(0).is_err());
        assert!(Position::five_prime_utr(i64::MIN).is_err());
        assert!(Position::three_prime_utr(-4).is_err());
        assert!(Position::new(99).with_intronic_offset(0).is_err());

        let err = Position::protein("Gly", 18)
            .with_intronic_offset(1)
            .unwrap_err();
        assert_eq!(
            err,
            MaveHgvsError::MalformedPosition {
                token: "Gly18+1".to_string()
            }
        );
    }

    #[test]
    fn test_adjacency_extreme_offset() {
        let deep = Position::new(99).with_intronic_offset(i64::MIN).unwrap();
        assert!(!deep.is_adjacent(&Position::new(99)));
    }

    #[test]
    fn test_equality_ignores_amino_acid() {
        assert_eq!(pos("Pro27"), pos("Glu27"));
        assert_eq!(pos("Pro27"), pos("27"));
        assert_ne!(pos("27"), pos("*27"));
        assert_ne!(pos("27"), pos("27+1"));
    }

    #[test]
    fn test_intron_ordering() {
        assert!(pos("100-12") < pos("100"));
        assert!(pos("100") < pos("100+1"));
        assert!(pos("99+122") < pos("100-12"));
        assert!(pos("-1") < pos("1"));
        assert!(pos("99999") < pos("*1"));
    }

    #[test]
    fn test_adjacency_edges() {
        assert!(pos("-1").is_adjacent(&pos("1")));
        assert!(!pos("-1").is_adjacent(&pos("*1")));
        assert!(!pos("-1+1").is_adjacent(&pos("1")));
        assert!(!pos("99+1").is_adjacent(&pos("100-1")));
        assert!(pos("Ala12").is_adjacent(&pos("Pro13")));
    }
}
