//! Variant object model
//!
//! A [`Variant`] is an optional target identifier, a sequence level
//! ([`Prefix`]), and one or more [`VariantElement`]s. Variants are only built
//! by the parser, so every value of this type has passed the grammar and the
//! allele rules. `Display` produces the canonical string form.
//!
//! # Example
//!
//! ```
//! use mave_hgvs::{parse_variant, EventKind, Prefix};
//!
//! let variant = parse_variant("c.122-6T>A").unwrap();
//! assert_eq!(variant.prefix(), Prefix::Coding);
//! assert_eq!(variant.variant_kinds(), vec![EventKind::Substitution]);
//! assert!(variant.uses_extended_positions());
//! assert_eq!(variant.to_string(), "c.122-6T>A");
//! ```

pub mod allele;
pub mod fields;
pub mod parser;
pub mod target;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MaveHgvsError;
use crate::position::Position;

pub use fields::{Coordinate, EventFields, RangeFields, VariantFields};
pub use parser::{default_parser, parse_variant, parse_variant_with, VariantParser};

/// Sequence level of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `c.`
    Coding,
    /// `n.`
    NonCoding,
    /// `g.`
    Genomic,
    /// `m.`
    Mitochondrial,
    /// `o.`
    OtherGenomic,
    /// `r.`
    Rna,
    /// `p.`
    Protein,
}

impl Prefix {
    /// All prefixes in `c n g m o r p` order
    pub const ALL: [Prefix; 7] = [
        Prefix::Coding,
        Prefix::NonCoding,
        Prefix::Genomic,
        Prefix::Mitochondrial,
        Prefix::OtherGenomic,
        Prefix::Rna,
        Prefix::Protein,
    ];

    /// The single-character prefix
    pub fn as_char(&self) -> char {
        match self {
            Prefix::Coding => 'c',
            Prefix::NonCoding => 'n',
            Prefix::Genomic => 'g',
            Prefix::Mitochondrial => 'm',
            Prefix::OtherGenomic => 'o',
            Prefix::Rna => 'r',
            Prefix::Protein => 'p',
        }
    }

    /// Parse a single-character prefix; case sensitive
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_char() == c)
    }

    /// Whether this is one of the DNA levels (`c n g m o`)
    pub fn is_dna(&self) -> bool {
        !matches!(self, Prefix::Rna | Prefix::Protein)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Kind of a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Equality,
    Substitution,
    /// Protein only
    Frameshift,
    Deletion,
    Duplication,
    Insertion,
    DeletionInsertion,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::Equality,
        EventKind::Substitution,
        EventKind::Frameshift,
        EventKind::Deletion,
        EventKind::Duplication,
        EventKind::Insertion,
        EventKind::DeletionInsertion,
    ];

    /// Short tag used in grammar group names and structured input
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Equality => "equal",
            EventKind::Substitution => "sub",
            EventKind::Frameshift => "fs",
            EventKind::Deletion => "del",
            EventKind::Duplication => "dup",
            EventKind::Insertion => "ins",
            EventKind::DeletionInsertion => "delins",
        }
    }

    /// Look up a kind by its tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Whether this kind exists at the given sequence level
    pub fn applies_to(&self, prefix: Prefix) -> bool {
        *self != EventKind::Frameshift || prefix == Prefix::Protein
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Where an event applies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Single(Position),
    /// Inclusive range; start is strictly before end
    Range(Position, Position),
}

impl Location {
    /// First position of the location
    pub fn start(&self) -> &Position {
        match self {
            Location::Single(p) => p,
            Location::Range(start, _) => start,
        }
    }

    /// Last position of the location
    pub fn end(&self) -> &Position {
        match self {
            Location::Single(p) => p,
            Location::Range(_, end) => end,
        }
    }

    /// The one or two positions written in the variant
    pub fn positions(&self) -> Vec<&Position> {
        match self {
            Location::Single(p) => vec![p],
            Location::Range(start, end) => vec![start, end],
        }
    }

    /// Whether any position uses UTR or intronic notation
    pub fn is_extended(&self) -> bool {
        self.positions().iter().any(|p| p.is_extended())
    }

    /// Whether the two locations share at least one position, endpoints included
    pub fn overlaps(&self, other: &Location) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Single(p) => write!(f, "{}", p),
            Location::Range(start, end) => write!(f, "{}_{}", start, end),
        }
    }
}

/// The literal form of an equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualityMarker {
    /// `=`
    Identical,
    /// `(=)`, protein only, no location
    Uncertain,
}

impl EqualityMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            EqualityMarker::Identical => "=",
            EqualityMarker::Uncertain => "(=)",
        }
    }
}

/// Borrowed view of an element's sequence payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Deletion, duplication, frameshift
    None,
    /// Reference and replacement base or residue
    Substitution { reference: &'a str, new: &'a str },
    /// Inserted bases or residues
    Sequence(&'a str),
    Equality(EqualityMarker),
}

/// One event of a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantElement {
    Equality {
        location: Option<Location>,
        marker: EqualityMarker,
    },
    /// For protein substitutions `reference` is the residue of `position`
    Substitution {
        position: Position,
        reference: String,
        new: String,
    },
    Frameshift {
        position: Position,
    },
    Deletion {
        location: Location,
    },
    Duplication {
        location: Location,
    },
    Insertion {
        start: Position,
        end: Position,
        sequence: String,
    },
    DeletionInsertion {
        location: Location,
        sequence: String,
    },
}

impl VariantElement {
    pub fn kind(&self) -> EventKind {
        match self {
            VariantElement::Equality { .. } => EventKind::Equality,
            VariantElement::Substitution { .. } => EventKind::Substitution,
            VariantElement::Frameshift { .. } => EventKind::Frameshift,
            VariantElement::Deletion { .. } => EventKind::Deletion,
            VariantElement::Duplication { .. } => EventKind::Duplication,
            VariantElement::Insertion { .. } => EventKind::Insertion,
            VariantElement::DeletionInsertion { .. } => EventKind::DeletionInsertion,
        }
    }

    /// Position or range of the event; `None` for whole-target equality
    pub fn location(&self) -> Option<Location> {
        match self {
            VariantElement::Equality { location, .. } => location.clone(),
            VariantElement::Substitution { position, .. }
            | VariantElement::Frameshift { position } => Some(Location::Single(position.clone())),
            VariantElement::Deletion { location }
            | VariantElement::Duplication { location }
            | VariantElement::DeletionInsertion { location, .. } => Some(location.clone()),
            VariantElement::Insertion { start, end, .. } => {
                Some(Location::Range(start.clone(), end.clone()))
            }
        }
    }

    pub fn payload(&self) -> Payload<'_> {
        match self {
            VariantElement::Equality { marker, .. } => Payload::Equality(*marker),
            VariantElement::Substitution { reference, new, .. } => Payload::Substitution {
                reference,
                new,
            },
            VariantElement::Insertion { sequence, .. }
            | VariantElement::DeletionInsertion { sequence, .. } => Payload::Sequence(sequence),
            VariantElement::Frameshift { .. }
            | VariantElement::Deletion { .. }
            | VariantElement::Duplication { .. } => Payload::None,
        }
    }

    /// Whether this element describes no change
    pub fn is_equality(&self) -> bool {
        matches!(self, VariantElement::Equality { .. })
    }

    /// Whether any position of this element uses UTR or intronic notation
    pub fn uses_extended_positions(&self) -> bool {
        self.location().is_some_and(|l| l.is_extended())
    }
}

impl fmt::Display for VariantElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantElement::Equality {
                location: Some(location),
                marker,
            } => write!(f, "{}{}", location, marker.as_str()),
            VariantElement::Equality {
                location: None,
                marker,
            } => write!(f, "{}", marker.as_str()),
            VariantElement::Substitution {
                position,
                reference,
                new,
            } => {
                if position.is_protein() {
                    write!(f, "{}{}", position, new)
                } else {
                    write!(f, "{}{}>{}", position, reference, new)
                }
            }
            VariantElement::Frameshift { position } => write!(f, "{}fs", position),
            VariantElement::Deletion { location } => write!(f, "{}del", location),
            VariantElement::Duplication { location } => write!(f, "{}dup", location),
            VariantElement::Insertion {
                start,
                end,
                sequence,
            } => write!(f, "{}_{}ins{}", start, end, sequence),
            VariantElement::DeletionInsertion { location, sequence } => {
                write!(f, "{}delins{}", location, sequence)
            }
        }
    }
}

/// A parsed and validated MAVE-HGVS variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    target_id: Option<String>,
    prefix: Prefix,
    elements: Vec<VariantElement>,
}

impl Variant {
    pub(crate) fn from_parts(
        target_id: Option<String>,
        prefix: Prefix,
        elements: Vec<VariantElement>,
    ) -> Self {
        Self {
            target_id,
            prefix,
            elements,
        }
    }

    /// Accession or name before the `:`, if present
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// Events in 3' order; exactly one for a single variant
    pub fn elements(&self) -> &[VariantElement] {
        &self.elements
    }

    pub fn variant_kinds(&self) -> Vec<EventKind> {
        self.elements.iter().map(VariantElement::kind).collect()
    }

    pub fn positions(&self) -> Vec<Option<Location>> {
        self.elements.iter().map(VariantElement::location).collect()
    }

    pub fn payloads(&self) -> Vec<Payload<'_>> {
        self.elements.iter().map(VariantElement::payload).collect()
    }

    /// Whether this is an allele of two or more events
    pub fn is_multi_variant(&self) -> bool {
        self.elements.len() > 1
    }

    /// Whether the variant describes the unchanged target
    ///
    /// True for any nucleotide equality (`c.=`, `g.1_3=`) and for the
    /// location-free protein forms `p.=` and `p.(=)`. Synonymous protein
    /// variants such as `p.Leu12=` are not target identical.
    pub fn is_target_identical(&self) -> bool {
        match self.elements.as_slice() {
            [VariantElement::Equality { location, .. }] => {
                self.prefix != Prefix::Protein || location.is_none()
            }
            _ => false,
        }
    }

    /// Whether the variant is any protein equality, including `p.=` and `p.(=)`
    pub fn is_synonymous(&self) -> bool {
        self.prefix == Prefix::Protein
            && matches!(self.elements.as_slice(), [VariantElement::Equality { .. }])
    }

    /// Whether any position uses UTR or intronic notation
    pub fn uses_extended_positions(&self) -> bool {
        self.elements
            .iter()
            .any(VariantElement::uses_extended_positions)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(target_id) = &self.target_id {
            write!(f, "{}:", target_id)?;
        }
        write!(f, "{}.", self.prefix)?;
        match self.elements.as_slice() {
            [single] => write!(f, "{}", single),
            elements => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ";")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl FromStr for Variant {
    type Err = MaveHgvsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s)
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_variant(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefix_chars() {
        for prefix in Prefix::ALL {
            assert_eq!(Prefix::from_char(prefix.as_char()), Some(prefix));
        }
        assert_eq!(Prefix::from_char('C'), None);
        assert_eq!(Prefix::from_char('x'), None);
        assert!(Prefix::OtherGenomic.is_dna());
        assert!(!Prefix::Rna.is_dna());
    }

    #[test]
    fn test_event_kind_tags() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(EventKind::from_tag("test"), None);
        assert!(EventKind::Frameshift.applies_to(Prefix::Protein));
        assert!(!EventKind::Frameshift.applies_to(Prefix::Coding));
    }

    #[test]
    fn test_location_overlap() {
        let range = Location::Range(pos("1"), pos("95"));
        assert!(range.overlaps(&Location::Single(pos("22"))));
        assert!(range.overlaps(&Location::Single(pos("95"))));
        assert!(range.overlaps(&Location::Range(pos("78+5"), pos("78+10"))));
        assert!(!range.overlaps(&Location::Single(pos("122"))));
        assert!(!Location::Single(pos("5")).overlaps(&Location::Single(pos("6"))));
    }

    #[test]
    fn test_element_display() {
        let element = VariantElement::Substitution {
            position: pos("Glu27"),
            reference: "Glu".to_string(),
            new: "Trp".to_string(),
        };
        assert_eq!(element.to_string(), "Glu27Trp");

        let element = VariantElement::Insertion {
            start: pos("22"),
            end: pos("23"),
            sequence: "auc".to_string(),
        };
        assert_eq!(element.to_string(), "22_23insauc");
        assert_eq!(element.payload(), Payload::Sequence("auc"));

        let element = VariantElement::Equality {
            location: None,
            marker: EqualityMarker::Uncertain,
        };
        assert_eq!(element.to_string(), "(=)");
        assert_eq!(element.location(), None);
    }

    #[test]
    fn test_variant_display() {
        let variant = Variant::from_parts(
            Some("YFG1".to_string()),
            Prefix::Coding,
            vec![
                VariantElement::Deletion {
                    location: Location::Single(pos("12")),
                },
                VariantElement::Duplication {
                    location: Location::Range(pos("78+5"), pos("78+10")),
                },
            ],
        );
        assert_eq!(variant.to_string(), "YFG1:c.[12del;78+5_78+10dup]");
        assert!(variant.is_multi_variant());
        assert!(variant.uses_extended_positions());
    }
}
