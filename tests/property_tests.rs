//! Property-based tests for MAVE-HGVS parsing
//!
//! Generated canonical strings must survive parse -> display unchanged,
//! positions must form a total order, and the allele rules must hold for any
//! element order.

use std::collections::BTreeSet;

use mave_hgvs::{parse_variant, parse_variant_with, ErrorCode, ParseOptions, Position};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Base strategies
// =============================================================================

/// Generate valid DNA bases
fn nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'),]
}

/// Generate valid RNA bases
fn rna_nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('a'), Just('c'), Just('g'), Just('u'),]
}

/// Generate short DNA sequences
fn nucleotide_sequence() -> impl Strategy<Value = String> {
    prop::collection::vec(nucleotide(), 1..=6).prop_map(|v| v.into_iter().collect())
}

/// Generate three-letter amino acid codes, including Ter
fn amino_acid() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Ala"),
        Just("Arg"),
        Just("Asn"),
        Just("Asp"),
        Just("Cys"),
        Just("Gln"),
        Just("Glu"),
        Just("Gly"),
        Just("His"),
        Just("Ile"),
        Just("Leu"),
        Just("Lys"),
        Just("Met"),
        Just("Phe"),
        Just("Pro"),
        Just("Ser"),
        Just("Thr"),
        Just("Trp"),
        Just("Tyr"),
        Just("Val"),
        Just("Ter"),
    ]
}

fn amino_acid_sequence() -> impl Strategy<Value = String> {
    prop::collection::vec(amino_acid(), 1..=4).prop_map(|v| v.join(""))
}

/// Generate position numbers
fn number() -> impl Strategy<Value = i64> {
    1..5000i64
}

/// Generate transcript positions with optional UTR and intronic parts
fn transcript_position() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("-"), Just("*")],
        number(),
        prop::option::of((prop_oneof![Just('+'), Just('-')], 1..200i64)),
    )
        .prop_map(|(utr, base, offset)| match offset {
            Some((sign, n)) => format!("{}{}{}{}", utr, base, sign, n),
            None => format!("{}{}", utr, base),
        })
}

// =============================================================================
// Variant strategies
// =============================================================================

fn genomic_variant() -> impl Strategy<Value = String> {
    let level = prop_oneof![Just('g'), Just('m'), Just('o')];
    let event = prop_oneof![
        (number(), nucleotide(), nucleotide()).prop_map(|(p, r, n)| format!("{}{}>{}", p, r, n)),
        number().prop_map(|p| format!("{}del", p)),
        (number(), 1..100i64).prop_map(|(s, len)| format!("{}_{}dup", s, s + len)),
        (number(), nucleotide_sequence()).prop_map(|(s, seq)| format!("{}_{}ins{}", s, s + 1, seq)),
        (number(), 1..100i64, nucleotide_sequence())
            .prop_map(|(s, len, seq)| format!("{}_{}delins{}", s, s + len, seq)),
        (number(), 1..100i64).prop_map(|(s, len)| format!("{}_{}=", s, s + len)),
    ];
    (level, event).prop_map(|(level, event)| format!("{}.{}", level, event))
}

fn coding_variant() -> impl Strategy<Value = String> {
    prop_oneof![
        (transcript_position(), nucleotide(), nucleotide())
            .prop_map(|(p, r, n)| format!("c.{}{}>{}", p, r, n)),
        transcript_position().prop_map(|p| format!("c.{}del", p)),
        transcript_position().prop_map(|p| format!("c.{}dup", p)),
        (transcript_position(), nucleotide_sequence())
            .prop_map(|(p, seq)| format!("c.{}delins{}", p, seq)),
        transcript_position().prop_map(|p| format!("c.{}=", p)),
    ]
}

fn rna_variant() -> impl Strategy<Value = String> {
    (number(), rna_nucleotide(), rna_nucleotide(), 1..50i64).prop_flat_map(|(p, r, n, len)| {
        prop_oneof![
            Just(format!("r.{}{}>{}", p, r, n)),
            Just(format!("r.{}_{}del", p, p + len)),
            Just(format!("r.{}_{}ins{}", p, p + 1, n)),
        ]
    })
}

fn protein_variant() -> impl Strategy<Value = String> {
    prop_oneof![
        (amino_acid(), number(), amino_acid())
            .prop_map(|(aa, p, new)| format!("p.{}{}{}", aa, p, new)),
        (amino_acid(), number()).prop_map(|(aa, p)| format!("p.{}{}fs", aa, p)),
        (amino_acid(), number()).prop_map(|(aa, p)| format!("p.{}{}=", aa, p)),
        (amino_acid(), number(), 1..30i64, amino_acid())
            .prop_map(|(a, s, len, b)| format!("p.{}{}_{}{}del", a, s, b, s + len)),
        (amino_acid(), number(), amino_acid(), amino_acid_sequence())
            .prop_map(|(a, s, b, seq)| format!("p.{}{}_{}{}ins{}", a, s, b, s + 1, seq)),
        (amino_acid(), number(), amino_acid_sequence())
            .prop_map(|(a, s, seq)| format!("p.{}{}delins{}", a, s, seq)),
    ]
}

fn any_variant() -> impl Strategy<Value = String> {
    prop_oneof![
        genomic_variant(),
        coding_variant(),
        rna_variant(),
        protein_variant(),
    ]
}

/// Distinct, well separated genomic positions in ascending order
fn sorted_sites() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(1..2000i64, 2..6)
        .prop_map(|set: BTreeSet<i64>| set.into_iter().map(|p| p * 3).collect())
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Round trips
    // -------------------------------------------------------------------------

    /// Canonical strings display unchanged
    #[test]
    fn test_canonical_roundtrip(variant in any_variant()) {
        let parsed = parse_variant(&variant);
        prop_assert!(parsed.is_ok(), "Failed to parse: {} ({:?})", variant, parsed);
        prop_assert_eq!(parsed.unwrap().to_string(), variant);
    }

    /// Parsing the displayed form gives an equal variant
    #[test]
    fn test_reparse_is_stable(variant in any_variant()) {
        let parsed = parse_variant(&variant).unwrap();
        let reparsed = parse_variant(&parsed.to_string()).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }

    /// A target identifier is kept verbatim
    #[test]
    fn test_target_id_roundtrip(id in "[A-Za-z][A-Za-z0-9_]{0,12}(\\.[0-9]{1,2})?", variant in any_variant()) {
        let input = format!("{}:{}", id, variant);
        let parsed = parse_variant(&input).unwrap();
        prop_assert_eq!(parsed.target_id(), Some(id.as_str()));
        prop_assert_eq!(parsed.to_string(), input);
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position tokens round trip through display
    #[test]
    fn test_position_roundtrip(token in transcript_position()) {
        let position: Position = token.parse().unwrap();
        prop_assert_eq!(position.to_string(), token);
    }

    /// Exactly one of <, ==, > holds and adjacency is symmetric and irreflexive
    #[test]
    fn test_position_order(a in transcript_position(), b in transcript_position()) {
        let a: Position = a.parse().unwrap();
        let b: Position = b.parse().unwrap();

        let relations = [a < b, a == b, a > b];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);
        prop_assert_eq!(a.is_adjacent(&b), b.is_adjacent(&a));
        if a == b {
            prop_assert!(!a.is_adjacent(&b));
        }
    }

    /// Sorting never depends on input order
    #[test]
    fn test_position_sort_is_total(tokens in prop::collection::vec(transcript_position(), 1..20)) {
        let mut forward: Vec<Position> = tokens.iter().map(|t| t.parse().unwrap()).collect();
        let mut backward = forward.clone();
        backward.reverse();
        forward.sort();
        backward.sort();
        prop_assert_eq!(forward, backward);
    }

    // -------------------------------------------------------------------------
    // Alleles
    // -------------------------------------------------------------------------

    /// Any order of non-overlapping events sorts into 3' order in relaxed mode
    #[test]
    fn test_relaxed_allele_sorting(
        (sites, shuffled) in sorted_sites().prop_flat_map(|sites| {
            let shuffled = Just(sites.clone()).prop_shuffle();
            (Just(sites), shuffled)
        })
    ) {
        let render = |sites: &[i64]| {
            let events: Vec<String> = sites.iter().map(|p| format!("{}del", p)).collect();
            format!("g.[{}]", events.join(";"))
        };
        let sorted = render(&sites);
        let input = render(&shuffled);

        let relaxed = ParseOptions::new().relaxed_ordering(true);
        prop_assert_eq!(parse_variant_with(&input, &relaxed).unwrap().to_string(), sorted.clone());

        let strict = parse_variant(&input);
        if shuffled == sites {
            prop_assert!(strict.is_ok());
        } else {
            prop_assert_eq!(strict.unwrap_err().code(), ErrorCode::UnsortedMultiVariant);
        }
    }

    /// Events that share a position are rejected in either order
    #[test]
    fn test_overlap_rejected(start in number(), len in 1..20i64, offset in 0..20i64) {
        let end = start + len;
        let inside = start + offset.min(len);
        for input in [
            format!("g.[{}_{}del;{}A>T]", start, end, inside),
            format!("g.[{}A>T;{}_{}del]", inside, start, end),
        ] {
            let err = parse_variant_with(&input, &ParseOptions::new().relaxed_ordering(true)).unwrap_err();
            prop_assert_eq!(err.code(), ErrorCode::OverlappingElements);
        }
    }

    // -------------------------------------------------------------------------
    // Robustness
    // -------------------------------------------------------------------------

    /// Arbitrary input is either parsed or rejected, never a panic
    #[test]
    fn test_arbitrary_input(input in "[A-Za-z0-9_.:]{0,6}[cgmnoprx]\\.[\\[\\]0-9ACGTacgu+*=()>;_a-z-]{0,24}") {
        let _ = parse_variant(&input);
        let _ = parse_variant_with(&input, &ParseOptions::new().relaxed_ordering(true));
    }
}
