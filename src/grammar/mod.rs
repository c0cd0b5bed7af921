//! Variant grammar
//!
//! The grammar is a set of regular expressions assembled from a
//! [`SymbolTable`]. Each sequence level gets one pattern per event kind; these
//! are joined into an "any event" pattern per level with scoped group names
//! (see [`combine_patterns`]). The full recognizer accepts an optional target
//! identifier followed by either a single event or an allele:
//!
//! ```text
//! [target_id:]prefix.event
//! [target_id:]prefix.[event;event;...]
//! ```
//!
//! Allele events are embedded with their group names removed (see
//! [`remove_named_groups`]), so an allele match only tells the caller that the
//! whole string is well formed. Each `;`-separated part has to be matched again
//! as a single event to recover its fields.
//!
//! Group names follow a fixed scheme, returned by [`event_group`]:
//!
//! | Prefix    | Event group        | Example field           |
//! |-----------|--------------------|-------------------------|
//! | `c`       | `dna_{kind}_c`     | `dna_sub_c_position`    |
//! | `n`       | `dna_{kind}_n`     | `dna_del_n_start`       |
//! | `g m o`   | `dna_{kind}_gmo`   | `dna_ins_gmo_seq`       |
//! | `r`       | `rna_{kind}`       | `rna_delins_end`        |
//! | `p`       | `pro_{kind}`       | `pro_equal_equal_sy`    |

mod nucleotide;
mod protein;
pub mod util;

pub use util::{combine_patterns, remove_named_groups};

use log::debug;
use regex::{Captures, Regex, RegexBuilder};

use crate::alphabet::SymbolTable;
use crate::variant::{EventKind, Prefix};

use nucleotide::nucleotide_events;
use protein::protein_events;

/// A position number: no position 0 and no leading zeros
pub const NUMBER: &str = "[1-9][0-9]*";

/// A position with an optional intronic offset
pub const POSITION_INTRON: &str = "[1-9][0-9]*(?:[+-][1-9][0-9]*)?";

/// A position with optional UTR and intronic qualifiers
pub const POSITION_INTRON_UTR: &str = "[*-]?[1-9][0-9]*(?:[+-][1-9][0-9]*)?";

/// An optional `target_id:` in front of the variant
const TARGET_ID: &str = "(?:(?P<target_id>[a-zA-Z0-9_.-]+):)?";

const RECOGNIZER_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Name of the capture group that fires when `kind` matches at level `prefix`
pub fn event_group(prefix: Prefix, kind: EventKind) -> String {
    match prefix {
        Prefix::Protein => format!("pro_{}", kind.tag()),
        Prefix::Rna => format!("rna_{}", kind.tag()),
        Prefix::Coding => format!("dna_{}_c", kind.tag()),
        Prefix::NonCoding => format!("dna_{}_n", kind.tag()),
        Prefix::Genomic | Prefix::Mitochondrial | Prefix::OtherGenomic => {
            format!("dna_{}_gmo", kind.tag())
        }
    }
}

/// Compiled variant grammar for one symbol table
#[derive(Debug, Clone)]
pub struct Grammar {
    coding: String,
    non_coding: String,
    genomic: String,
    rna: String,
    protein: String,
    any_variant: String,
    recognizer: Regex,
}

impl Grammar {
    /// Assemble and compile the grammar
    ///
    /// # Panics
    ///
    /// Panics if the assembled pattern fails to compile. Symbols are escaped
    /// before use, so this only happens if the grammar itself is broken.
    pub fn new(symbols: &dyn SymbolTable) -> Self {
        let dna = symbol_class(symbols.dna_bases());
        let rna = symbol_class(symbols.rna_bases());
        let amino_acid = format!(
            "(?:{})",
            symbols
                .amino_acids()
                .iter()
                .map(|(code, _)| regex::escape(code))
                .collect::<Vec<_>>()
                .join("|")
        );

        let level = |prefix: Prefix| move |kind: EventKind| event_group(prefix, kind);

        let coding = combine_patterns(
            &nucleotide_events(level(Prefix::Coding), POSITION_INTRON_UTR, &dna, true),
            None,
        );
        let non_coding = combine_patterns(
            &nucleotide_events(level(Prefix::NonCoding), POSITION_INTRON_UTR, &dna, false),
            None,
        );
        let genomic = combine_patterns(
            &nucleotide_events(level(Prefix::Genomic), NUMBER, &dna, true),
            None,
        );
        let rna = combine_patterns(
            &nucleotide_events(level(Prefix::Rna), POSITION_INTRON, &rna, true),
            None,
        );
        let protein = combine_patterns(
            &protein_events(level(Prefix::Protein), &amino_acid, NUMBER),
            None,
        );

        let single = [
            format!(r"(?P<dna_c>c\.{})", coding),
            format!(r"(?P<dna_n>n\.{})", non_coding),
            format!(r"(?P<dna_gmo>[gmo]\.{})", genomic),
            format!(r"(?P<rna>r\.{})", rna),
            format!(r"(?P<pro>p\.{})", protein),
        ]
        .join("|");

        let multi = [
            allele_pattern("dna_c_multi", "c", &coding),
            allele_pattern("dna_n_multi", "n", &non_coding),
            allele_pattern("dna_gmo_multi", "[gmo]", &genomic),
            allele_pattern("rna_multi", "r", &rna),
            allele_pattern("pro_multi", "p", &protein),
        ]
        .join("|");

        let any_variant = format!(
            "{}(?:(?P<single_variant>{})|(?P<multi_variant>{}))",
            TARGET_ID, single, multi
        );

        let recognizer = RegexBuilder::new(&format!("^(?:{})$", any_variant))
            .size_limit(RECOGNIZER_SIZE_LIMIT)
            .build()
            .unwrap_or_else(|e| panic!("variant grammar failed to compile: {e}"));

        debug!(
            "Compiled variant grammar: {} pattern bytes, {} capture groups",
            any_variant.len(),
            recognizer.captures_len()
        );

        Self {
            coding,
            non_coding,
            genomic,
            rna,
            protein,
            any_variant,
            recognizer,
        }
    }

    /// The "any event" pattern for one sequence level, without the prefix
    pub fn single_event(&self, prefix: Prefix) -> &str {
        match prefix {
            Prefix::Coding => &self.coding,
            Prefix::NonCoding => &self.non_coding,
            Prefix::Genomic | Prefix::Mitochondrial | Prefix::OtherGenomic => &self.genomic,
            Prefix::Rna => &self.rna,
            Prefix::Protein => &self.protein,
        }
    }

    /// The unanchored pattern for a complete single variant or allele
    pub fn any_variant(&self) -> &str {
        &self.any_variant
    }

    /// The compiled, fully anchored recognizer
    pub fn recognizer(&self) -> &Regex {
        &self.recognizer
    }

    /// Whether `input` is a syntactically valid variant
    pub fn is_match(&self, input: &str) -> bool {
        self.recognizer.is_match(input)
    }

    /// Match `input` against the recognizer
    pub fn captures<'h>(&self, input: &'h str) -> Option<Captures<'h>> {
        self.recognizer.captures(input)
    }
}

fn symbol_class(symbols: &[char]) -> String {
    let escaped: String = symbols
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    format!("[{}]", escaped)
}

fn allele_pattern(name: &str, prefix: &str, event: &str) -> String {
    let event = remove_named_groups(event);
    format!(
        r"(?P<{name}>{prefix}\.\[{event}(?:;{event})+\])",
        name = name,
        prefix = prefix,
        event = event
    )
}
