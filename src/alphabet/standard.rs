//! Standard MAVE-HGVS alphabet
//!
//! Unambiguous DNA and RNA bases plus the twenty standard amino acids and the
//! terminator. Ambiguity codes (`N`, `Xaa`, ...) and the rare residues `Sec`
//! and `Pyl` are deliberately absent.

use super::SymbolTable;

const DNA_BASES: [char; 4] = ['A', 'C', 'G', 'T'];

const RNA_BASES: [char; 4] = ['a', 'c', 'g', 'u'];

const AMINO_ACIDS: [(&str, char); 21] = [
    ("Ala", 'A'),
    ("Arg", 'R'),
    ("Asn", 'N'),
    ("Asp", 'D'),
    ("Cys", 'C'),
    ("Gln", 'Q'),
    ("Glu", 'E'),
    ("Gly", 'G'),
    ("His", 'H'),
    ("Ile", 'I'),
    ("Leu", 'L'),
    ("Lys", 'K'),
    ("Met", 'M'),
    ("Phe", 'F'),
    ("Pro", 'P'),
    ("Ser", 'S'),
    ("Thr", 'T'),
    ("Trp", 'W'),
    ("Tyr", 'Y'),
    ("Val", 'V'),
    ("Ter", '*'),
];

/// The default symbol table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardAlphabet;

impl StandardAlphabet {
    /// Create the standard alphabet
    pub fn new() -> Self {
        Self
    }
}

impl SymbolTable for StandardAlphabet {
    fn dna_bases(&self) -> &[char] {
        &DNA_BASES
    }

    fn rna_bases(&self) -> &[char] {
        &RNA_BASES
    }

    fn amino_acids(&self) -> &[(&'static str, char)] {
        &AMINO_ACIDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_to_one() {
        let alphabet = StandardAlphabet::new();
        assert_eq!(alphabet.one_letter("Glu"), Some('E'));
        assert_eq!(alphabet.one_letter("Ter"), Some('*'));
        assert_eq!(alphabet.one_letter("Xaa"), None);
        assert_eq!(alphabet.one_letter("glu"), None);
    }

    #[test]
    fn test_one_to_three() {
        let alphabet = StandardAlphabet::new();
        assert_eq!(alphabet.three_letter('W'), Some("Trp"));
        assert_eq!(alphabet.three_letter('*'), Some("Ter"));
        assert_eq!(alphabet.three_letter('X'), None);
    }

    #[test]
    fn test_table_matches_lookup() {
        let alphabet = StandardAlphabet::new();
        assert_eq!(alphabet.amino_acids().len(), 21);
        for (code, one) in alphabet.amino_acids() {
            assert_eq!(alphabet.one_letter(code), Some(*one));
            assert_eq!(alphabet.three_letter(*one), Some(*code));
        }
    }

    #[test]
    fn test_bases() {
        let alphabet = StandardAlphabet::new();
        assert_eq!(alphabet.dna_bases(), &['A', 'C', 'G', 'T']);
        assert_eq!(alphabet.rna_bases(), &['a', 'c', 'g', 'u']);
        assert!(!alphabet.is_amino_acid("Sec"));
    }
}
