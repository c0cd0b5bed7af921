//! Symbol table trait
//!
//! Defines the interface for supplying nucleotide and amino acid alphabets.

/// Trait for providing the symbols a variant grammar accepts
///
/// Implementations might include:
/// - StandardAlphabet for unambiguous DNA, RNA, and amino acid symbols
/// - Extended tables adding IUPAC ambiguity codes or rare residues
///
/// Tables are read-only after construction, so a table shared between threads
/// needs no locking.
pub trait SymbolTable {
    /// Valid DNA bases (uppercase by convention)
    fn dna_bases(&self) -> &[char];

    /// Valid RNA bases (lowercase by convention)
    fn rna_bases(&self) -> &[char];

    /// Valid amino acids as `(three-letter code, one-letter code)` pairs,
    /// including the terminator
    fn amino_acids(&self) -> &[(&'static str, char)];

    /// Convert a three-letter amino acid code to its one-letter code
    fn one_letter(&self, three_letter: &str) -> Option<char> {
        self.amino_acids()
            .iter()
            .find(|(code, _)| *code == three_letter)
            .map(|(_, one)| *one)
    }

    /// Convert a one-letter amino acid code to its three-letter code
    fn three_letter(&self, one_letter: char) -> Option<&'static str> {
        self.amino_acids()
            .iter()
            .find(|(_, one)| *one == one_letter)
            .map(|(code, _)| *code)
    }

    /// Check whether a three-letter amino acid code is in the table
    fn is_amino_acid(&self, three_letter: &str) -> bool {
        self.one_letter(three_letter).is_some()
    }
}
