//! Symbol tables consumed by the grammar and the target-sequence validator
//!
//! The parser never hard-codes which bases or residues are legal. It is built
//! from a [`SymbolTable`], and [`StandardAlphabet`] supplies the tables used by
//! MAVE-HGVS.

pub mod provider;
pub mod standard;

pub use provider::SymbolTable;
pub use standard::StandardAlphabet;
