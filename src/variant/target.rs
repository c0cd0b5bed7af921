//! Target-sequence checks
//!
//! Compares a variant's coordinates and declared reference symbols with a
//! caller-supplied sequence. Coordinates are 1-based. Elements that use UTR or
//! intronic positions are skipped, since the target has no UTR or intron
//! content, and whole-target equality has nothing to check.
//!
//! Nucleotide substitutions compare the declared reference base. Protein
//! elements compare the residue of every written position. All other elements
//! are only bounds-checked.

use crate::alphabet::SymbolTable;
use crate::error::MaveHgvsError;
use crate::position::Position;

use super::{Location, Variant, VariantElement};

/// Check every element of `variant` against `target`
pub fn validate_target<S: SymbolTable + ?Sized>(
    variant: &Variant,
    target: &str,
    symbols: &S,
) -> Result<(), MaveHgvsError> {
    let target: Vec<char> = target.chars().collect();

    for element in variant.elements() {
        let Some(location) = element.location() else {
            continue;
        };
        if location.is_extended() {
            continue;
        }

        check_bounds(&location, &target)?;

        match element {
            VariantElement::Substitution {
                position,
                reference,
                ..
            } if !position.is_protein() => check_base(position, reference, &target)?,
            _ => check_residues(&location, &target, symbols)?,
        }
    }
    Ok(())
}

fn check_bounds(location: &Location, target: &[char]) -> Result<(), MaveHgvsError> {
    for position in location.positions() {
        let base = position.base_position();
        if base < 1 || base as usize > target.len() {
            return Err(MaveHgvsError::OutOfBounds {
                position: base,
                length: target.len(),
            });
        }
    }
    Ok(())
}

/// Symbol at a bounds-checked 1-based position
fn symbol_at(position: &Position, target: &[char]) -> char {
    target[position.base_position() as usize - 1]
}

fn check_base(position: &Position, reference: &str, target: &[char]) -> Result<(), MaveHgvsError> {
    let found = symbol_at(position, target);
    let mut expected = reference.chars();
    if expected.next() != Some(found) || expected.next().is_some() {
        return Err(MaveHgvsError::ReferenceMismatch {
            position: position.base_position(),
            expected: reference.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

fn check_residues<S: SymbolTable + ?Sized>(
    location: &Location,
    target: &[char],
    symbols: &S,
) -> Result<(), MaveHgvsError> {
    for position in location.positions() {
        let Some(amino_acid) = position.amino_acid() else {
            continue;
        };
        let found = symbol_at(position, target);
        if symbols.one_letter(amino_acid) != Some(found) {
            return Err(MaveHgvsError::ReferenceMismatch {
                position: position.base_position(),
                expected: amino_acid.to_string(),
                found: symbols
                    .three_letter(found)
                    .map(str::to_string)
                    .unwrap_or_else(|| found.to_string()),
            });
        }
    }
    Ok(())
}
