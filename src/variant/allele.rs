//! Allele (multi-variant) rules
//!
//! An allele must not change any position twice, must list its events in
//! ascending order of start position (the 3' rule), and may contain at most
//! one frameshift, which must be the final event.

use log::debug;

use crate::error::MaveHgvsError;
use crate::position::Position;

use super::{EventKind, VariantElement};

/// Check an allele's elements and return them in 3' order
///
/// With `relaxed` set, an out-of-order allele is silently sorted; otherwise it
/// is rejected. `input` is only used for error messages.
pub fn validate_allele(
    mut elements: Vec<VariantElement>,
    relaxed: bool,
    input: &str,
) -> Result<Vec<VariantElement>, MaveHgvsError> {
    check_overlaps(&elements)?;

    if !is_sorted(&elements) {
        if !relaxed {
            return Err(MaveHgvsError::UnsortedMultiVariant {
                input: input.to_string(),
            });
        }
        debug!("Reordering multi-variant '{}' into 3' order", input);
        elements.sort_by(|a, b| start_of(a).cmp(&start_of(b)));
    }

    check_frameshift(&elements)?;
    Ok(elements)
}

/// Reject any two elements whose positions intersect, endpoints included
fn check_overlaps(elements: &[VariantElement]) -> Result<(), MaveHgvsError> {
    let locations: Vec<_> = elements.iter().map(VariantElement::location).collect();

    for (i, first) in locations.iter().enumerate() {
        for (j, second) in locations.iter().enumerate().skip(i + 1) {
            if let (Some(a), Some(b)) = (first, second) {
                if a.overlaps(b) {
                    return Err(MaveHgvsError::OverlappingElements {
                        first: elements[i].to_string(),
                        second: elements[j].to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_frameshift(elements: &[VariantElement]) -> Result<(), MaveHgvsError> {
    let frameshifts = elements
        .iter()
        .filter(|e| e.kind() == EventKind::Frameshift)
        .count();

    if frameshifts > 1 {
        return Err(MaveHgvsError::MisplacedFrameshift {
            msg: "maximum of one frameshift is permitted".to_string(),
        });
    }
    if frameshifts == 1
        && elements.last().map(VariantElement::kind) != Some(EventKind::Frameshift)
    {
        return Err(MaveHgvsError::MisplacedFrameshift {
            msg: "no variants are permitted to follow a frameshift".to_string(),
        });
    }
    Ok(())
}

fn is_sorted(elements: &[VariantElement]) -> bool {
    elements
        .windows(2)
        .all(|pair| start_of(&pair[0]) <= start_of(&pair[1]))
}

fn start_of(element: &VariantElement) -> Option<Position> {
    element.location().map(|l| l.start().clone())
}
