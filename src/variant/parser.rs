//! Variant string parser
//!
//! Parsing runs in up to three passes:
//!
//! 1. Match the whole input against the grammar. A single event yields its
//!    fields directly. An allele match only confirms the shape, so each
//!    `;`-separated part is matched again as `prefix.part`.
//! 2. Allele rules (overlap, 3' ordering, frameshift placement).
//! 3. Optional target-sequence checks.

use std::cmp::Ordering;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Captures;

use crate::alphabet::{StandardAlphabet, SymbolTable};
use crate::config::ParseOptions;
use crate::error::MaveHgvsError;
use crate::grammar::{event_group, Grammar};
use crate::position::Position;

use super::allele::validate_allele;
use super::target::validate_target;
use super::{EqualityMarker, EventKind, Location, Prefix, Variant, VariantElement};

static DEFAULT_PARSER: Lazy<VariantParser<StandardAlphabet>> =
    Lazy::new(|| VariantParser::new(StandardAlphabet));

/// The shared parser over [`StandardAlphabet`]
pub fn default_parser() -> &'static VariantParser<StandardAlphabet> {
    &DEFAULT_PARSER
}

/// Parse a variant string with strict ordering and no target sequence
pub fn parse_variant(input: &str) -> Result<Variant, MaveHgvsError> {
    DEFAULT_PARSER.parse(input)
}

/// Parse a variant string with explicit options
pub fn parse_variant_with(input: &str, options: &ParseOptions) -> Result<Variant, MaveHgvsError> {
    DEFAULT_PARSER.parse_with(input, options)
}

/// A compiled grammar together with the symbol table it was built from
///
/// Building a parser compiles the grammar, so construct one per symbol table
/// and reuse it. Parsers hold no mutable state and can be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct VariantParser<S: SymbolTable = StandardAlphabet> {
    symbols: S,
    grammar: Grammar,
}

impl<S: SymbolTable> VariantParser<S> {
    /// Compile the grammar for `symbols`
    pub fn new(symbols: S) -> Self {
        let grammar = Grammar::new(&symbols);
        Self { symbols, grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    /// Parse with strict ordering and no target sequence
    pub fn parse(&self, input: &str) -> Result<Variant, MaveHgvsError> {
        self.parse_with(input, &ParseOptions::default())
    }

    /// Parse with explicit options
    pub fn parse_with(
        &self,
        input: &str,
        options: &ParseOptions,
    ) -> Result<Variant, MaveHgvsError> {
        let caps = self
            .grammar
            .captures(input)
            .ok_or_else(|| MaveHgvsError::grammar_mismatch(input))?;

        let target_id = caps.name("target_id").map(|m| m.as_str().to_string());

        let variant = if let Some(single) = caps.name("single_variant") {
            let prefix = prefix_of(single.as_str());
            let element = self.extract_element(&caps, prefix, options.relaxed_ordering)?;
            Variant::from_parts(target_id, prefix, vec![element])
        } else if let Some(multi) = caps.name("multi_variant") {
            let text = multi.as_str();
            let prefix = prefix_of(text);
            // strip "x.[" and "]"
            let body = &text[3..text.len() - 1];

            let elements = body
                .split(';')
                .map(|part| self.parse_allele_part(prefix, part, options.relaxed_ordering))
                .collect::<Result<Vec<_>, _>>()?;

            let elements = validate_allele(elements, options.relaxed_ordering, input)?;
            Variant::from_parts(target_id, prefix, elements)
        } else {
            panic!("variant grammar matched '{input}' without a single or multi variant group");
        };

        if let Some(target) = options.target_sequence.as_deref() {
            validate_target(&variant, target, &self.symbols)?;
        }

        trace!("Parsed '{}' as {:?}", input, variant);
        Ok(variant)
    }

    fn parse_allele_part(
        &self,
        prefix: Prefix,
        part: &str,
        relaxed: bool,
    ) -> Result<VariantElement, MaveHgvsError> {
        let text = format!("{}.{}", prefix.as_char(), part);
        let caps = match self.grammar.captures(&text) {
            Some(caps) if caps.name("single_variant").is_some() => caps,
            _ => panic!("allele element '{text}' does not match the single-event grammar"),
        };

        let element = self.extract_element(&caps, prefix, relaxed)?;
        if element.is_equality() {
            return Err(MaveHgvsError::TargetIdenticalInMultiVariant {
                element: part.to_string(),
            });
        }
        Ok(element)
    }

    /// Build one element from the groups of a single-event match
    fn extract_element(
        &self,
        caps: &Captures<'_>,
        prefix: Prefix,
        relaxed: bool,
    ) -> Result<VariantElement, MaveHgvsError> {
        let (kind, group) = fired_event(caps, prefix);
        let field = |name: &str| caps.name(&format!("{group}_{name}")).map(|m| m.as_str());
        let position = |token: &str| Position::parse_with(token, &self.symbols);

        let location = match (field("position"), field("start"), field("end")) {
            (Some(single), _, _) => Some(Location::Single(position(single)?)),
            (None, Some(start), Some(end)) => {
                Some(ordered_range(position(start)?, position(end)?, relaxed)?)
            }
            _ => None,
        };
        let required = |location: Option<Location>| {
            location.unwrap_or_else(|| panic!("event group '{group}' matched without a location"))
        };
        let text = |name: &str| {
            field(name)
                .unwrap_or_else(|| panic!("event group '{group}' matched without '{name}'"))
                .to_string()
        };

        let element = match kind {
            EventKind::Equality => {
                let marker = if field("equal_sy").is_some() {
                    EqualityMarker::Uncertain
                } else {
                    EqualityMarker::Identical
                };
                VariantElement::Equality { location, marker }
            }
            EventKind::Substitution => {
                let position = single_position(required(location), &group);
                let reference = match position.amino_acid() {
                    Some(aa) => aa.to_string(),
                    None => text("ref"),
                };
                VariantElement::Substitution {
                    position,
                    reference,
                    new: text("new"),
                }
            }
            EventKind::Frameshift => VariantElement::Frameshift {
                position: single_position(required(location), &group),
            },
            EventKind::Deletion => VariantElement::Deletion {
                location: required(location),
            },
            EventKind::Duplication => VariantElement::Duplication {
                location: required(location),
            },
            EventKind::Insertion => match required(location) {
                Location::Range(start, end) => {
                    if !start.is_adjacent(&end) {
                        return Err(MaveHgvsError::NonAdjacentInsertion {
                            start: start.to_string(),
                            end: end.to_string(),
                        });
                    }
                    VariantElement::Insertion {
                        start,
                        end,
                        sequence: text("seq"),
                    }
                }
                Location::Single(_) => panic!("insertion group '{group}' matched a single position"),
            },
            EventKind::DeletionInsertion => VariantElement::DeletionInsertion {
                location: required(location),
                sequence: text("seq"),
            },
        };

        Ok(element)
    }
}

/// The level prefix of a matched variant (its first character)
fn prefix_of(matched: &str) -> Prefix {
    matched
        .chars()
        .next()
        .and_then(Prefix::from_char)
        .unwrap_or_else(|| panic!("variant grammar matched unknown prefix in '{matched}'"))
}

/// Find the single event group that fired for `prefix`
fn fired_event(caps: &Captures<'_>, prefix: Prefix) -> (EventKind, String) {
    let mut fired = EventKind::ALL
        .into_iter()
        .filter(|kind| kind.applies_to(prefix))
        .map(|kind| (kind, event_group(prefix, kind)))
        .filter(|(_, group)| caps.name(group).is_some());

    match (fired.next(), fired.next()) {
        (Some(event), None) => event,
        (Some((_, first)), Some((_, second))) => {
            panic!("ambiguous variant match: '{first}' and '{second}' both matched")
        }
        (None, _) => panic!("variant grammar matched no event group for prefix '{prefix}'"),
    }
}

fn single_position(location: Location, group: &str) -> Position {
    match location {
        Location::Single(position) => position,
        Location::Range(..) => panic!("event group '{group}' matched a range"),
    }
}

/// Build a range, requiring `start < end` unless `relaxed` is set
///
/// In relaxed mode reversed endpoints are swapped and equal endpoints are kept
/// as given.
fn ordered_range(start: Position, end: Position, relaxed: bool) -> Result<Location, MaveHgvsError> {
    match start.cmp(&end) {
        Ordering::Less => Ok(Location::Range(start, end)),
        Ordering::Greater if relaxed => {
            debug!("Reordering reversed range {}_{}", start, end);
            Ok(Location::Range(end, start))
        }
        Ordering::Equal if relaxed => Ok(Location::Range(start, end)),
        _ => Err(MaveHgvsError::UnorderedRange {
            start: start.to_string(),
            end: end.to_string(),
        }),
    }
}
