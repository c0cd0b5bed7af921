//! Structured variant construction
//!
//! A variant can be described by fields instead of a string, either with the
//! typed [`VariantFields`] or with a JSON field map. Both are rendered to the
//! equivalent variant string and parsed, so structured and string input go
//! through exactly the same checks.
//!
//! # Field maps
//!
//! | `variant_type` | Nucleotide keys                              | Extra protein keys            |
//! |----------------|----------------------------------------------|-------------------------------|
//! | `equal`        | `start_position`, `end_position`             | `position`, `target` instead  |
//! | `sub`          | `position`, `target`, `variant`              |                               |
//! | `fs`           | (protein only)                               | `position`, `target`          |
//! | `del`, `dup`   | `start_position`, `end_position`             | `start_target`, `end_target`  |
//! | `ins`, `delins`| `start_position`, `end_position`, `variant`  | `start_target`, `end_target`  |
//!
//! Every map also carries `variant_type` and `prefix`. Position values may be
//! JSON strings or integers. Equal start and end positions describe a single
//! position, except for insertions.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::config::ParseOptions;
use crate::error::MaveHgvsError;

use super::{parse_variant_with, EventKind, Prefix, Variant};

/// One coordinate token, with its residue for protein variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub residue: Option<String>,
    pub position: String,
}

impl Coordinate {
    /// A nucleotide coordinate such as `122-6` or `*33`
    pub fn new(position: impl Into<String>) -> Self {
        Self {
            residue: None,
            position: position.into(),
        }
    }

    /// A protein coordinate such as `Glu27`
    pub fn protein(residue: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            residue: Some(residue.into()),
            position: position.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(residue) = &self.residue {
            write!(f, "{}", residue)?;
        }
        write!(f, "{}", self.position)
    }
}

/// Start and end of an event; identical coordinates describe one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFields {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RangeFields {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn single(coordinate: Coordinate) -> Self {
        Self {
            start: coordinate.clone(),
            end: coordinate,
        }
    }

    fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for RangeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}_{}", self.start, self.end)
        }
    }
}

/// Fields of one event, one variant per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFields {
    /// `site` is `None` for whole-target equality
    Equality { site: Option<RangeFields> },
    /// `target` is the reference base, or the reference residue for proteins
    Substitution {
        position: String,
        target: String,
        variant: String,
    },
    /// Protein only; `target` is the residue at `position`
    Frameshift { position: String, target: String },
    Deletion { site: RangeFields },
    Duplication { site: RangeFields },
    /// Always written as a range
    Insertion { site: RangeFields, sequence: String },
    DeletionInsertion { site: RangeFields, sequence: String },
}

impl EventFields {
    pub fn kind(&self) -> EventKind {
        match self {
            EventFields::Equality { .. } => EventKind::Equality,
            EventFields::Substitution { .. } => EventKind::Substitution,
            EventFields::Frameshift { .. } => EventKind::Frameshift,
            EventFields::Deletion { .. } => EventKind::Deletion,
            EventFields::Duplication { .. } => EventKind::Duplication,
            EventFields::Insertion { .. } => EventKind::Insertion,
            EventFields::DeletionInsertion { .. } => EventKind::DeletionInsertion,
        }
    }
}

/// A complete single-event description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFields {
    pub prefix: Prefix,
    pub event: EventFields,
}

impl VariantFields {
    pub fn new(prefix: Prefix, event: EventFields) -> Self {
        Self { prefix, event }
    }

    /// Render the event as a variant string, optionally with `prefix.`
    ///
    /// The result is not validated here; parse it to check it.
    pub fn to_variant_string(&self, include_prefix: bool) -> Result<String, MaveHgvsError> {
        let protein = self.prefix == Prefix::Protein;

        let event = match &self.event {
            EventFields::Equality { site: None } => "=".to_string(),
            EventFields::Equality { site: Some(site) } => format!("{}=", site),
            EventFields::Substitution {
                position,
                target,
                variant,
            } => {
                if protein {
                    format!("{}{}{}", target, position, variant)
                } else {
                    format!("{}{}>{}", position, target, variant)
                }
            }
            EventFields::Frameshift { position, target } => {
                if !protein {
                    return Err(MaveHgvsError::malformed_fields(
                        "frameshifts are only supported for protein variants",
                    ));
                }
                format!("{}{}fs", target, position)
            }
            EventFields::Deletion { site } => format!("{}del", site),
            EventFields::Duplication { site } => format!("{}dup", site),
            EventFields::Insertion { site, sequence } => {
                format!("{}_{}ins{}", site.start, site.end, sequence)
            }
            EventFields::DeletionInsertion { site, sequence } => {
                format!("{}delins{}", site, sequence)
            }
        };

        if include_prefix {
            Ok(format!("{}.{}", self.prefix, event))
        } else {
            Ok(event)
        }
    }

    /// Read one event from a JSON field map
    pub fn from_field_map(map: &Map<String, Value>) -> Result<Self, MaveHgvsError> {
        let (Some(variant_type), Some(prefix)) = (map.get("variant_type"), map.get("prefix"))
        else {
            return Err(MaveHgvsError::malformed_fields(
                "variant field map missing required keys",
            ));
        };

        let prefix = match prefix.as_str().map(|s| (s.chars().next(), s.chars().count())) {
            Some((Some(c), 1)) => Prefix::from_char(c),
            _ => None,
        }
        .ok_or_else(|| MaveHgvsError::malformed_fields(format!("invalid prefix {}", prefix)))?;

        let kind = variant_type
            .as_str()
            .and_then(EventKind::from_tag)
            .ok_or_else(|| {
                MaveHgvsError::malformed_fields(format!("invalid variant type {}", variant_type))
            })?;

        let protein = prefix == Prefix::Protein;
        check_keys(map, &expected_keys(kind, protein))?;

        let value = |key: &str| field_value(map, key);
        let site = || -> Result<RangeFields, MaveHgvsError> {
            if protein {
                Ok(RangeFields::new(
                    Coordinate::protein(value("start_target")?, value("start_position")?),
                    Coordinate::protein(value("end_target")?, value("end_position")?),
                ))
            } else {
                Ok(RangeFields::new(
                    Coordinate::new(value("start_position")?),
                    Coordinate::new(value("end_position")?),
                ))
            }
        };

        let event = match kind {
            EventKind::Equality if protein => EventFields::Equality {
                site: Some(RangeFields::single(Coordinate::protein(
                    value("target")?,
                    value("position")?,
                ))),
            },
            EventKind::Equality => EventFields::Equality {
                site: Some(site()?),
            },
            EventKind::Substitution => EventFields::Substitution {
                position: value("position")?,
                target: value("target")?,
                variant: value("variant")?,
            },
            EventKind::Frameshift => EventFields::Frameshift {
                position: value("position")?,
                target: value("target")?,
            },
            EventKind::Deletion => EventFields::Deletion { site: site()? },
            EventKind::Duplication => EventFields::Duplication { site: site()? },
            EventKind::Insertion => EventFields::Insertion {
                site: site()?,
                sequence: value("variant")?,
            },
            EventKind::DeletionInsertion => EventFields::DeletionInsertion {
                site: site()?,
                sequence: value("variant")?,
            },
        };

        Ok(Self { prefix, event })
    }
}

impl Variant {
    /// Build a single-event variant from typed fields
    pub fn from_fields(fields: &VariantFields) -> Result<Variant, MaveHgvsError> {
        Variant::from_fields_with(fields, &ParseOptions::default())
    }

    /// Build a single-event variant from typed fields with explicit options
    pub fn from_fields_with(
        fields: &VariantFields,
        options: &ParseOptions,
    ) -> Result<Variant, MaveHgvsError> {
        parse_variant_with(&fields.to_variant_string(true)?, options)
    }

    /// Build an allele from typed fields, one entry per event
    pub fn from_field_list(fields: &[VariantFields]) -> Result<Variant, MaveHgvsError> {
        Variant::from_field_list_with(fields, &ParseOptions::default())
    }

    /// Build an allele from typed fields with explicit options
    ///
    /// With relaxed ordering the events may be given in any order.
    pub fn from_field_list_with(
        fields: &[VariantFields],
        options: &ParseOptions,
    ) -> Result<Variant, MaveHgvsError> {
        let Some(first) = fields.first() else {
            return Err(MaveHgvsError::malformed_fields("no variant fields given"));
        };

        let prefixes: BTreeSet<char> = fields.iter().map(|f| f.prefix.as_char()).collect();
        if prefixes.len() > 1 {
            return Err(MaveHgvsError::MixedPrefixes {
                prefixes: prefixes
                    .iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let events = fields
            .iter()
            .map(|f| f.to_variant_string(false))
            .collect::<Result<Vec<_>, _>>()?;

        parse_variant_with(&format!("{}.[{}]", first.prefix, events.join(";")), options)
    }

    /// Build a single-event variant from a JSON field map
    pub fn from_field_map(map: &Map<String, Value>) -> Result<Variant, MaveHgvsError> {
        Variant::from_field_map_with(map, &ParseOptions::default())
    }

    /// Build a single-event variant from a JSON field map with explicit options
    pub fn from_field_map_with(
        map: &Map<String, Value>,
        options: &ParseOptions,
    ) -> Result<Variant, MaveHgvsError> {
        Variant::from_fields_with(&VariantFields::from_field_map(map)?, options)
    }

    /// Build an allele from JSON field maps, one map per event
    pub fn from_field_maps(maps: &[Map<String, Value>]) -> Result<Variant, MaveHgvsError> {
        Variant::from_field_maps_with(maps, &ParseOptions::default())
    }

    /// Build an allele from JSON field maps with explicit options
    pub fn from_field_maps_with(
        maps: &[Map<String, Value>],
        options: &ParseOptions,
    ) -> Result<Variant, MaveHgvsError> {
        let fields = maps
            .iter()
            .map(VariantFields::from_field_map)
            .collect::<Result<Vec<_>, _>>()?;
        Variant::from_field_list_with(&fields, options)
    }
}

fn expected_keys(kind: EventKind, protein: bool) -> Vec<&'static str> {
    let mut keys = vec!["variant_type", "prefix"];
    match kind {
        EventKind::Equality if protein => keys.extend(["position", "target"]),
        EventKind::Equality => keys.extend(["start_position", "end_position"]),
        EventKind::Substitution => keys.extend(["position", "target", "variant"]),
        EventKind::Frameshift => keys.extend(["position", "target"]),
        EventKind::Deletion
        | EventKind::Duplication
        | EventKind::Insertion
        | EventKind::DeletionInsertion => {
            keys.extend(["start_position", "end_position"]);
            if protein {
                keys.extend(["start_target", "end_target"]);
            }
            if matches!(kind, EventKind::Insertion | EventKind::DeletionInsertion) {
                keys.push("variant");
            }
        }
    }
    keys
}

fn check_keys(map: &Map<String, Value>, expected: &[&str]) -> Result<(), MaveHgvsError> {
    let found: BTreeSet<&str> = map.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = expected.iter().copied().collect();
    if found != expected {
        let extra: Vec<_> = found.difference(&expected).copied().collect();
        let missing: Vec<_> = expected.difference(&found).copied().collect();
        return Err(MaveHgvsError::malformed_fields(format!(
            "variant field map contains invalid keys (unexpected: [{}], missing: [{}])",
            extra.join(", "),
            missing.join(", ")
        )));
    }
    Ok(())
}

/// A field value as text; strings and integers are accepted
fn field_value(map: &Map<String, Value>, key: &str) -> Result<String, MaveHgvsError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(other) => Err(MaveHgvsError::malformed_fields(format!(
            "field '{}' must be a string or integer, found {}",
            key, other
        ))),
        None => Err(MaveHgvsError::malformed_fields(format!(
            "missing field '{}'",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_render_typed_fields() {
        let fields = VariantFields::new(
            Prefix::Protein,
            EventFields::DeletionInsertion {
                site: RangeFields::new(
                    Coordinate::protein("Ile", "71"),
                    Coordinate::protein("Cys", "80"),
                ),
                sequence: "Ser".to_string(),
            },
        );
        assert_eq!(
            fields.to_variant_string(true).unwrap(),
            "p.Ile71_Cys80delinsSer"
        );
        assert_eq!(fields.to_variant_string(false).unwrap(), "Ile71_Cys80delinsSer");
    }

    #[test]
    fn test_single_site_collapses() {
        let fields = VariantFields::new(
            Prefix::Coding,
            EventFields::Duplication {
                site: RangeFields::single(Coordinate::new("77")),
            },
        );
        assert_eq!(fields.to_variant_string(true).unwrap(), "c.77dup");
    }

    #[test]
    fn test_insertion_stays_ranged() {
        let fields = VariantFields::new(
            Prefix::Rna,
            EventFields::Insertion {
                site: RangeFields::single(Coordinate::new("22")),
                sequence: "auc".to_string(),
            },
        );
        assert_eq!(fields.to_variant_string(true).unwrap(), "r.22_22insauc");
    }

    #[test]
    fn test_frameshift_requires_protein() {
        let fields = VariantFields::new(
            Prefix::Coding,
            EventFields::Frameshift {
                position: "12".to_string(),
                target: "T".to_string(),
            },
        );
        assert!(matches!(
            fields.to_variant_string(true),
            Err(MaveHgvsError::MalformedFieldSet { .. })
        ));
    }

    #[test]
    fn test_field_map_integer_positions() {
        let fields = VariantFields::from_field_map(&map(json!({
            "variant_type": "sub",
            "prefix": "p",
            "position": 27,
            "target": "Glu",
            "variant": "Trp",
        })))
        .unwrap();
        assert_eq!(fields.to_variant_string(true).unwrap(), "p.Glu27Trp");
    }

    #[test]
    fn test_field_map_rejects_float() {
        let err = VariantFields::from_field_map(&map(json!({
            "variant_type": "del",
            "prefix": "g",
            "start_position": 5.5,
            "end_position": 6,
        })))
        .unwrap_err();
        assert!(matches!(err, MaveHgvsError::MalformedFieldSet { .. }));
    }

    #[test]
    fn test_expected_keys() {
        assert_eq!(
            expected_keys(EventKind::Insertion, true),
            vec![
                "variant_type",
                "prefix",
                "start_position",
                "end_position",
                "start_target",
                "end_target",
                "variant"
            ]
        );
        assert_eq!(
            expected_keys(EventKind::Equality, false),
            vec!["variant_type", "prefix", "start_position", "end_position"]
        );
    }
}
