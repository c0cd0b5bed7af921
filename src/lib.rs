// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! mave-hgvs: MAVE-HGVS variant parser
//!
//! Parses, validates, and canonically re-serializes variant strings in the
//! MAVE-HGVS profile of HGVS nomenclature, used for multiplexed assays of
//! variant effect.
//!
//! # Example
//!
//! ```
//! use mave_hgvs::{parse_variant, parse_variant_with, ParseOptions};
//!
//! // Parse a variant string
//! let variant = parse_variant("NM_007294.4:c.[12T>A;78+5_78+10del]").unwrap();
//! assert_eq!(variant.target_id(), Some("NM_007294.4"));
//! assert!(variant.is_multi_variant());
//!
//! // Out-of-order alleles are accepted and sorted with relaxed ordering
//! let options = ParseOptions::new().relaxed_ordering(true);
//! let variant = parse_variant_with("p.[Gly345Lys;Glu27Trp]", &options).unwrap();
//! assert_eq!(variant.to_string(), "p.[Glu27Trp;Gly345Lys]");
//!
//! // Reference symbols can be checked against a target sequence
//! let options = ParseOptions::new().target_sequence("ACGT");
//! assert!(parse_variant_with("c.1C>T", &options).is_err());
//! ```

pub mod alphabet;
pub mod batch;
pub mod config;
pub mod error;
pub mod grammar;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod position;
pub mod variant;

// Re-export commonly used types
pub use alphabet::{StandardAlphabet, SymbolTable};
pub use batch::{parse_variant_strings, BatchConfig, BatchParser};
pub use config::{MaveHgvsConfig, ParseOptions};
pub use error::{ErrorCode, MaveHgvsError};
pub use grammar::Grammar;
pub use position::{Position, Utr};
pub use variant::{
    parse_variant, parse_variant_with, EqualityMarker, EventKind, Location, Payload, Prefix,
    Variant, VariantElement, VariantParser,
};
pub use variant::fields::{Coordinate, EventFields, RangeFields, VariantFields};

/// Result type alias for mave-hgvs operations
pub type Result<T> = std::result::Result<T, MaveHgvsError>;
