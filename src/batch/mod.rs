//! Batch parsing of MAVE-HGVS strings.
//!
//! This module parses collections of variant strings with progress tracking,
//! per-item error collection, and summary statistics. A failed item never
//! stops the batch.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use mave_hgvs::batch::BatchParser;
//!
//! let variants = vec!["c.122-6T>A", "p.[Glu27Trp;Gly18del]", "x.="];
//!
//! let result = BatchParser::new().parse(&variants);
//! assert_eq!(result.success_count(), 1);
//! assert_eq!(result.error_count(), 2);
//! ```
//!
//! ## With Progress Callback
//!
//! ```
//! use mave_hgvs::batch::{BatchConfig, BatchParser};
//! use mave_hgvs::Prefix;
//!
//! let parser = BatchParser::with_config(
//!     BatchConfig::new().expected_prefix(Prefix::Coding).progress_interval(1),
//! );
//!
//! let variants = vec!["c.1A>T", "p.Glu27Trp"];
//! let result = parser.parse_with_progress(&variants, |progress| {
//!     println!("Progress: {:.1}%", progress.percent());
//! });
//! assert_eq!(result.success_count(), 1);
//! ```
//!
//! ## Messages Only
//!
//! ```
//! use mave_hgvs::batch::parse_variant_strings;
//! use mave_hgvs::ParseOptions;
//!
//! let results = parse_variant_strings(&["c.1A>T", "c.1C>T"], &ParseOptions::new().target_sequence("ACGT"), None);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! ```

mod processor;

pub(crate) use processor::parse_checked;
pub use processor::{
    parse_variant_strings, BatchConfig, BatchParser, BatchProgress, BatchResult, ItemResult,
};
