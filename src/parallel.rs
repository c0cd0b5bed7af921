//! Parallel batch parsing
//!
//! Parallel variants of the batch helpers using rayon. Enable with the
//! `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use mave_hgvs::parallel::parse_variants_parallel;
//! use mave_hgvs::ParseOptions;
//!
//! let variants = vec!["c.122-6T>A", "p.Glu27Trp", "g.44del"];
//!
//! let parsed: Vec<_> = parse_variants_parallel(&variants, &ParseOptions::default(), None)
//!     .into_iter()
//!     .filter_map(|r| r.ok())
//!     .collect();
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::alphabet::SymbolTable;
use crate::batch::parse_checked;
use crate::config::ParseOptions;
use crate::error::MaveHgvsError;
use crate::variant::{default_parser, Prefix, Variant, VariantParser};

/// Parse multiple variant strings in parallel
///
/// Returns a vector of results, one for each input string.
/// Order is preserved.
pub fn parse_variants_parallel<T: AsRef<str> + Sync>(
    inputs: &[T],
    options: &ParseOptions,
    expected_prefix: Option<Prefix>,
) -> Vec<Result<Variant, MaveHgvsError>> {
    parse_variants_parallel_with(default_parser(), inputs, options, expected_prefix)
}

/// Parse multiple variant strings in parallel with a specific parser
pub fn parse_variants_parallel_with<S, T>(
    parser: &VariantParser<S>,
    inputs: &[T],
    options: &ParseOptions,
    expected_prefix: Option<Prefix>,
) -> Vec<Result<Variant, MaveHgvsError>>
where
    S: SymbolTable + Sync,
    T: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| parse_checked(parser, input.as_ref(), options, expected_prefix))
        .collect()
}

/// Parse multiple variant strings in parallel into variants or error messages
///
/// Same contract as [`crate::batch::parse_variant_strings`].
pub fn parse_variant_strings_parallel<T: AsRef<str> + Sync>(
    inputs: &[T],
    options: &ParseOptions,
    expected_prefix: Option<Prefix>,
) -> Vec<Result<Variant, String>> {
    parse_variants_parallel(inputs, options, expected_prefix)
        .into_iter()
        .map(|r| r.map_err(|e| e.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_preserves_order() {
        let inputs: Vec<String> = (1..=200).map(|i| format!("g.{}del", i)).collect();
        let results = parse_variants_parallel(&inputs, &ParseOptions::default(), None);
        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(&results) {
            assert_eq!(&result.as_ref().unwrap().to_string(), input);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs = ["c.1A>T", "c.1C>T", "p.Glu27Trp", "c.[1A>T;3G>C]", "x.="];
        let options = ParseOptions::new().target_sequence("ACGT");
        let parallel = parse_variant_strings_parallel(&inputs, &options, Some(Prefix::Coding));
        let sequential =
            crate::batch::parse_variant_strings(&inputs, &options, Some(Prefix::Coding));
        assert_eq!(parallel, sequential);
    }
}
