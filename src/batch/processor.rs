//! Batch parser implementation.

use std::time::{Duration, Instant};

use log::debug;

use crate::alphabet::{StandardAlphabet, SymbolTable};
use crate::config::ParseOptions;
use crate::error::MaveHgvsError;
use crate::variant::{default_parser, Prefix, Variant, VariantParser};

/// Configuration for batch parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Options applied to every item.
    pub options: ParseOptions,
    /// Reject successfully parsed variants with any other prefix.
    pub expected_prefix: Option<Prefix>,
    /// Callback frequency (call progress callback every N items).
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            options: ParseOptions::default(),
            expected_prefix: None,
            progress_interval: 100,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse options.
    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Require every variant to have this prefix.
    pub fn expected_prefix(mut self, prefix: Prefix) -> Self {
        self.expected_prefix = Some(prefix);
        self
    }

    /// Set the progress callback interval; values below 1 are raised to 1.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

/// Progress information for batch operations.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total items to process.
    pub total: usize,
    /// Items processed so far.
    pub processed: usize,
    /// Successful items so far.
    pub success: usize,
    /// Failed items so far.
    pub errors: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// Calculate processing rate (items per second); 0.0 before any time has elapsed.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }
}

/// Result of a single item in a batch operation.
#[derive(Debug, Clone)]
pub enum ItemResult<T> {
    /// Successful processing.
    Ok(T),
    /// Failed processing with error.
    Err {
        /// Original input.
        input: String,
        /// Error that occurred.
        error: MaveHgvsError,
    },
}

impl<T> ItemResult<T> {
    /// Check if this is a success.
    pub fn is_ok(&self) -> bool {
        matches!(self, ItemResult::Ok(_))
    }

    /// Check if this is an error.
    pub fn is_err(&self) -> bool {
        matches!(self, ItemResult::Err { .. })
    }

    /// Get the success value if present.
    pub fn ok(self) -> Option<T> {
        match self {
            ItemResult::Ok(v) => Some(v),
            ItemResult::Err { .. } => None,
        }
    }

    /// Get the error if present.
    pub fn err(self) -> Option<MaveHgvsError> {
        match self {
            ItemResult::Ok(_) => None,
            ItemResult::Err { error, .. } => Some(error),
        }
    }

    /// Convert into a plain result with the error rendered as a message.
    pub fn into_message_result(self) -> Result<T, String> {
        match self {
            ItemResult::Ok(v) => Ok(v),
            ItemResult::Err { error, .. } => Err(error.to_string()),
        }
    }
}

/// Result of a batch operation.
#[derive(Debug)]
pub struct BatchResult<T> {
    /// Individual results for each item, in input order.
    pub results: Vec<ItemResult<T>>,
    /// Total processing time.
    pub duration: Duration,
}

impl<T> BatchResult<T> {
    /// Create a new batch result.
    pub fn new(results: Vec<ItemResult<T>>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Get the total number of items processed.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get the number of successful items.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Get the number of failed items.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }

    /// Calculate success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            100.0
        } else {
            (self.success_count() as f64 / self.results.len() as f64) * 100.0
        }
    }

    /// Calculate processing rate (items per second).
    pub fn items_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.results.len() as f64 / secs
        }
    }

    /// Get only successful results.
    pub fn successes(self) -> Vec<T> {
        self.results.into_iter().filter_map(|r| r.ok()).collect()
    }

    /// Get only errors.
    pub fn errors(self) -> Vec<MaveHgvsError> {
        self.results.into_iter().filter_map(|r| r.err()).collect()
    }

    /// Check if all items were successful.
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(|r| r.is_ok())
    }
}

/// Batch parser for MAVE-HGVS strings.
///
/// Every item is parsed independently; a failure is recorded and the batch
/// continues.
pub struct BatchParser<'p, S: SymbolTable = StandardAlphabet> {
    parser: &'p VariantParser<S>,
    config: BatchConfig,
}

impl BatchParser<'static, StandardAlphabet> {
    /// Create a batch parser over the shared standard parser.
    pub fn new() -> Self {
        Self::with_config(BatchConfig::default())
    }

    /// Create a batch parser over the shared standard parser with configuration.
    pub fn with_config(config: BatchConfig) -> Self {
        Self {
            parser: default_parser(),
            config,
        }
    }
}

impl Default for BatchParser<'static, StandardAlphabet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, S: SymbolTable> BatchParser<'p, S> {
    /// Create a batch parser over a specific parser.
    pub fn with_parser(parser: &'p VariantParser<S>, config: BatchConfig) -> Self {
        Self { parser, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Parse one item with the batch options and prefix filter.
    pub fn parse_one(&self, input: &str) -> Result<Variant, MaveHgvsError> {
        parse_checked(
            self.parser,
            input,
            &self.config.options,
            self.config.expected_prefix,
        )
    }

    /// Parse multiple variant strings.
    pub fn parse<T: AsRef<str>>(&self, inputs: &[T]) -> BatchResult<Variant> {
        self.parse_with_progress(inputs, |_| {})
    }

    /// Parse multiple variant strings with progress callback.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Slice of variant strings to parse
    /// * `progress_fn` - Callback called every `progress_interval` items and
    ///   after the last item
    pub fn parse_with_progress<T, F>(&self, inputs: &[T], mut progress_fn: F) -> BatchResult<Variant>
    where
        T: AsRef<str>,
        F: FnMut(BatchProgress),
    {
        let start = Instant::now();
        let total = inputs.len();
        let interval = self.config.progress_interval.max(1);
        let mut results = Vec::with_capacity(total);
        let mut success = 0;
        let mut errors = 0;

        for (i, input) in inputs.iter().enumerate() {
            let input = input.as_ref();
            match self.parse_one(input) {
                Ok(variant) => {
                    results.push(ItemResult::Ok(variant));
                    success += 1;
                }
                Err(error) => {
                    results.push(ItemResult::Err {
                        input: input.to_string(),
                        error,
                    });
                    errors += 1;
                }
            }

            if (i + 1) % interval == 0 || i + 1 == total {
                progress_fn(BatchProgress {
                    total,
                    processed: i + 1,
                    success,
                    errors,
                    elapsed: start.elapsed(),
                });
            }
        }

        let result = BatchResult::new(results, start.elapsed());
        debug!(
            "Parsed {}/{} variants in {:?}",
            result.success_count(),
            result.total(),
            result.duration
        );
        result
    }
}

/// Parse a list of variant strings into variants or error messages
///
/// The output has the same length and order as `inputs`. With
/// `expected_prefix` set, variants with any other prefix are reported as
/// errors.
pub fn parse_variant_strings<T: AsRef<str>>(
    inputs: &[T],
    options: &ParseOptions,
    expected_prefix: Option<Prefix>,
) -> Vec<Result<Variant, String>> {
    let mut config = BatchConfig::new().options(options.clone());
    config.expected_prefix = expected_prefix;

    BatchParser::with_config(config)
        .parse(inputs)
        .results
        .into_iter()
        .map(ItemResult::into_message_result)
        .collect()
}

pub(crate) fn parse_checked<S: SymbolTable>(
    parser: &VariantParser<S>,
    input: &str,
    options: &ParseOptions,
    expected_prefix: Option<Prefix>,
) -> Result<Variant, MaveHgvsError> {
    let variant = parser.parse_with(input, options)?;
    match expected_prefix {
        Some(expected) if variant.prefix() != expected => Err(MaveHgvsError::UnexpectedPrefix {
            expected: expected.as_char(),
            found: variant.prefix().as_char(),
        }),
        _ => Ok(variant),
    }
}
