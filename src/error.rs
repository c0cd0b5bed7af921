//! Error types for mave-hgvs
//!
//! Every user-facing failure is a variant of [`MaveHgvsError`]. Each variant maps
//! to an [`ErrorCode`] so callers can branch on the category without matching on
//! message text.
//!
//! Internal-consistency failures of the grammar (for example more than one event
//! kind firing in a single match) are not represented here; they panic.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Grammar and position errors (E1xxx)
    /// Input does not match any variant shape
    GrammarMismatch = 1001,
    /// Coordinate token is malformed
    MalformedPosition = 1002,
    /// Range start is not before range end
    UnorderedRange = 1003,
    /// Insertion flanks are not adjacent
    NonAdjacentInsertion = 1004,

    // Allele errors (E2xxx)
    /// Allele contains an equality element
    TargetIdenticalInMultiVariant = 2001,
    /// Allele elements overlap
    OverlappingElements = 2002,
    /// Allele elements are not in 3' order
    UnsortedMultiVariant = 2003,
    /// Frameshift is repeated or not last
    MisplacedFrameshift = 2004,

    // Target sequence errors (E3xxx)
    /// Declared reference disagrees with the target
    ReferenceMismatch = 3001,
    /// Coordinate lies outside the target
    OutOfBounds = 3002,

    // Structured input errors (E4xxx)
    /// Field set is incomplete or has unknown keys
    MalformedFieldSet = 4001,
    /// Allele elements use different prefixes
    MixedPrefixes = 4002,
    /// Variant prefix differs from the expected prefix
    UnexpectedPrefix = 4003,

    // Configuration errors (E9xxx)
    /// Configuration could not be read or parsed
    Config = 9001,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::GrammarMismatch => "input does not match the variant grammar",
            ErrorCode::MalformedPosition => "malformed position",
            ErrorCode::UnorderedRange => "range start is not before range end",
            ErrorCode::NonAdjacentInsertion => "insertion positions are not adjacent",
            ErrorCode::TargetIdenticalInMultiVariant => "multi-variant contains an equality",
            ErrorCode::OverlappingElements => "multi-variant elements overlap",
            ErrorCode::UnsortedMultiVariant => "multi-variant elements out of order",
            ErrorCode::MisplacedFrameshift => "frameshift must be the single last element",
            ErrorCode::ReferenceMismatch => "reference does not match target sequence",
            ErrorCode::OutOfBounds => "position outside target sequence",
            ErrorCode::MalformedFieldSet => "invalid variant field set",
            ErrorCode::MixedPrefixes => "multi-variant elements have different prefixes",
            ErrorCode::UnexpectedPrefix => "unexpected variant prefix",
            ErrorCode::Config => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for mave-hgvs operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaveHgvsError {
    /// Input does not conform to any recognized variant shape
    #[error("failed to match variant grammar: '{input}'")]
    GrammarMismatch { input: String },

    /// A coordinate token is syntactically invalid
    #[error("invalid variant position string '{token}'")]
    MalformedPosition { token: String },

    /// A range whose start is not strictly before its end
    #[error("start position must be before end position: {start}_{end}")]
    UnorderedRange { start: String, end: String },

    /// An insertion between two positions that are not adjacent
    #[error("insertion positions must be adjacent: {start}_{end}")]
    NonAdjacentInsertion { start: String, end: String },

    /// An allele element that describes no change
    #[error("multi-variants cannot contain target-identical variants: '{element}'")]
    TargetIdenticalInMultiVariant { element: String },

    /// Two allele elements touching the same position
    #[error("multi-variant has overlapping changes: '{first}' and '{second}'")]
    OverlappingElements { first: String, second: String },

    /// Allele elements that do not follow the 3' rule
    #[error("multi-variants not in sorted order: '{input}'")]
    UnsortedMultiVariant { input: String },

    /// More than one frameshift, or a frameshift followed by other events
    #[error("{msg}")]
    MisplacedFrameshift { msg: String },

    /// Structured input with missing, extra, or inapplicable fields
    #[error("invalid variant field set: {msg}")]
    MalformedFieldSet { msg: String },

    /// Structured allele input whose elements disagree on the prefix
    #[error("cannot combine variants with different prefixes: {prefixes}")]
    MixedPrefixes { prefixes: String },

    /// Declared reference base or residue disagrees with the target sequence
    #[error("variant reference does not match target at position {position}: expected {expected}, found {found}")]
    ReferenceMismatch {
        position: i64,
        expected: String,
        found: String,
    },

    /// A coordinate outside `[1, len(target)]`
    #[error("variant coordinate out of bounds: {position} (target length {length})")]
    OutOfBounds { position: i64, length: usize },

    /// A successfully parsed variant with a prefix other than the expected one
    #[error("unexpected variant prefix: expected '{expected}', found '{found}'")]
    UnexpectedPrefix { expected: char, found: char },

    /// Configuration file could not be read or parsed
    #[error("configuration error: {msg}")]
    Config { msg: String },
}

impl MaveHgvsError {
    /// Create a grammar mismatch error for the given input
    pub fn grammar_mismatch(input: impl Into<String>) -> Self {
        MaveHgvsError::GrammarMismatch {
            input: input.into(),
        }
    }

    /// Create a malformed field set error
    pub fn malformed_fields(msg: impl Into<String>) -> Self {
        MaveHgvsError::MalformedFieldSet { msg: msg.into() }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            MaveHgvsError::GrammarMismatch { .. } => ErrorCode::GrammarMismatch,
            MaveHgvsError::MalformedPosition { .. } => ErrorCode::MalformedPosition,
            MaveHgvsError::UnorderedRange { .. } => ErrorCode::UnorderedRange,
            MaveHgvsError::NonAdjacentInsertion { .. } => ErrorCode::NonAdjacentInsertion,
            MaveHgvsError::TargetIdenticalInMultiVariant { .. } => {
                ErrorCode::TargetIdenticalInMultiVariant
            }
            MaveHgvsError::OverlappingElements { .. } => ErrorCode::OverlappingElements,
            MaveHgvsError::UnsortedMultiVariant { .. } => ErrorCode::UnsortedMultiVariant,
            MaveHgvsError::MisplacedFrameshift { .. } => ErrorCode::MisplacedFrameshift,
            MaveHgvsError::MalformedFieldSet { .. } => ErrorCode::MalformedFieldSet,
            MaveHgvsError::MixedPrefixes { .. } => ErrorCode::MixedPrefixes,
            MaveHgvsError::ReferenceMismatch { .. } => ErrorCode::ReferenceMismatch,
            MaveHgvsError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            MaveHgvsError::UnexpectedPrefix { .. } => ErrorCode::UnexpectedPrefix,
            MaveHgvsError::Config { .. } => ErrorCode::Config,
        }
    }

    /// Whether this error came from comparing against a target sequence
    pub fn is_target_error(&self) -> bool {
        matches!(
            self,
            MaveHgvsError::ReferenceMismatch { .. } | MaveHgvsError::OutOfBounds { .. }
        )
    }

    /// Format the error prefixed with its code, e.g. `[E1001] failed to match ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for MaveHgvsError {
    fn from(err: std::io::Error) -> Self {
        MaveHgvsError::Config {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MaveHgvsError {
    fn from(err: toml::de::Error) -> Self {
        MaveHgvsError::Config {
            msg: err.to_string(),
        }
    }
}
