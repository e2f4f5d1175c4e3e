//! Error types for ferro-triage
//!
//! Two tiers of failure exist in this tool. Missing or mistyped annotation
//! values are not errors at all: every predicate substitutes a documented
//! default and keeps going, because upstream annotators are optional. The
//! variants below are the second tier — structural problems in the input
//! that make the whole run meaningless, so they abort it.

use thiserror::Error;

/// Main error type for ferro-triage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// Malformed VCF or report content
    #[error("Parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// A comphet-ranked variant arrived without its pairing token
    #[error(
        "variant {variant} carries comphet_rank but no slivar_comphet link token; \
         run the upstream pairing step first"
    )]
    MissingCompHetToken { variant: String },

    /// A link token that does not follow group/gene/pair-id
    #[error("malformed compound-het link token '{token}': expected group/gene/pair-id")]
    MalformedCompHetToken { token: String },

    /// Consequence extraction requested but the header never declares CSQ
    #[error("no CSQ INFO declaration in the VCF header; annotate with VEP first")]
    MissingCsqSchema,

    /// CSQ is declared but its Description carries no field list
    #[error("CSQ INFO declaration has no 'Format: ' field list: {description}")]
    MalformedCsqSchema { description: String },

    /// A per-proband column is absent from a PSAP report header
    #[error("column {column} not found in report header")]
    MissingReportColumn { column: String },

    /// Unrecognized field-combination operator
    #[error("unknown operator '{operator}': expected max, min, or mean")]
    UnknownOperator { operator: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl TriageError {
    /// Create a parse error for a 1-based input line
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        TriageError::Parse {
            line,
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::Io {
            msg: err.to_string(),
        }
    }
}
